//! Unit tests for clocks

use cachly_domain::{Clock, ManualClock, SystemClock};

#[test]
fn test_manual_clock_moves_only_when_told() {
    let clock = ManualClock::new(1_704_067_200);
    assert_eq!(clock.now_epoch_secs(), 1_704_067_200);

    clock.advance(3);
    assert_eq!(clock.now_epoch_secs(), 1_704_067_203);

    clock.set(42);
    assert_eq!(clock.now_epoch_secs(), 42);
}

#[test]
fn test_system_clock_is_after_2024() {
    assert!(SystemClock.now_epoch_secs() > 1_704_067_200);
}
