// Grace-period bookkeeping for callbacks torn down by mode switches.
// The web crate is wasm-only, so the pure module is included directly.
mod retired {
    include!("../src/retired.rs");
}

use retired::Retired;
use std::rc::Rc;

#[test]
fn values_survive_the_grace_period() {
    let mut retired = Retired::new(4000.0);
    retired.retire("poll-1", 1000.0);
    assert_eq!(retired.prune(4999.0), 0);
    assert!(!retired.is_empty());
    assert_eq!(retired.prune(5000.0), 1);
    assert!(retired.is_empty());
}

#[test]
fn repeated_switching_stays_bounded() {
    let mut retired = Retired::new(4000.0);
    let callback = Rc::new(());
    // one mode switch every 10 s for an hour
    for tick in 0..360 {
        let now = tick as f64 * 10_000.0;
        retired.prune(now);
        retired.retire(callback.clone(), now);
        assert!(Rc::strong_count(&callback) <= 2);
    }
    retired.prune(f64::MAX);
    assert_eq!(Rc::strong_count(&callback), 1);
}

#[test]
fn only_expired_entries_are_released() {
    let mut retired = Retired::new(4000.0);
    retired.retire(1, 0.0);
    retired.retire(2, 3000.0);
    assert_eq!(retired.prune(4500.0), 1);
    assert_eq!(retired.prune(6999.0), 0);
    assert_eq!(retired.prune(7000.0), 1);
}
