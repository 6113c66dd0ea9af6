use futures::future::{Abortable, Aborted};

use super::*;

// =============================================================
// settle ordering
// =============================================================

#[test]
fn single_load_is_applied() {
    let mut inflight = InFlight::default();
    let (ticket, _reg) = inflight.begin();
    assert_eq!(inflight.pending(), 1);
    assert!(inflight.settle(ticket));
    assert_eq!(inflight.pending(), 0);
}

#[test]
fn newer_load_wins_over_late_older_one() {
    let mut inflight = InFlight::default();
    let (older, _r1) = inflight.begin();
    let (newer, _r2) = inflight.begin();

    assert!(inflight.settle(newer));
    assert!(!inflight.settle(older));
    assert_eq!(inflight.pending(), 0);
}

#[test]
fn in_order_completion_applies_both() {
    let mut inflight = InFlight::default();
    let (first, _r1) = inflight.begin();
    let (second, _r2) = inflight.begin();

    assert!(inflight.settle(first));
    assert!(inflight.settle(second));
}

// =============================================================
// reset
// =============================================================

#[test]
fn reset_discards_previous_epoch() {
    let mut inflight = InFlight::default();
    let (old, _reg) = inflight.begin();

    assert_eq!(inflight.reset(), 1);
    assert_eq!(inflight.pending(), 0);
    assert!(!inflight.settle(old));

    let (fresh, _reg) = inflight.begin();
    assert!(inflight.settle(fresh));
}

#[test]
fn reset_aborts_pending_futures() {
    let mut inflight = InFlight::default();
    let (_ticket, registration) = inflight.begin();
    let load = Abortable::new(futures::future::pending::<()>(), registration);

    inflight.reset();

    assert_eq!(futures::executor::block_on(load), Err(Aborted));
}

#[test]
fn reset_with_nothing_pending() {
    let mut inflight = InFlight::default();
    assert_eq!(inflight.reset(), 0);
}
