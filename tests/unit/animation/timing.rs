use super::*;

#[test]
fn zero_duration_completes_without_consuming() {
    let mut t = Timing::new(0.0, TransferFn::Linear);
    assert_eq!(t.update(0.0), 0.0);
    assert!(t.is_complete());
    assert_eq!(t.alpha(), 1.0);
}

#[test]
fn one_second_at_tenth_steps_finishes_on_tenth_tick() {
    let mut t = Timing::new(1.0, TransferFn::Linear);
    for tick in 1..=10 {
        let used = t.update(0.1);
        assert!(used <= 0.1 + 1e-12);
        assert_eq!(t.is_complete(), tick == 10, "tick {tick}");
    }
    assert_eq!(t.alpha(), 1.0);
}

#[test]
fn remainder_is_reported_when_dt_overshoots() {
    let mut t = Timing::new(0.3, TransferFn::Linear);
    assert_eq!(t.update(0.25), 0.25);
    let used = t.update(0.25);
    assert!((used - 0.05).abs() < 1e-12);
    assert!(t.is_complete());
}

#[test]
fn negative_duration_runs_indefinitely() {
    let mut t = Timing::new(-1.0, TransferFn::Linear);
    for _ in 0..100 {
        assert_eq!(t.update(0.5), 0.5);
    }
    assert!(!t.is_complete());
    assert_eq!(t.time_left(), f64::INFINITY);
}

#[test]
fn alpha_goes_through_transfer() {
    let mut t = Timing::new(2.0, TransferFn::smooth());
    t.update(1.0);
    assert!((t.alpha() - 0.5).abs() < 1e-12);
}
