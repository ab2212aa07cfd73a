use super::*;

fn s_curve() -> BezierSegment {
    BezierSegment::new(
        Vector::xy(0.0, 0.0),
        Vector::xy(1.0, 2.0),
        Vector::xy(2.0, -2.0),
        Vector::xy(3.0, 0.0),
    )
}

#[test]
fn eval_hits_endpoints_and_rejects_out_of_range() {
    let s = s_curve();
    assert_eq!(s.eval(0.0).unwrap(), s.p0());
    assert!(s.eval(1.0).unwrap().approx_eq(s.p3(), 1e-12));
    assert!(matches!(s.eval(1.01), Err(AnimError::Bounds(_))));
    assert!(matches!(s.eval(-0.5), Err(AnimError::Bounds(_))));
}

#[test]
fn split_is_continuous() {
    let s = s_curve();
    for i in 0..=20 {
        let t = f64::from(i) / 20.0;
        let (l, r) = s.split(t).unwrap();
        let at = s.eval(t).unwrap();
        assert!(l.eval(1.0).unwrap().approx_eq(at, 1e-9));
        assert!(r.eval(0.0).unwrap().approx_eq(at, 1e-9));
    }
}

#[test]
fn split_halves_trace_the_original() {
    let s = s_curve();
    let (l, r) = s.split(0.3).unwrap();
    assert!(
        l.eval(0.5)
            .unwrap()
            .approx_eq(s.eval(0.15).unwrap(), 1e-9)
    );
    assert!(
        r.eval(0.5)
            .unwrap()
            .approx_eq(s.eval(0.65).unwrap(), 1e-9)
    );
}

#[test]
fn bounding_box_includes_interior_extrema() {
    let b = s_curve().bounding_box();
    assert_eq!(b.min.x, 0.0);
    assert!((b.max.x - 3.0).abs() < 1e-12);
    // Peak and trough are interior, well beyond the endpoints' y = 0.
    assert!(b.max.y > 0.5);
    assert!(b.min.y < -0.5);
    for i in 0..=100 {
        let p = s_curve().eval(f64::from(i) / 100.0).unwrap();
        assert!(p.y <= b.max.y + 1e-12 && p.y >= b.min.y - 1e-12);
    }
}

#[test]
fn straight_line_arc_length_and_distance_lookup() {
    let s = BezierSegment::new(
        Vector::xy(0.0, 0.0),
        Vector::xy(1.0, 0.0),
        Vector::xy(2.0, 0.0),
        Vector::xy(3.0, 0.0),
    )
    .with_samples(3001);
    assert!((s.arc_length() - 3.0).abs() < 1e-9);
    let p = s.point_at_distance(0.5);
    assert!((p.x - 1.5).abs() <= 3.0 / 3000.0 + 1e-9);
    assert_eq!(s.point_at_distance(1.0), s.p3());
}

#[test]
fn solve_param_round_trips() {
    let s = BezierSegment::new(
        Vector::xy(0.0, 0.0),
        Vector::xy(0.5, 3.0),
        Vector::xy(2.0, -1.0),
        Vector::xy(4.0, 1.0),
    );
    for t in [0.0, 0.1, 0.37, 0.5, 0.81, 1.0] {
        let x = s.eval(t).unwrap().x;
        let back = s.solve_param(x, 0).unwrap();
        assert!((back - t).abs() < 1e-6, "t = {t}, got {back}");
    }
}

#[test]
fn solve_param_rejects_unreachable_value() {
    assert!(matches!(
        s_curve().solve_param(10.0, 0),
        Err(AnimError::DegenerateBracket(_))
    ));
}

#[test]
fn nearest_param_on_line() {
    let s = BezierSegment::line(Vector::xy(0.0, 0.0), Vector::xy(4.0, 0.0));
    let t = s.nearest_param(Vector::xy(1.0, 5.0));
    assert!((s.eval(t).unwrap().x - 1.0).abs() < 1e-6);
}

#[test]
fn from_slice_requires_four_points() {
    assert!(matches!(
        BezierSegment::from_slice(&[Vector::ZERO; 3]),
        Err(AnimError::Construction(_))
    ));
}
