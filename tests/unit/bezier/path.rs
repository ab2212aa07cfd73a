use super::*;

fn pts(raw: &[[f64; 2]]) -> Vec<Vector> {
    raw.iter().map(|&p| Vector::from(p)).collect()
}

#[test]
fn connect_linear_hits_every_point() {
    let p = pts(&[[0.0, 0.0], [1.0, 2.0], [3.0, 2.0], [4.0, -1.0]]);
    let path = PolyBezier::linear(&p, false).unwrap();
    assert_eq!(path.len(), 3);
    assert!(path.is_connected());
    assert!(path.eval(0.0).unwrap().approx_eq(p[0], 1e-12));
    assert!(path.eval(3.0).unwrap().approx_eq(p[3], 1e-12));
    for (i, want) in p.iter().enumerate() {
        assert!(path.eval(i as f64).unwrap().approx_eq(*want, 1e-12));
    }
}

#[test]
fn connect_linear_close_returns_home() {
    let p = pts(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
    let path = PolyBezier::linear(&p, true).unwrap();
    assert_eq!(path.len(), 3);
    assert!(path.eval(3.0).unwrap().approx_eq(p[0], 1e-12));
}

#[test]
fn too_few_points_is_a_construction_error() {
    assert!(matches!(
        PolyBezier::linear(&pts(&[[0.0, 0.0]]), false),
        Err(AnimError::Construction(_))
    ));
    assert!(matches!(
        PolyBezier::from_points(&[Vector::ZERO; 5]),
        Err(AnimError::Construction(_))
    ));
}

#[test]
fn connect_smooth_interpolates_and_is_c1() {
    let p = pts(&[[0.0, 0.0], [1.0, 1.0], [2.0, 0.0], [3.0, 1.0], [4.0, 0.0]]);
    let path = PolyBezier::smooth(&p).unwrap();
    assert_eq!(path.len(), 4);
    for (i, want) in p.iter().enumerate() {
        assert!(path.eval(i as f64).unwrap().approx_eq(*want, 1e-9));
    }
    for i in 0..3 {
        let a = &path.segments()[i];
        let b = &path.segments()[i + 1];
        // Incoming and outgoing handles are mirrored about the shared point.
        let mirrored = a.p3() * 2.0 - a.p2();
        assert!(mirrored.approx_eq(b.p1(), 1e-9));
    }
}

#[test]
fn connect_smooth_on_evenly_spaced_line_is_straight() {
    let p = pts(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);
    let path = PolyBezier::smooth(&p).unwrap();
    let s = &path.segments()[0];
    assert!(s.p1().approx_eq(Vector::xy(1.0 / 3.0, 0.0), 1e-12));
    assert!(s.p2().approx_eq(Vector::xy(2.0 / 3.0, 0.0), 1e-12));
}

#[test]
fn connect_smooth_two_points_uses_thirds() {
    let p = pts(&[[0.0, 0.0], [3.0, 3.0]]);
    let path = PolyBezier::smooth(&p).unwrap();
    assert_eq!(path.len(), 1);
    assert!(path.segments()[0].p1().approx_eq(Vector::xy(1.0, 1.0), 1e-12));
}

#[test]
fn eval_bounds() {
    let path = PolyBezier::linear(&pts(&[[0.0, 0.0], [1.0, 0.0]]), false).unwrap();
    assert!(matches!(path.eval(1.5), Err(AnimError::Bounds(_))));
    assert!(matches!(
        PolyBezier::new().eval(0.0),
        Err(AnimError::Bounds(_))
    ));
}

#[test]
fn find_segment_uses_strict_comparison() {
    let path = PolyBezier::linear(&pts(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]), false)
        .unwrap()
        .with_arc_samples(1001);
    let (seg, local) = path.find_segment(0.25).unwrap();
    assert_eq!(seg, 0);
    assert!((local - 0.5).abs() < 1e-9);
    let (seg, _) = path.find_segment(1.0).unwrap();
    assert_eq!(seg, 1);
    let (seg, _) = path.find_segment(0.75).unwrap();
    assert_eq!(seg, 1);
}

#[test]
fn interior_boundary_starts_the_following_segment() {
    let path = PolyBezier::linear(&pts(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]), false).unwrap();
    let (seg, local) = path.find_segment(0.5).unwrap();
    assert_eq!(seg, 1);
    assert_eq!(local, 0.0);
    assert!(matches!(
        PolyBezier::new().find_segment(0.5),
        Err(AnimError::Bounds(_))
    ));
}

#[test]
fn split_at_distance_reassembles() {
    let path = PolyBezier::linear(&pts(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0]]), false)
        .unwrap()
        .with_arc_samples(2001);
    let (l, r) = path.split(0.5).unwrap();
    assert_eq!(l.len() + r.len(), 3);
    let join = l.segments().last().unwrap().p3();
    assert!(join.approx_eq(r.segments()[0].p0(), 1e-12));
    assert!((l.length() - 2.0).abs() < 1e-3);
    assert!((r.length() - 2.0).abs() < 1e-3);
}

#[test]
fn solve_param_round_trip_over_path() {
    let path = PolyBezier::smooth(&pts(&[[0.0, 0.0], [1.0, 2.0], [2.5, 1.0], [4.0, 3.0]])).unwrap();
    for t in [0.2, 1.0, 1.7, 2.9] {
        let x = path.eval(t).unwrap().x;
        assert!((path.solve_param(x, 0).unwrap() - t).abs() < 1e-6);
    }
}

#[test]
fn subdivide_and_lerp() {
    let mut a = PolyBezier::linear(&pts(&[[0.0, 0.0], [1.0, 0.0]]), false).unwrap();
    let b = PolyBezier::linear(
        &pts(&[[0.0, 1.0], [1.0, 1.0], [2.0, 1.0], [3.0, 1.0]]),
        false,
    )
    .unwrap();
    assert!(a.lerp(&b, 0.5).is_err());
    a.subdivide_to(b.len()).unwrap();
    assert_eq!(a.len(), 3);
    let mid = a.lerp(&b, 0.5).unwrap();
    assert!((mid.eval(0.0).unwrap().y - 0.5).abs() < 1e-12);
}

#[test]
fn bounding_box_of_empty_path_is_zero() {
    assert_eq!(PolyBezier::new().bounding_box(), BoundingBox::ZERO);
}

#[test]
fn to_bez_path_breaks_on_gaps() {
    let mut path = PolyBezier::linear(&pts(&[[0.0, 0.0], [1.0, 0.0]]), false).unwrap();
    path.connect_linear(&pts(&[[5.0, 5.0], [6.0, 5.0]]), false)
        .unwrap();
    let bp = path.to_bez_path();
    let moves = bp
        .elements()
        .iter()
        .filter(|e| matches!(e, kurbo::PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 2);
}
