use super::*;

#[test]
fn closed_square_flips_y() {
    let p = PolyBezier::from_svg_path("M0,0 L2,0 L2,2 L0,2 Z", 1.0).unwrap();
    assert_eq!(p.len(), 4);
    assert!(p.is_connected());
    let b = p.bounding_box();
    assert_eq!(b.min.y, -2.0);
    assert_eq!(b.max.y, 0.0);
    assert!(p.eval(4.0).unwrap().approx_eq(Vector::ZERO, 1e-12));
}

#[test]
fn quadratic_becomes_cubic_through_same_points() {
    let p = PolyBezier::from_svg_path("M0,0 Q1,2 2,0", 0.5).unwrap();
    assert_eq!(p.len(), 1);
    // Quadratic midpoint is (1, 1) in SVG space, scaled by 0.5 and flipped.
    assert!(p.eval(0.5).unwrap().approx_eq(Vector::xy(0.5, -0.5), 1e-12));
}

#[test]
fn malformed_data_is_a_construction_error() {
    assert!(matches!(
        PolyBezier::from_svg_path("M0,0 K1,1", 1.0),
        Err(AnimError::Construction(_))
    ));
}
