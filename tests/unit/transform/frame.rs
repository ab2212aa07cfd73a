use super::*;

fn close(a: Vector, b: Vector) -> bool {
    a.approx_eq(b, 1e-9)
}

fn sample_frame() -> CoordinateFrame {
    CoordinateFrame::new(
        Vector::xy(2.0, -1.0),
        Vector::xy(0.5, 0.25),
        0.6,
        Vector::xy(1.5, 0.75),
    )
}

#[test]
fn round_trip_internal_external() {
    let f = sample_frame();
    let pts = vec![
        Vector::xy(0.0, 0.0),
        Vector::xy(1.0, -3.0),
        Vector::new(4.0, 2.0, 5.0),
    ];
    let ext = f.internal_to_external(&pts);
    let back = f.external_to_internal(&ext).unwrap();
    for (a, b) in pts.iter().zip(&back) {
        assert!(close(*a, *b));
    }
}

#[test]
fn about_point_change_keeps_geometry_in_place() {
    let mut f = sample_frame();
    let probe = vec![Vector::xy(1.0, 1.0), Vector::xy(-2.0, 0.5)];
    let before = f.internal_to_external(&probe);
    f.set_about_point(Vector::xy(-1.0, 3.0));
    let after = f.internal_to_external(&probe);
    for (a, b) in before.iter().zip(&after) {
        assert!(close(*a, *b));
    }
    // The pivot now sits at the external position.
    let pivot = f.internal_to_external(&[Vector::xy(-1.0, 3.0)]);
    assert!(close(pivot[0], f.position()));
}

#[test]
fn scale_setter_fills_degenerate_axes() {
    let mut f = CoordinateFrame::default();
    f.set_scale(Vector::xy(2.0, 0.0));
    assert_eq!(f.scale(), Vector::new(2.0, 2.0, 1.0));
}

#[test]
fn compose_matches_matrix_product() {
    let outer = CoordinateFrame::new(Vector::xy(1.0, 1.0), Vector::ZERO, 0.0, Vector::xy(2.0, 0.5));
    let inner = sample_frame();
    let c = &outer * &inner;
    let want = outer.transform_matrix() * inner.transform_matrix();
    for p in [Vector::xy(0.3, 0.2), Vector::xy(-1.0, 4.0)] {
        assert!(close(
            affine::apply(c.transform_matrix(), p),
            affine::apply(want, p)
        ));
    }
    assert_eq!(c.about_point(), inner.about_point());
}

#[test]
fn set_transform_matrix_resets_pivot() {
    let src = sample_frame();
    let mut f = CoordinateFrame::default();
    f.set_transform_matrix(src.transform_matrix());
    assert_eq!(f.about_point(), Vector::ZERO);
    let p = Vector::xy(0.7, -0.1);
    assert!(close(
        affine::apply(f.transform_matrix(), p),
        affine::apply(src.transform_matrix(), p)
    ));
}

#[test]
fn serde_round_trip_rebuilds_matrix() {
    let f = sample_frame();
    let json = serde_json::to_string(&f).unwrap();
    let back: CoordinateFrame = serde_json::from_str(&json).unwrap();
    assert!(close(back.position(), f.position()));
    assert!(close(back.about_point(), f.about_point()));
    let p = Vector::xy(1.0, 2.0);
    assert!(close(
        affine::apply(back.transform_matrix(), p),
        affine::apply(f.transform_matrix(), p)
    ));
}
