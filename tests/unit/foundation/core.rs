use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn from_slice_pads_and_rejects_extra_components() {
    assert_eq!(Vector::from_slice(&[1.0]).unwrap(), Vector::new(1.0, 0.0, 0.0));
    assert_eq!(
        Vector::from_slice(&[1.0, 2.0]).unwrap(),
        Vector::new(1.0, 2.0, 0.0)
    );
    let err = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]).unwrap_err();
    assert!(matches!(err, AnimError::Construction(_)));
}

#[test]
fn arithmetic_is_elementwise() {
    let a = Vector::new(1.0, 2.0, 3.0);
    let b = Vector::new(0.5, -1.0, 2.0);
    assert_eq!(a + b, Vector::new(1.5, 1.0, 5.0));
    assert_eq!(a - b, Vector::new(0.5, 3.0, 1.0));
    assert_eq!(a * 2.0, Vector::new(2.0, 4.0, 6.0));
    assert_eq!(a * b, Vector::new(0.5, -2.0, 6.0));
    assert_eq!(-a, Vector::new(-1.0, -2.0, -3.0));
}

#[test]
fn spherical_setters_hold_other_components() {
    let mut v = Vector::xy(3.0, 4.0);
    assert!(approx(v.r(), 5.0));
    assert!(approx(v.phi(), std::f64::consts::FRAC_PI_2));

    v.set_r(10.0);
    assert!(approx(v.x, 6.0));
    assert!(approx(v.y, 8.0));
    assert!(approx(v.z, 0.0));

    v.set_theta(std::f64::consts::FRAC_PI_2);
    assert!(approx(v.x, 0.0));
    assert!(approx(v.y, 10.0));

    v.set_phi(0.0);
    assert!(approx(v.z, 10.0));
    assert!(v.x.abs() < 1e-9 && v.y.abs() < 1e-9);
}

#[test]
fn unit_and_cross() {
    assert!(approx(Vector::xy(0.0, 7.0).unit().y, 1.0));
    assert_eq!(Vector::ZERO.unit(), Vector::ZERO);
    let z = Vector::xy(1.0, 0.0).cross(Vector::xy(0.0, 1.0));
    assert_eq!(z, Vector::new(0.0, 0.0, 1.0));
}

#[test]
fn bounding_box_union_and_transform() {
    let a = BoundingBox::new(Vector::xy(-1.0, -1.0), Vector::xy(1.0, 1.0));
    let b = BoundingBox::new(Vector::xy(2.0, 0.0), Vector::xy(3.0, 0.5));
    let u = a.union(b);
    assert_eq!(u.min, Vector::xy(-1.0, -1.0));
    assert_eq!(u.max, Vector::xy(3.0, 1.0));

    let rotated = a.transformed(Affine::rotate(std::f64::consts::FRAC_PI_4));
    assert!(approx(rotated.max.x, 2f64.sqrt()));
    assert!(approx(rotated.min.y, -(2f64.sqrt())));
}

#[test]
fn from_points_on_empty_is_none() {
    assert!(BoundingBox::from_points(std::iter::empty()).is_none());
}
