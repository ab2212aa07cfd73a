use super::*;

fn path_of(node: &SceneNode) -> &PolyBezier {
    &node.path_data().unwrap().path
}

#[test]
fn rectangle_is_centred_and_closed() {
    let node = rectangle([2.0, 1.0]).unwrap();
    let p = path_of(&node);
    assert_eq!(p.len(), 4);
    let b = p.bounding_box();
    assert_eq!(b.min, Vector::xy(-1.0, -0.5));
    assert_eq!(b.max, Vector::xy(1.0, 0.5));
    assert!(p.eval(4.0).unwrap().approx_eq(p.eval(0.0).unwrap(), 1e-12));
    assert_eq!(node.frame.about_point(), Vector::ZERO);
}

#[test]
fn circle_has_eight_segments_near_radius() {
    let node = circle(2.0).unwrap();
    let p = path_of(&node);
    assert_eq!(p.len(), 8);
    assert!(p.is_connected());
    assert!(p.eval(0.0).unwrap().approx_eq(Vector::xy(2.0, 0.0), 1e-12));
    assert!(p.eval(8.0).unwrap().approx_eq(Vector::xy(2.0, 0.0), 1e-12));
    for i in 0..16 {
        let r = p.eval(f64::from(i) * 0.5).unwrap().mag();
        assert!((r - 2.0).abs() < 0.05, "radius drifted to {r}");
    }
}

#[test]
fn ellipse_minor_axis() {
    let node = ellipse(2.0, 0.6).unwrap();
    let b = path_of(&node).bounding_box();
    assert!((b.max.y - 1.6).abs() < 0.05);
    assert!(ellipse(1.0, 1.0).is_err());
}

#[test]
fn crosshair_has_two_disconnected_strokes() {
    let node = crosshair([1.0, 1.0]).unwrap();
    let p = path_of(&node);
    assert_eq!(p.len(), 2);
    assert!(!p.is_connected());
    assert_eq!(node.path_data().unwrap().pen.stroke_width, 0.75);
}

#[test]
fn polyline_and_line() {
    let pts = [Vector::ZERO, Vector::xy(1.0, 1.0), Vector::xy(2.0, 0.0)];
    assert_eq!(path_of(&polyline(&pts, true).unwrap()).len(), 2);
    assert_eq!(path_of(&polyline(&pts, false).unwrap()).len(), 2);
    assert!(polyline(&pts[..1], false).is_err());
    let l = line([0.0, 0.0], [3.0, 4.0]).unwrap();
    assert!((path_of(&l).length() - 5.0).abs() < 1e-3);
}

#[test]
fn image_box() {
    let node = image(1, 1, vec![255; 4], [2.0, 3.0]).unwrap();
    assert_eq!(node.leaf_bounding_box().unwrap().max, Vector::xy(2.0, 3.0));
}
