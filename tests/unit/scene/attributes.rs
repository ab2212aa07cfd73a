use super::*;
use crate::bezier::path::PolyBezier;

fn line_node() -> SceneNode {
    SceneNode::path(PolyBezier::linear(&[Vector::ZERO, Vector::xy(1.0, 0.0)], false).unwrap())
}

#[test]
fn values_deserialize_from_plain_json() {
    let s: AttrValue = serde_json::from_str("2.5").unwrap();
    assert_eq!(s, AttrValue::Scalar(2.5));
    let v: AttrValue = serde_json::from_str("[1.0, 2.0]").unwrap();
    assert_eq!(v, AttrValue::Vector(Vector::xy(1.0, 2.0)));
    let c: AttrValue = serde_json::from_str("\"#FF0000\"").unwrap();
    assert_eq!(c, AttrValue::Color(Color::rgb(1.0, 0.0, 0.0)));
    assert!(serde_json::from_str::<AttrValue>("[1, 2, 3, 4]").is_err());
}

#[test]
fn lerp_and_offset() {
    let a = AttrValue::Vector(Vector::xy(0.0, 0.0));
    let b = AttrValue::Vector(Vector::xy(2.0, 4.0));
    assert_eq!(a.lerp(&b, 0.5).unwrap(), AttrValue::Vector(Vector::xy(1.0, 2.0)));
    assert_eq!(
        AttrValue::Scalar(1.0).offset_by(&AttrValue::Scalar(2.0)).unwrap(),
        AttrValue::Scalar(3.0)
    );
    // A scalar end value widens against a vector start.
    assert_eq!(
        a.lerp(&AttrValue::Scalar(2.0), 1.0).unwrap(),
        AttrValue::Vector(Vector::xy(2.0, 2.0))
    );
    assert!(matches!(
        AttrValue::Scalar(1.0).lerp(&b, 0.5),
        Err(AnimError::Attribute(_))
    ));
}

#[test]
fn common_attributes_round_trip_through_scene() {
    let mut scene = Scene::new();
    let id = scene.add_anobject(line_node(), Some("l")).unwrap();
    let pos = scene.attribute(id, "position").unwrap();
    pos.set(&mut scene, id, [3.0, 4.0].into()).unwrap();
    assert_eq!(
        pos.get(&scene, id).unwrap(),
        AttrValue::Vector(Vector::xy(3.0, 4.0))
    );

    let scale = scene.attribute(id, "scale").unwrap();
    scale.set(&mut scene, id, AttrValue::Scalar(2.0)).unwrap();
    assert_eq!(scene.node(id).unwrap().frame.scale().x, 2.0);
    assert_eq!(scene.node(id).unwrap().frame.scale().y, 2.0);

    let rot = scene.attribute(id, "rotation_angle").unwrap();
    assert!(rot.set(&mut scene, id, [1.0, 1.0].into()).is_err());
}

#[test]
fn pen_attributes_need_a_path() {
    let mut scene = Scene::new();
    let id = scene.add_anobject(line_node(), None).unwrap();
    let width = scene.attribute(id, "stroke_width").unwrap();
    width.set(&mut scene, id, AttrValue::Scalar(4.0)).unwrap();
    assert_eq!(
        scene.node(id).unwrap().path_data().unwrap().pen.stroke_width,
        4.0
    );
    let fill = scene.attribute(id, "fill_color").unwrap();
    fill.set(&mut scene, id, Color::BLACK.into()).unwrap();
    assert_eq!(fill.get(&scene, id).unwrap(), AttrValue::Color(Color::BLACK));
}

#[test]
fn actions_are_callable_only() {
    let mut scene = Scene::new();
    let id = scene.add_anobject(line_node(), None).unwrap();
    let center = scene.attribute(id, "about_center").unwrap();
    assert!(center.is_callable());
    assert!(center.get(&scene, id).is_err());
    center.call(&mut scene, id).unwrap();
    assert_eq!(scene.node(id).unwrap().frame.about_point().x, 0.5);

    let pos = scene.attribute(id, "position").unwrap();
    assert!(!pos.is_callable());
    assert!(pos.call(&mut scene, id).is_err());
}

#[test]
fn declared_properties_are_animatable() {
    let mut scene = Scene::new();
    let id = scene
        .add_anobject(SceneNode::composite().with_property("progress", 0.0), None)
        .unwrap();
    let p = scene.attribute(id, "progress").unwrap();
    p.set(&mut scene, id, AttrValue::Scalar(0.75)).unwrap();
    assert_eq!(p.get(&scene, id).unwrap(), AttrValue::Scalar(0.75));
    assert!(scene.attribute(id, "other").is_err());
}

#[test]
fn camera_zoom() {
    let mut scene = Scene::new();
    let cam = scene.get_anobject(crate::scene::graph::CAMERA_KEY).unwrap();
    let zoom = scene.attribute(cam, "zoom").unwrap();
    assert_eq!(
        zoom.get(&scene, cam).unwrap(),
        AttrValue::Vector(Vector::xy(16.0, 9.0))
    );
    assert!(attribute_names(NodeKind::Camera).contains(&"zoom"));
    assert!(attribute_names(NodeKind::Composite).contains(&"position"));
}
