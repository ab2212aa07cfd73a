use super::*;
use crate::foundation::core::Vector;
use crate::scene::node::Color;

const SAMPLE: &str = r##"{
  "objects": [
    { "key": "box", "shape": "rectangle", "size": [2, 1], "position": [-3, 0],
      "pen": { "stroke_color": "#ff0000", "stroke_width": 2 },
      "properties": { "glow": 0.5, "tint": "#00ff00" } },
    { "key": "group", "shape": "composite", "children": [
      { "key": "dot", "shape": "circle", "radius": 0.25 },
      { "key": "tick", "shape": "line", "from": [0, 0], "to": [0, 1] }
    ] }
  ],
  "timeline": [
    { "step": "move_to", "target": "box", "to": [3, 0], "duration": 1.5,
      "transfer": { "smooth": { "inflection": 10 } } },
    { "step": "parallel", "steps": [
      { "step": "rotate", "target": ["group", "dot"], "angle": 1.0, "duration": 1 },
      { "step": "set", "target": "box", "attribute": "glow", "value": 1 }
    ] },
    { "step": "wait", "duration": 0.5 }
  ]
}"##;

#[test]
fn parses_objects_and_timeline() {
    let script = Script::from_json_str(SAMPLE).unwrap();
    assert_eq!(script.objects.len(), 2);
    let boxed = &script.objects[0];
    assert!(matches!(boxed.shape, ShapeDef::Rectangle { size } if size == [2.0, 1.0]));
    assert_eq!(boxed.position, [-3.0, 0.0]);
    let pen = boxed.pen.unwrap();
    assert_eq!(pen.stroke_color, Color::from_hex("#ff0000").unwrap());
    assert_eq!(pen.stroke_width, 2.0);
    assert_eq!(pen.fill_opacity, 0.0);
    assert_eq!(boxed.properties["glow"], AttrValue::Scalar(0.5));
    assert_eq!(
        boxed.properties["tint"],
        AttrValue::Color(Color::from_hex("#00ff00").unwrap())
    );

    match &script.timeline[0] {
        StepDef::MoveTo {
            target,
            to,
            duration,
            transfer,
        } => {
            assert_eq!(target, &TargetDef::Key("box".into()));
            assert_eq!(*to, [3.0, 0.0]);
            assert_eq!(*duration, 1.5);
            assert!(matches!(
                transfer,
                Some(TransferFn::Smooth { inflection }) if *inflection == 10.0
            ));
        }
        other => panic!("unexpected step {other:?}"),
    }
}

#[test]
fn key_paths_become_targets() {
    let script = Script::from_json_str(SAMPLE).unwrap();
    let StepDef::Parallel { steps } = &script.timeline[1] else {
        panic!("expected a parallel step");
    };
    let StepDef::Rotate { target, .. } = &steps[0] else {
        panic!("expected a rotate step");
    };
    assert_eq!(
        Target::from(target),
        Target::path(["group", "dot"])
    );
}

#[test]
fn counts_nested_objects_and_leaf_steps() {
    let script = Script::from_json_str(SAMPLE).unwrap();
    assert_eq!(script.object_count(), 4);
    assert_eq!(script.step_count(), 4);
}

#[test]
fn defaults_fill_missing_fields() {
    let script = Script::from_json_str(
        r#"{ "objects": [ { "key": "p", "shape": "svg_path", "d": "M0 0 L1 1" } ],
             "timeline": [ { "step": "emphasize", "target": "p" },
                           { "step": "slide", "target": "p", "attribute": "scale", "to": [2, 2] } ] }"#,
    )
    .unwrap();
    assert!(matches!(&script.objects[0].shape, ShapeDef::SvgPath { scale, .. } if *scale == 1.0));
    assert!(script.objects[0].pen.is_none());
    assert!(matches!(
        script.timeline[0],
        StepDef::Emphasize { mult, duration, .. } if mult == 2.0 && duration == 0.0
    ));
    match &script.timeline[1] {
        StepDef::Slide {
            to, from, relative, ..
        } => {
            assert_eq!(*to, AttrValue::Vector(Vector::xy(2.0, 2.0)));
            assert!(from.is_none());
            assert!(!relative);
        }
        other => panic!("unexpected step {other:?}"),
    }
}

#[test]
fn empty_document_is_an_empty_script() {
    let script = Script::from_json_str("{}").unwrap();
    assert_eq!(script.object_count(), 0);
    assert_eq!(script.step_count(), 0);
}

#[test]
fn malformed_scripts_are_serde_errors() {
    for bad in [
        "{ \"objects\": [",
        r#"{ "timeline": [ { "step": "teleport", "target": "a" } ] }"#,
        r#"{ "objects": [ { "key": "a", "shape": "circle" } ] }"#,
    ] {
        assert!(matches!(
            Script::from_json_str(bad),
            Err(AnimError::Serde(_))
        ));
    }
}

#[test]
fn missing_file_is_reported_with_its_path() {
    let err = Script::from_path("/definitely/not/here.json").unwrap_err();
    assert!(format!("{err:#}").contains("/definitely/not/here.json"));
}
