use super::*;
use crate::scene::shapes;

fn info(index: u64, changed: bool) -> FrameInfo {
    FrameInfo {
        index,
        time: index as f64 * 0.5,
        changed,
    }
}

fn scene() -> Scene {
    let mut scene = Scene::new();
    scene
        .add_anobject(shapes::rectangle([1.0, 1.0]).unwrap(), Some("r"))
        .unwrap();
    scene
}

#[test]
fn null_backend_counts() {
    let scene = scene();
    let mut backend = NullBackend::default();
    backend.start(&EngineConfig::default()).unwrap();
    backend.add_frame(&info(0, true), &scene).unwrap();
    backend.add_frame(&info(1, false), &scene).unwrap();
    backend.end().unwrap();
    assert_eq!(backend.frames, 2);
}

#[test]
fn display_lists_are_shared_while_unchanged() {
    let scene = scene();
    let mut backend = DisplayListBackend::new();
    backend.start(&EngineConfig::default()).unwrap();
    backend.add_frame(&info(0, true), &scene).unwrap();
    backend.add_frame(&info(1, false), &scene).unwrap();
    backend.add_frame(&info(2, true), &scene).unwrap();
    backend.end().unwrap();

    let frames = backend.frames();
    assert_eq!(frames.len(), 3);
    assert_eq!(backend.recorded(), 2);
    assert!(Arc::ptr_eq(&frames[0].list, &frames[1].list));
    assert!(!Arc::ptr_eq(&frames[1].list, &frames[2].list));
    assert_eq!(frames[2].list.path_count(), 1);
    assert!(backend.ended());
}

#[test]
fn first_frame_is_recorded_even_if_clean() {
    let scene = scene();
    let mut backend = DisplayListBackend::new();
    backend.add_frame(&info(0, false), &scene).unwrap();
    assert_eq!(backend.recorded(), 1);
}

#[test]
fn json_lines_one_object_per_frame() {
    let scene = scene();
    let mut backend = JsonLinesBackend::new(Vec::new());
    backend.add_frame(&info(0, true), &scene).unwrap();
    backend.add_frame(&info(1, false), &scene).unwrap();
    backend.end().unwrap();
    let out = String::from_utf8(backend.into_inner()).unwrap();
    let lines: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["frame"], 1);
    assert_eq!(lines[1]["time"], 0.5);
    assert_eq!(lines[1]["changed"], false);
    assert_eq!(lines[0]["display"], lines[1]["display"]);
    assert_eq!(lines[0]["display"]["items"][0]["op"], "path");
}

#[test]
fn mutable_references_are_backends() {
    fn emit<B: Backend>(mut backend: B, scene: &Scene) {
        backend.add_frame(&info(0, true), scene).unwrap();
    }
    let scene = scene();
    let mut inner = NullBackend::default();
    emit(&mut inner, &scene);
    emit(&mut inner, &scene);
    assert_eq!(inner.frames, 2);
}
