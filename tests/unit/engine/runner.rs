use super::*;
use crate::engine::backend::DisplayListBackend;
use crate::foundation::core::Vector;
use crate::foundation::error::AnimError;
use crate::instruction::basic::{Wait, move_to};
use crate::scene::shapes;

fn config(frame_rate: f64) -> EngineConfig {
    EngineConfig {
        frame_rate,
        arc_length_samples: 1_000,
        ..EngineConfig::default()
    }
}

#[test]
fn frames_follow_duration() {
    let mut engine = Engine::new(config(10.0)).unwrap();
    let id = engine
        .scene_mut()
        .add_anobject(shapes::rectangle([1.0, 1.0]).unwrap(), Some("r"))
        .unwrap();
    let stats = engine
        .run(vec![move_to("r", [3.0, 0.0]).with_duration(1.0).node()])
        .unwrap();
    assert_eq!(stats.frames, 10);
    assert!(!stats.truncated);
    assert!((stats.elapsed - 1.0).abs() < 1e-9);
    assert_eq!(engine.backend().frames, 10);
    let p = engine.scene().node(id).unwrap().frame.position();
    assert!(p.approx_eq(Vector::xy(3.0, 0.0), 1e-9));
}

#[test]
fn instantaneous_timelines_emit_no_frames() {
    let mut engine = Engine::new(config(30.0)).unwrap();
    engine
        .scene_mut()
        .add_anobject(shapes::circle(1.0).unwrap(), Some("c"))
        .unwrap();
    let stats = engine
        .run(vec![
            move_to("c", [1.0, 0.0]).node(),
            move_to("c", [2.0, 0.0]).node(),
        ])
        .unwrap();
    assert_eq!(stats.frames, 0);
    assert_eq!(engine.backend().frames, 0);
}

#[test]
fn max_frames_truncates_endless_runs() {
    let cfg = EngineConfig {
        max_frames: Some(7),
        ..config(60.0)
    };
    let mut engine = Engine::new(cfg).unwrap();
    let stats = engine.run(vec![Wait::new(-1.0).node()]).unwrap();
    assert_eq!(stats.frames, 7);
    assert!(stats.truncated);
}

#[test]
fn render_off_still_advances() {
    let cfg = EngineConfig {
        render: false,
        ..config(10.0)
    };
    let mut engine = Engine::new(cfg).unwrap();
    let stats = engine.run(vec![Wait::new(0.5).node()]).unwrap();
    assert_eq!(stats.frames, 5);
    assert_eq!(engine.backend().frames, 0);
    assert!((engine.scene().time() - 0.5).abs() < 1e-9);
}

#[test]
fn unchanged_frames_reuse_display_lists() {
    let mut engine = Engine::with_backend(config(10.0), DisplayListBackend::new()).unwrap();
    engine
        .scene_mut()
        .add_anobject(shapes::rectangle([1.0, 1.0]).unwrap(), Some("r"))
        .unwrap();
    engine
        .run(vec![
            Wait::new(0.3).node(),
            move_to("r", [1.0, 0.0]).with_duration(0.2).node(),
        ])
        .unwrap();
    let backend = engine.backend();
    let frames = backend.frames();
    assert!(frames.len() >= 5);
    assert!(frames[0].info.changed);
    assert!(!frames[1].info.changed);
    assert!(std::sync::Arc::ptr_eq(&frames[0].list, &frames[2].list));
    assert!(frames[3].info.changed);
    assert!(backend.recorded() < frames.len());
    assert!(backend.ended());
}

#[test]
fn failures_name_the_instruction() {
    let mut engine = Engine::new(config(10.0)).unwrap();
    let err = engine
        .run(vec![move_to("ghost", [1.0, 0.0]).with_duration(1.0).node()])
        .unwrap_err();
    match err {
        AnimError::Instruction { instruction, .. } => assert_eq!(instruction, "MoveTo"),
        other => panic!("unexpected {other}"),
    }
}

#[test]
fn invalid_config_is_refused() {
    assert!(matches!(
        Engine::new(config(0.0)),
        Err(AnimError::Config(_))
    ));
}
