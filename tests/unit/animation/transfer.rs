use super::*;

#[test]
fn endpoints_are_exact() {
    for f in [TransferFn::Linear, TransferFn::smooth()] {
        assert!(f.apply(0.0).abs() < 1e-12);
        assert!((f.apply(1.0) - 1.0).abs() < 1e-12);
    }
    assert!(TransferFn::ThereAndBack.apply(0.0).abs() < 1e-12);
    assert!((TransferFn::ThereAndBack.apply(0.5) - 1.0).abs() < 1e-12);
    assert!(TransferFn::ThereAndBack.apply(1.0).abs() < 1e-12);
}

#[test]
fn smooth_is_monotonic_and_symmetric() {
    let f = TransferFn::smooth();
    let mut prev = f.apply(0.0);
    for i in 1..=100 {
        let v = f.apply(f64::from(i) / 100.0);
        assert!(v >= prev);
        prev = v;
    }
    assert!((f.apply(0.5) - 0.5).abs() < 1e-12);
    assert!((f.apply(0.2) + f.apply(0.8) - 1.0).abs() < 1e-12);
}

#[test]
fn input_is_clamped() {
    assert_eq!(TransferFn::Linear.apply(-1.0), 0.0);
    assert_eq!(TransferFn::Linear.apply(3.0), 1.0);
}

#[test]
fn custom_function_is_applied() {
    let f = TransferFn::Custom(|t| t * t);
    assert!((f.apply(0.5) - 0.25).abs() < 1e-12);
}

#[test]
fn serde_names_are_snake_case() {
    let f: TransferFn = serde_json::from_str(r#"{"smooth":{}}"#).unwrap();
    assert!(matches!(f, TransferFn::Smooth { inflection } if inflection == 6.0));
    let f: TransferFn = serde_json::from_str(r#""there_and_back""#).unwrap();
    assert!(matches!(f, TransferFn::ThereAndBack));
}

#[test]
fn flat_smooth_degrades_to_linear() {
    for inflection in [0.0, -3.0, 1e-300, f64::NAN] {
        let f = TransferFn::Smooth { inflection };
        for t in [0.0, 0.25, 0.5, 1.0] {
            assert_eq!(f.apply(t), t);
        }
    }
}

#[test]
fn non_positive_inflection_is_rejected_when_parsed() {
    for json in [r#"{"smooth":{"inflection":0}}"#, r#"{"smooth":{"inflection":-2.5}}"#] {
        assert!(serde_json::from_str::<TransferFn>(json).is_err(), "{json}");
    }
    let f: TransferFn = serde_json::from_str(r#"{"smooth":{"inflection":0.5}}"#).unwrap();
    assert!((f.apply(0.5) - 0.5).abs() < 1e-12);
}
