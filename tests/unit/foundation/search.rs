use super::*;

#[test]
fn bisect_finds_sqrt_two() {
    let mut s = Bisect::new(|x| x * x - 2.0, 0.0, 2.0).unwrap();
    let x = s.iterate_until(1e-10).unwrap();
    assert!((x - 2f64.sqrt()).abs() < 1e-9);
    assert!(s.iterations() > 10);
}

#[test]
fn bisect_rejects_same_sign_brackets() {
    let err = Bisect::new(|x| x * x + 1.0, -1.0, 1.0).err().unwrap();
    assert!(matches!(err, AnimError::DegenerateBracket(_)));
}

#[test]
fn bisect_reports_lost_zero() {
    let f = |x: f64| if x == 0.5 { f64::NAN } else { x - 0.4 };
    let mut s = Bisect::new(f, 0.0, 1.0).unwrap();
    assert!(matches!(s.iterate(), Err(AnimError::DegenerateBracket(_))));
}

#[test]
fn bisect_root_returns_exact_bracket_end() {
    assert_eq!(bisect_root(|x| x - 1.0, 1.0, 3.0, 10).unwrap(), 1.0);
}

#[test]
fn golden_section_finds_parabola_minimum() {
    let mut s = GoldenSection::new(|x| (x - 0.3).powi(2), -1.0, 1.0).unwrap();
    let x = s.iterate_until(1e-8);
    assert!((x - 0.3).abs() < 1e-6);
}

#[test]
fn golden_section_rejects_monotonic_bracket() {
    assert!(matches!(
        GoldenSection::new(|x| x, 0.0, 1.0).err().unwrap(),
        AnimError::DegenerateBracket(_)
    ));
}
