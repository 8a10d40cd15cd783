// Host-side tests for pure keyboard mapping functions.

use stark_core::*;

#[test]
fn control_for_key_valid_keys() {
    assert_eq!(control_for_key("n"), Some(Control::NextPattern));
    assert_eq!(control_for_key("N"), Some(Control::NextPattern));
    assert_eq!(control_for_key(" "), Some(Control::NextPattern));
    assert!(matches!(control_for_key("+"), Some(Control::ScaleTransitionSpeed(f)) if f > 1.0));
    assert!(matches!(control_for_key("-"), Some(Control::ScaleTransitionSpeed(f)) if f < 1.0));
    assert!(matches!(control_for_key("W"), Some(Control::NudgeIdleIntensity(d)) if d > 0.0));
    assert!(matches!(control_for_key("w"), Some(Control::NudgeIdleIntensity(d)) if d < 0.0));
    assert!(matches!(control_for_key("]"), Some(Control::ScaleParticleSize(f)) if f > 1.0));
    assert!(matches!(control_for_key("["), Some(Control::ScaleParticleSize(f)) if f < 1.0));
}

#[test]
fn control_for_key_invalid_keys() {
    let invalid_keys = ["", "x", "Enter", "ArrowUp", "nn", "\t", "é"];
    for key in invalid_keys {
        assert_eq!(control_for_key(key), None, "key {key:?} should be unbound");
    }
}

#[test]
fn opposite_keys_cancel_out() {
    let (Some(Control::ScaleTransitionSpeed(up)), Some(Control::ScaleTransitionSpeed(down))) =
        (control_for_key("+"), control_for_key("-"))
    else {
        panic!("speed keys unbound");
    };
    assert!((up * down - 1.0).abs() < 1e-6);

    let (Some(Control::ScaleParticleSize(up)), Some(Control::ScaleParticleSize(down))) =
        (control_for_key("]"), control_for_key("["))
    else {
        panic!("size keys unbound");
    };
    assert!((up * down - 1.0).abs() < 1e-6);
}

#[test]
fn pattern_for_digit_valid_digits() {
    assert_eq!(pattern_for_digit("1"), Some(PatternKind::Cube));
    assert_eq!(pattern_for_digit("2"), Some(PatternKind::Sphere));
    assert_eq!(pattern_for_digit("9"), Some(PatternKind::Mobius));
    assert_eq!(pattern_for_digit("0"), Some(PatternKind::Supernova));
}

#[test]
fn pattern_for_digit_invalid_digits() {
    for key in ["", "10", "a", "-1", " "] {
        assert_eq!(pattern_for_digit(key), None, "key {key:?}");
    }
}

#[test]
fn handle_key_prefers_bindings_then_digits() {
    assert_eq!(handle_key("n"), Some(Control::NextPattern));
    assert_eq!(handle_key("5"), Some(Control::GoTo(PatternKind::Torus)));
    assert_eq!(handle_key("q"), None);
}
