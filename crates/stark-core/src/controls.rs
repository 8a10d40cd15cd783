use crate::patterns::PatternKind;

/// Commands from the control surface (GUI panel or keyboard).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Control {
    NextPattern,
    GoTo(PatternKind),
    SetTransitionSpeed(f32),
    SetIdleIntensity(f32),
    SetParticleSize(f32),
    /// Multiply the transition speed by this factor.
    ScaleTransitionSpeed(f32),
    /// Add this amount to the idle intensity.
    NudgeIdleIntensity(f32),
    /// Multiply the particle size by this factor.
    ScaleParticleSize(f32),
}

const SPEED_STEP: f32 = 1.25;
const IDLE_STEP: f32 = 0.1;
const SIZE_STEP: f32 = 1.2;

#[inline]
pub fn control_for_key(key: &str) -> Option<Control> {
    match key {
        "n" | "N" | " " => Some(Control::NextPattern),
        "+" | "=" => Some(Control::ScaleTransitionSpeed(SPEED_STEP)),
        "-" | "_" => Some(Control::ScaleTransitionSpeed(1.0 / SPEED_STEP)),
        "w" => Some(Control::NudgeIdleIntensity(-IDLE_STEP)),
        "W" => Some(Control::NudgeIdleIntensity(IDLE_STEP)),
        "[" => Some(Control::ScaleParticleSize(1.0 / SIZE_STEP)),
        "]" => Some(Control::ScaleParticleSize(SIZE_STEP)),
        _ => None,
    }
}

/// Digits `1`-`9` and `0` jump straight to the first ten patterns.
#[inline]
pub fn pattern_for_digit(key: &str) -> Option<PatternKind> {
    match key {
        "0" => PatternKind::from_index(9),
        "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9" => {
            let digit = key.parse::<usize>().ok()?;
            PatternKind::from_index(digit - 1)
        }
        _ => None,
    }
}

/// Resolve a key press to a command, checking digit shortcuts after the
/// regular bindings.
pub fn handle_key(key: &str) -> Option<Control> {
    control_for_key(key).or_else(|| pattern_for_digit(key).map(Control::GoTo))
}
