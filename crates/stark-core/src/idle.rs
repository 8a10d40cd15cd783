use crate::constants::{IDLE_DISPLACEMENT_SCALE, IDLE_INDEX_PHASE, IDLE_TIME_FREQUENCY};
use glam::Vec3;

/// Ambient drift applied while no transition is running.
///
/// Each particle is pushed along `(cos φ, sin φ)` in the XY plane with
/// `φ = time * f + i * phase`. The displacement accumulates: positions keep
/// whatever drift they absorbed, there is no anchor to return to.
pub fn apply_idle_drift(positions: &mut [Vec3], time_sec: f32, dt_sec: f32, intensity: f32) {
    if intensity == 0.0 || dt_sec == 0.0 {
        return;
    }
    let step = intensity * dt_sec * IDLE_DISPLACEMENT_SCALE;
    let base = time_sec * IDLE_TIME_FREQUENCY;
    for (i, p) in positions.iter_mut().enumerate() {
        let phase = base + i as f32 * IDLE_INDEX_PHASE;
        p.x += phase.cos() * step;
        p.y += phase.sin() * step;
    }
}
