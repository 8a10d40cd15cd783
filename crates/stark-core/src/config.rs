use crate::constants::{
    DEFAULT_IDLE_INTENSITY, DEFAULT_PARTICLE_COUNT, DEFAULT_PARTICLE_SIZE,
    DEFAULT_TRANSITION_SPEED, IDLE_INTENSITY_RANGE, PARTICLE_SIZE_RANGE, TRANSITION_SPEED_RANGE,
};
use crate::error::{Result, VisualizerError};
use crate::render::PostSettings;

/// Start-up parameters for a [`Visualizer`](crate::Visualizer).
///
/// The particle count is fixed for the lifetime of the visualizer. The three
/// scalar parameters can be changed later through the control surface.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualizerConfig {
    pub particle_count: usize,
    pub transition_speed: f32,
    pub idle_intensity: f32,
    pub particle_size: f32,
    /// `None` seeds the random source from entropy.
    pub seed: Option<u64>,
    pub post: PostSettings,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            transition_speed: DEFAULT_TRANSITION_SPEED,
            idle_intensity: DEFAULT_IDLE_INTENSITY,
            particle_size: DEFAULT_PARTICLE_SIZE,
            seed: None,
            post: PostSettings::default(),
        }
    }
}

fn check_range(name: &'static str, value: f32, (min, max): (f32, f32)) -> Result<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(VisualizerError::InvalidParameter {
            name,
            value,
            min,
            max,
        })
    }
}

impl VisualizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.particle_count == 0 {
            return Err(VisualizerError::InvalidParticleCount(self.particle_count));
        }
        check_range(
            "transition_speed",
            self.transition_speed,
            TRANSITION_SPEED_RANGE,
        )?;
        check_range("idle_intensity", self.idle_intensity, IDLE_INTENSITY_RANGE)?;
        check_range("particle_size", self.particle_size, PARTICLE_SIZE_RANGE)?;
        Ok(())
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Clamp `value` into `range`, logging when it had to move.
///
/// NaN falls back to the lower bound.
pub(crate) fn clamp_logged(name: &str, value: f32, (min, max): (f32, f32)) -> f32 {
    let clamped = if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    };
    if clamped != value {
        log::warn!("[config] {name} {value} clamped to {clamped}");
    }
    clamped
}
