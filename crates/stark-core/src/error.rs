use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VisualizerError {
    #[error("particle count must be at least 1, got {0}")]
    InvalidParticleCount(usize),
    #[error("{name} = {value} is outside {min}..={max}")]
    InvalidParameter {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

pub type Result<T> = std::result::Result<T, VisualizerError>;
