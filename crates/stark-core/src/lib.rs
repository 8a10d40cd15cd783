pub mod camera;
pub mod config;
pub mod constants;
pub mod controls;
pub mod error;
pub mod gesture;
pub mod idle;
pub mod palette;
pub mod particles;
pub mod patterns;
pub mod render;
pub mod transition;
pub mod visualizer;

pub use camera::*;
pub use config::VisualizerConfig;
pub use constants::*;
pub use controls::*;
pub use error::VisualizerError;
pub use gesture::*;
pub use idle::*;
pub use palette::*;
pub use particles::*;
pub use patterns::*;
pub use render::*;
pub use transition::*;
pub use visualizer::*;
