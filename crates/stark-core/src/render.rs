//! Boundary between the core and whatever draws the particles.
//!
//! The core never talks to a graphics API. Each frame the controller hands a
//! [`RenderSink`] the live attribute buffers, the camera and the global
//! rendering parameters; the sink uploads and draws them however it likes.

use crate::camera::Camera;
use crate::constants::{
    BLOOM_RADIUS, BLOOM_STRENGTH, BLOOM_THRESHOLD, CHROMATIC_STRENGTH, DEFAULT_RESOLUTION,
};

/// Bloom and chromatic-aberration parameters for the post-processing chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostSettings {
    pub bloom_strength: f32,
    pub bloom_radius: f32,
    pub bloom_threshold: f32,
    pub chromatic_strength: f32,
    pub resolution: [u32; 2],
}

impl Default for PostSettings {
    fn default() -> Self {
        Self {
            bloom_strength: BLOOM_STRENGTH,
            bloom_radius: BLOOM_RADIUS,
            bloom_threshold: BLOOM_THRESHOLD,
            chromatic_strength: CHROMATIC_STRENGTH,
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl PostSettings {
    /// Width over height, falling back to 1 for a degenerate resolution.
    pub fn aspect(&self) -> f32 {
        let [w, h] = self.resolution;
        if w == 0 || h == 0 {
            1.0
        } else {
            w as f32 / h as f32
        }
    }
}

/// Everything a renderer needs for one frame, borrowed from the controller.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    /// `[x0, y0, z0, x1, ...]`
    pub positions: &'a [f32],
    /// `[r0, g0, b0, r1, ...]`
    pub colors: &'a [f32],
    pub sizes: &'a [f32],
    /// Global multiplier applied on top of the per-particle sizes.
    pub point_size: f32,
}

impl FrameView<'_> {
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.sizes.len()
    }
}

/// Receives per-frame output from [`Visualizer::render_into`](crate::Visualizer::render_into).
pub trait RenderSink {
    fn draw(&mut self, frame: FrameView<'_>, camera: &Camera, post: &PostSettings);
}
