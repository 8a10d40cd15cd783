//! Live per-particle attribute buffers.

use crate::constants::BASE_PARTICLE_SIZE;
use crate::patterns::PatternKind;
use glam::Vec3;
use rand::Rng;

/// Positions, colors and base sizes for a fixed number of particles.
///
/// All three attributes always hold exactly `len()` entries. Renderers that
/// want flat `f32` arrays use [`positions_flat`](Self::positions_flat) and
/// [`colors_flat`](Self::colors_flat), which reinterpret the storage in place.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleBuffer {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub sizes: Vec<f32>,
}

impl ParticleBuffer {
    /// A buffer laid out as `pattern` with every particle in `color`.
    pub fn from_pattern<R: Rng + ?Sized>(
        pattern: PatternKind,
        count: usize,
        color: Vec3,
        rng: &mut R,
    ) -> Self {
        Self {
            positions: generate_positions(pattern, count, rng),
            colors: vec![color; count],
            sizes: vec![BASE_PARTICLE_SIZE; count],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Whether every attribute has the same length.
    pub fn is_consistent(&self) -> bool {
        self.colors.len() == self.positions.len() && self.sizes.len() == self.positions.len()
    }

    /// Positions as `[x0, y0, z0, x1, ...]`.
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colors as `[r0, g0, b0, r1, ...]`.
    pub fn colors_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }
}

/// Evaluate `pattern` for every index in `[0, count)`.
pub fn generate_positions<R: Rng + ?Sized>(
    pattern: PatternKind,
    count: usize,
    rng: &mut R,
) -> Vec<Vec3> {
    (0..count).map(|i| pattern.generate(i, count, rng)).collect()
}
