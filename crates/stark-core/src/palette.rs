//! Fixed color palettes, one selected per pattern.

use crate::patterns::PatternKind;
use glam::Vec3;

/// Ordered set of colors. Transitions only use the first entry today.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    hex: &'static [u32],
}

impl Palette {
    /// The color every particle takes when this palette is applied.
    #[inline]
    pub fn primary(&self) -> Vec3 {
        rgb_from_hex(self.hex[0])
    }

    pub fn colors(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.hex.iter().map(|&h| rgb_from_hex(h))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hex.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hex.is_empty()
    }
}

/// Decode a `0xRRGGBB` literal into linear 0..1 channels.
pub fn rgb_from_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

const BLUES: [u32; 3] = [0x3399ff, 0x44ccff, 0x0055cc];
const MAGENTAS: [u32; 4] = [0xff3399, 0xcc00ff, 0x660099, 0xaa33ff];
const GREENS: [u32; 4] = [0x33ff99, 0x33ff99, 0x99ff66, 0x008844];
const AMBERS: [u32; 4] = [0xff9933, 0xffcc33, 0xff6600, 0xffaa55];
const VIOLETS: [u32; 4] = [0x9933ff, 0xff66aa, 0xff0066, 0xcc0055];

pub const PALETTES: [Palette; 5] = [
    Palette { hex: &BLUES },
    Palette { hex: &MAGENTAS },
    Palette { hex: &GREENS },
    Palette { hex: &AMBERS },
    Palette { hex: &VIOLETS },
];

/// Palette used when transitioning into `pattern`; cycles through the table.
pub fn palette_for(pattern: PatternKind) -> &'static Palette {
    &PALETTES[pattern.index() % PALETTES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_decoding_splits_channels() {
        let c = rgb_from_hex(0xff8000);
        assert_eq!(c.x, 1.0);
        assert!((c.y - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.z, 0.0);
    }

    #[test]
    fn palettes_wrap_around_the_registry() {
        assert_eq!(palette_for(PatternKind::Cube), &PALETTES[0]);
        assert_eq!(palette_for(PatternKind::Vortex), &PALETTES[0]);
        assert_eq!(palette_for(PatternKind::FractalTree), &PALETTES[3]);
    }
}
