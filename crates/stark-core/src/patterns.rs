//! Procedural point-cloud generators.
//!
//! Every pattern maps a particle index `i` in `[0, count)` to a point in world
//! space. Most patterns are pure functions of `(i, count)`. The stochastic
//! ones (see [`PatternKind::is_stochastic`]) draw jitter from the random
//! source handed to [`PatternKind::generate`], so seeding that source makes
//! them reproducible as well.

use glam::Vec3;
use rand::Rng;
use smallvec::{smallvec, SmallVec};
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::f64::consts::TAU as TAU_F64;
use std::sync::OnceLock;

const SQRT_5: f64 = 2.236_067_977_499_79;
const GOLDEN_STEP: f64 = 1.0 + SQRT_5; // angular step used for golden-angle spirals

/// Sizes of the contiguous sub-populations a pattern splits `[0, count)` into.
pub type Partition = SmallVec<[usize; 8]>;

/// Registry of the available patterns, in advance order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Cube,
    Sphere,
    Spiral,
    Helix,
    Torus,
    Vortex,
    Galaxy,
    Wave,
    Mobius,
    Supernova,
    KleinBottle,
    Flower,
    Voronoi,
    FractalTree,
}

impl PatternKind {
    pub const ALL: [PatternKind; 14] = [
        PatternKind::Cube,
        PatternKind::Sphere,
        PatternKind::Spiral,
        PatternKind::Helix,
        PatternKind::Torus,
        PatternKind::Vortex,
        PatternKind::Galaxy,
        PatternKind::Wave,
        PatternKind::Mobius,
        PatternKind::Supernova,
        PatternKind::KleinBottle,
        PatternKind::Flower,
        PatternKind::Voronoi,
        PatternKind::FractalTree,
    ];

    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The pattern after this one, wrapping back to the first.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    /// Human-readable name shown when the pattern becomes active.
    pub fn name(self) -> &'static str {
        match self {
            PatternKind::Cube => "Cube",
            PatternKind::Sphere => "Sphere",
            PatternKind::Spiral => "Spiral",
            PatternKind::Helix => "Helix",
            PatternKind::Torus => "Torus",
            PatternKind::Vortex => "Vortex",
            PatternKind::Galaxy => "Galaxy",
            PatternKind::Wave => "Wave",
            PatternKind::Mobius => "Möbius",
            PatternKind::Supernova => "Supernova",
            PatternKind::KleinBottle => "Klein Bottle",
            PatternKind::Flower => "Flower",
            PatternKind::Voronoi => "Voronoi",
            PatternKind::FractalTree => "Fractal Tree",
        }
    }

    /// Case-insensitive lookup by display name. "grid" is accepted for the cube.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim();
        if wanted.eq_ignore_ascii_case("grid") {
            return Some(PatternKind::Cube);
        }
        if wanted.eq_ignore_ascii_case("mobius") {
            return Some(PatternKind::Mobius);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
    }

    /// Whether `generate` consumes entropy from the random source.
    pub fn is_stochastic(self) -> bool {
        matches!(
            self,
            PatternKind::Vortex
                | PatternKind::Galaxy
                | PatternKind::Supernova
                | PatternKind::Flower
                | PatternKind::Voronoi
                | PatternKind::FractalTree
        )
    }

    /// Position of particle `i` out of `count`.
    ///
    /// Deterministic patterns never touch `rng`. `count` of zero is treated
    /// as one so the result is always finite.
    pub fn generate<R: Rng + ?Sized>(self, i: usize, count: usize, rng: &mut R) -> Vec3 {
        let count = count.max(1);
        match self {
            PatternKind::Cube => cube(i, count),
            PatternKind::Sphere => sphere(i, count),
            PatternKind::Spiral => spiral(i, count),
            PatternKind::Helix => helix(i, count),
            PatternKind::Torus => torus(i, count),
            PatternKind::Vortex => vortex(i, count, rng),
            PatternKind::Galaxy => galaxy(i, count, rng),
            PatternKind::Wave => wave(i, count),
            PatternKind::Mobius => mobius(i, count),
            PatternKind::Supernova => supernova(i, count, rng),
            PatternKind::KleinBottle => klein_bottle(i, count),
            PatternKind::Flower => flower(i, count, rng),
            PatternKind::Voronoi => voronoi(i, count, rng),
            PatternKind::FractalTree => fractal_tree(i, count, rng),
        }
    }

    /// Contiguous sub-population sizes; always sums to `count`.
    ///
    /// Patterns without a population split report a single population.
    pub fn partition(self, count: usize) -> Partition {
        match self {
            PatternKind::Supernova => {
                let core = supernova_core_count(count);
                smallvec![core, count - core]
            }
            PatternKind::Flower => {
                let center = flower_center_count(count);
                smallvec![center, count - center]
            }
            PatternKind::Voronoi => {
                let sites = voronoi_site_count(count);
                smallvec![sites, count - sites]
            }
            PatternKind::FractalTree => tree_level_counts(count).iter().copied().collect(),
            _ => smallvec![count],
        }
    }

    /// Which sub-population of [`partition`](Self::partition) index `i` falls in.
    pub fn population_of(self, i: usize, count: usize) -> usize {
        let parts = self.partition(count);
        let mut start = 0;
        for (p, size) in parts.iter().enumerate() {
            if i < start + size {
                return p;
            }
            start += size;
        }
        parts.len().saturating_sub(1)
    }
}

// ---------------- shared helpers ----------------

#[inline]
fn signed_unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>() * 2.0 - 1.0
}

/// Angle `TAU * frac(i * step)`; equal to `TAU * i * step` modulo a full turn
/// but stays precise for large indices.
#[inline]
fn stepped_angle(i: usize, step: f64) -> f32 {
    ((i as f64 * step).fract() * TAU_F64) as f32
}

#[inline]
fn on_sphere(phi: f32, theta: f32, radius: f32) -> Vec3 {
    Vec3::new(
        phi.sin() * theta.cos() * radius,
        phi.sin() * theta.sin() * radius,
        phi.cos() * radius,
    )
}

// ---------------- deterministic patterns ----------------

fn cube(i: usize, count: usize) -> Vec3 {
    const EXTENT: f32 = 60.0;
    let side = ((count as f64).cbrt().ceil() as f32).max(1.0);
    let spacing = EXTENT / side;
    let half = (side - 1.0) * spacing / 2.0;

    let per_face = (count / 6).max(1);
    let face = (i / per_face) % 6;
    let on_face = i % per_face;

    let cols = ((per_face as f64).sqrt().ceil() as usize).max(1);
    let denom = if cols > 1 { (cols - 1) as f32 } else { 1.0 };
    let rx = (on_face % cols) as f32 / denom;
    let ry = (on_face / cols) as f32 / denom;

    let span = spacing * (side - 1.0);
    let x = rx * span - half;
    let y = ry * span - half;

    match face {
        0 => Vec3::new(x, y, half),
        1 => Vec3::new(x, y, -half),
        2 => Vec3::new(x, half, y),
        3 => Vec3::new(x, -half, y),
        4 => Vec3::new(half, x, y),
        _ => Vec3::new(-half, x, y),
    }
}

fn sphere(i: usize, count: usize) -> Vec3 {
    const RADIUS: f32 = 30.0;
    let t = i as f32 / count as f32;
    let phi = (2.0 * t - 1.0).clamp(-1.0, 1.0).acos();
    let theta = TAU * t * (count as f32).sqrt();
    on_sphere(phi, theta, RADIUS)
}

fn spiral(i: usize, count: usize) -> Vec3 {
    const ARMS: usize = 3;
    const TURN: f32 = 15.0;
    const RADIUS: f32 = 40.0;
    let t = i as f32 / count as f32;
    let arm_offset = (TAU / ARMS as f32) * (i % ARMS) as f32;
    let angle = t.powf(0.7) * TURN + arm_offset;
    let radius = t * RADIUS;
    Vec3::new(angle.cos() * radius, angle.sin() * radius, 0.0)
}

fn helix(i: usize, count: usize) -> Vec3 {
    const STRANDS: usize = 2;
    const RADIUS: f32 = 15.0;
    const HEIGHT: f32 = 60.0;
    let per_strand = (count / STRANDS).max(1);
    let t = (i / STRANDS) as f32 / per_strand as f32;
    let angle = t * PI * 10.0 + (i % STRANDS) as f32 * PI;
    Vec3::new(
        angle.cos() * RADIUS,
        angle.sin() * RADIUS,
        (t - 0.5) * HEIGHT,
    )
}

fn torus(i: usize, count: usize) -> Vec3 {
    const MAJOR: f32 = 30.0;
    const MINOR: f32 = 10.0;
    let u = (i as f32 / count as f32) * TAU;
    let v = stepped_angle(i, SQRT_5);
    Vec3::new(
        (MAJOR + MINOR * v.cos()) * u.cos(),
        (MAJOR + MINOR * v.cos()) * u.sin(),
        MINOR * v.sin(),
    )
}

fn wave(i: usize, count: usize) -> Vec3 {
    const WIDTH: f32 = 60.0;
    const DEPTH: f32 = 60.0;
    const HEIGHT: f32 = 10.0;
    const DENSITY: f32 = 0.1;
    let grid = ((count as f64).sqrt().ceil() as usize).max(1);
    let x = (i % grid) as f32 * (WIDTH / grid as f32) - WIDTH / 2.0;
    let z = (i / grid) as f32 * (DEPTH / grid as f32) - DEPTH / 2.0;
    let y = (x * DENSITY).sin() * (z * DENSITY).cos() * HEIGHT
        + (x * DENSITY * 2.5).sin() * (z * DENSITY * 2.1).cos() * (HEIGHT * 0.3);
    Vec3::new(x, y, z)
}

fn mobius(i: usize, count: usize) -> Vec3 {
    const RADIUS: f32 = 25.0;
    const WIDTH: f32 = 10.0;
    let length_steps = (count as f32).sqrt();
    let width_steps = count as f32 / length_steps;
    let along = (i as f32) % length_steps;
    let across = (i as f32 / length_steps).floor() % width_steps;

    let theta = (along / length_steps) * TAU;
    let v = across / width_steps - 0.5;
    let r = RADIUS + WIDTH * v * (theta / 2.0).cos();
    Vec3::new(
        r * theta.cos(),
        r * theta.sin(),
        WIDTH * v * (theta / 2.0).sin(),
    )
}

fn klein_bottle(i: usize, count: usize) -> Vec3 {
    const A: f32 = 15.0;
    const B: f32 = 4.0;
    const SCALE: f32 = 2.5;
    let length_steps = ((count as f64 * 0.5).sqrt().ceil() as usize).max(1);
    let circ_steps = count.div_ceil(length_steps).max(1);
    let u = ((i % length_steps) as f32 / length_steps as f32) * TAU;
    let v = (((i / length_steps) % circ_steps) as f32 / circ_steps as f32) * TAU;

    let p = if u < PI {
        Vec3::new(
            A * (1.0 - u.cos() / 2.0) * v.cos() - B * u.sin() / 2.0,
            A * (1.0 - u.cos() / 2.0) * v.sin(),
            A * u.sin() / 2.0 + B * u.sin() * v.cos(),
        )
    } else {
        Vec3::new(
            A * (1.0 + u.cos() / 2.0) * v.cos() + B * u.sin() / 2.0,
            A * (1.0 + u.cos() / 2.0) * v.sin(),
            -A * u.sin() / 2.0 + B * u.sin() * v.cos(),
        )
    };
    p * SCALE
}

// ---------------- stochastic patterns ----------------

fn vortex<R: Rng + ?Sized>(i: usize, count: usize, rng: &mut R) -> Vec3 {
    const HEIGHT: f32 = 60.0;
    const MAX_RADIUS: f32 = 35.0;
    const MIN_RADIUS: f32 = 5.0;
    const ROTATIONS: f32 = 3.0;
    let h = i as f32 / count as f32 + 0.05 * rng.gen::<f32>();
    let radius = MIN_RADIUS + (MAX_RADIUS - MIN_RADIUS) * h;
    let twist = ((i as f64 * 0.1) % TAU_F64) as f32;
    let angle = ROTATIONS * TAU * (1.0 - h) + twist;
    Vec3::new(angle.cos() * radius, (h - 0.5) * HEIGHT, angle.sin() * radius)
}

fn galaxy<R: Rng + ?Sized>(i: usize, count: usize, rng: &mut R) -> Vec3 {
    const ARMS: usize = 4;
    const ARM_WIDTH: f32 = 0.15;
    const MAX_RADIUS: f32 = 40.0;
    const THICKNESS: f32 = 5.0;
    const TWIST: f32 = 2.5;
    let per_arm = (count / ARMS).max(1);
    let along = (i / ARMS) as f32 / per_arm as f32;
    let radial = along * MAX_RADIUS;

    let arm_offset = (TAU / ARMS as f32) * (i % ARMS) as f32;
    let angle = arm_offset + TWIST * along + signed_unit(rng) * ARM_WIDTH;
    let y = signed_unit(rng) * THICKNESS * (1.0 - along * 0.8);
    Vec3::new(angle.cos() * radial, y, angle.sin() * radial)
}

fn supernova_core_count(count: usize) -> usize {
    count * 20 / 100
}

fn supernova<R: Rng + ?Sized>(i: usize, count: usize, rng: &mut R) -> Vec3 {
    const MAX_RADIUS: f32 = 40.0;
    const CORE_EXTENT: f32 = 0.3; // normalized radius separating core and shell
    const SHELL_FALLOFF: f32 = 0.7;
    let t = i as f32 / count as f32;
    let phi = (1.0 - 2.0 * t).clamp(-1.0, 1.0).acos();
    let theta = stepped_angle(i, GOLDEN_STEP);

    let draw = rng.gen::<f32>();
    let normalized = if i < supernova_core_count(count) {
        draw.sqrt() * CORE_EXTENT
    } else {
        CORE_EXTENT + draw.powf(SHELL_FALLOFF) * (1.0 - CORE_EXTENT)
    };
    on_sphere(phi, theta, normalized * MAX_RADIUS)
}

fn flower_center_count(count: usize) -> usize {
    count * 30 / 100
}

fn flower<R: Rng + ?Sized>(i: usize, count: usize, rng: &mut R) -> Vec3 {
    const PETALS: usize = 12;
    const PETAL_LENGTH: f32 = 25.0;
    const CENTER_RADIUS: f32 = 10.0;
    const PETAL_WIDTH: f32 = 0.3;
    const PETAL_CURVE: f32 = 0.6;

    let center = flower_center_count(count);
    if i < center {
        let t = i as f32 / center as f32;
        let phi = (2.0 * t - 1.0).clamp(-1.0, 1.0).acos();
        return on_sphere(phi, stepped_angle(i, GOLDEN_STEP), CENTER_RADIUS);
    }

    let petal_index = i - center;
    let per_petal = ((count - center) / PETALS).max(1);
    let along = (petal_index / PETALS) as f32 / per_petal as f32;
    let petal_angle = ((petal_index % PETALS) as f32 / PETALS as f32) * TAU;

    let radial_t = along.powf(0.7);
    let dist = CENTER_RADIUS + PETAL_LENGTH * radial_t;
    let width = PETAL_WIDTH * (1.0 - radial_t * 0.7);
    let sideways = signed_unit(rng) * width * PETAL_LENGTH;
    let curve = PETAL_CURVE * (along * PI).sin();

    Vec3::new(
        petal_angle.cos() * dist + (petal_angle + FRAC_PI_2).cos() * sideways,
        petal_angle.sin() * dist + (petal_angle + FRAC_PI_2).sin() * sideways,
        curve * PETAL_LENGTH * (1.0 - (along * PI).cos()),
    )
}

pub const TREE_MAX_DEPTH: usize = 6;
const TREE_BRANCH_RATIO: f64 = 0.67;

/// Particles per recursion depth, weighted by `2^d * ratio^d`.
///
/// Each level gets the floor of its weighted share; whatever the floors
/// leave over goes to the deepest level, so the levels cover `count`
/// exactly.
pub fn tree_level_counts(count: usize) -> [usize; TREE_MAX_DEPTH + 1] {
    let weights: [f64; TREE_MAX_DEPTH + 1] =
        std::array::from_fn(|d| (2.0 * TREE_BRANCH_RATIO).powi(d as i32));
    let total: f64 = weights.iter().sum();

    let mut counts = weights.map(|w| (w / total * count as f64).floor() as usize);
    let assigned: usize = counts.iter().sum();
    counts[TREE_MAX_DEPTH] += count.saturating_sub(assigned);
    counts
}

fn fractal_tree<R: Rng + ?Sized>(i: usize, count: usize, rng: &mut R) -> Vec3 {
    const TRUNK_LENGTH: f32 = 35.0;
    const BRANCH_ANGLE: f32 = PI / 5.0;
    const TRUNK_SPREAD: f32 = 0.5;

    let levels = tree_level_counts(count);
    let mut depth = 0;
    let mut level_start = 0;
    while depth < TREE_MAX_DEPTH && i >= level_start + levels[depth] {
        level_start += levels[depth];
        depth += 1;
    }
    let t = (i - level_start) as f32 / levels[depth].max(1) as f32;

    if depth == 0 {
        return Vec3::new(
            signed_unit(rng) * TRUNK_SPREAD,
            -TRUNK_LENGTH / 2.0 + t * TRUNK_LENGTH,
            signed_unit(rng) * TRUNK_SPREAD,
        );
    }

    let branches = 1usize << depth;
    let scaled = t * branches as f32;
    let branch = (scaled.floor() as usize) % branches;
    let partial = scaled.fract();

    // Walk from the top of the trunk, one bit of `branch` per level, most
    // significant bit first.
    let mut x = 0.0f32;
    let mut y = TRUNK_LENGTH / 2.0;
    let mut length = TRUNK_LENGTH;
    let mut heading = 0.0f32;
    for d in 1..=depth {
        length *= TREE_BRANCH_RATIO as f32;
        let left = (branch >> (depth - d)) & 1 == 0;
        heading += if left { BRANCH_ANGLE } else { -BRANCH_ANGLE };
        let step = if d < depth { length } else { length * partial };
        x += heading.sin() * step;
        y += heading.cos() * step;
    }

    let spread = 0.8 * (1.0 - (TREE_BRANCH_RATIO as f32).powi(depth as i32));
    x += signed_unit(rng) * spread;
    let z = signed_unit(rng) * spread;
    Vec3::new(x, y, z)
}

const VORONOI_RADIUS: f32 = 30.0;
pub const VORONOI_SITES: usize = 25;
const VORONOI_THICKNESS: f32 = 2.5;
const VORONOI_JITTER: f32 = 0.5;
const VORONOI_RELAX_ATTEMPTS: usize = 4;

fn voronoi_site_count(count: usize) -> usize {
    VORONOI_SITES.min(count / 10)
}

/// Fixed cell centres on the sphere, from a trigonometric hash of the site index.
pub fn voronoi_sites() -> &'static [Vec3; VORONOI_SITES] {
    static SITES: OnceLock<[Vec3; VORONOI_SITES]> = OnceLock::new();
    SITES.get_or_init(|| {
        std::array::from_fn(|s| {
            let s = s as f64;
            let h1 = ((s * 42.5).sin() * 10_000.0).rem_euclid(1.0);
            let h2 = ((s * 15.3).cos() * 10_000.0).rem_euclid(1.0);
            let theta = (TAU_F64 * h1) as f32;
            let phi = ((2.0 * h2 - 1.0).clamp(-1.0, 1.0) as f32).acos();
            on_sphere(phi, theta, VORONOI_RADIUS)
        })
    })
}

fn jitter<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(signed_unit(rng), signed_unit(rng), signed_unit(rng)) * VORONOI_JITTER
}

fn two_nearest(point: Vec3, sites: &[Vec3]) -> ((f32, Vec3), (f32, Vec3)) {
    let mut first = (f32::INFINITY, sites[0]);
    let mut second = (f32::INFINITY, sites[0]);
    for &site in sites {
        let d = point.distance(site);
        if d < first.0 {
            second = first;
            first = (d, site);
        } else if d < second.0 {
            second = (d, site);
        }
    }
    (first, second)
}

fn voronoi<R: Rng + ?Sized>(i: usize, count: usize, rng: &mut R) -> Vec3 {
    let sites = voronoi_sites();
    if i < voronoi_site_count(count) {
        return sites[i % VORONOI_SITES] + jitter(rng);
    }

    let theta = TAU * rng.gen::<f32>();
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
    let mut point = on_sphere(phi, theta, VORONOI_RADIUS);

    // Best-effort relaxation toward the bisector of the two nearest sites;
    // not guaranteed to land on an exact cell edge.
    for _ in 0..VORONOI_RELAX_ATTEMPTS {
        let ((d1, s1), (d2, s2)) = two_nearest(point, sites);
        let gap = (d1 - d2).abs();
        if gap < VORONOI_THICKNESS {
            return (point + jitter(rng)).normalize_or_zero() * VORONOI_RADIUS;
        }
        let toward = ((s1 + s2) * 0.5 - point).normalize_or_zero();
        point += toward * gap * 0.7 + jitter(rng);
        point = point.normalize_or_zero() * VORONOI_RADIUS;
    }
    point
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepped_angle_stays_in_one_turn() {
        for i in [0usize, 1, 17, 10_000, 1_000_000] {
            let a = stepped_angle(i, SQRT_5);
            assert!((0.0..TAU).contains(&a), "angle {a} out of range for i={i}");
        }
    }

    #[test]
    fn tree_levels_grow_toward_the_crown() {
        let levels = tree_level_counts(10_000);
        assert_eq!(levels.iter().sum::<usize>(), 10_000);
        assert!(levels[TREE_MAX_DEPTH] > levels[0]);
    }

    #[test]
    fn voronoi_sites_lie_on_the_sphere() {
        for site in voronoi_sites() {
            assert!((site.length() - VORONOI_RADIUS).abs() < 1e-3);
        }
    }
}
