//! Orbit camera driven by smoothed gesture targets.
//!
//! Gesture handling writes [`CameraRig::target`] and reads the smoothed
//! angles; the per-frame [`CameraRig::step`] advances the smoothed values.
//! The only other write to them is [`CameraRig::settle_angles`] when an orbit
//! gesture starts. The camera always looks at
//! the origin from a point given in spherical coordinates
//! `(distance, horizontal angle, vertical angle)`.

use crate::constants::{
    CAMERA_FOVY_DEGREES, CAMERA_ZFAR, CAMERA_ZNEAR, INITIAL_CAMERA_Z, MAX_CAMERA_Z, MAX_Y_ANGLE,
    MIN_CAMERA_Z, ROTATION_SMOOTHING, ZOOM_SMOOTHING,
};
use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Linearly remap `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// The input is clamped to its domain first, so the result never
/// extrapolates. A degenerate input range maps everything to `out_min`.
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if in_max == in_min {
        return out_min;
    }
    let (lo, hi) = if in_min < in_max {
        (in_min, in_max)
    } else {
        (in_max, in_min)
    };
    let ratio = (value.clamp(lo, hi) - in_min) / (in_max - in_min);
    out_min + ratio * (out_max - out_min)
}

/// Normalize an angle to `(-π, π]`. Non-finite input maps to 0.
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Point on a sphere of radius `distance` around the origin.
///
/// `angle_x` rotates about the vertical axis starting from +Z; `angle_y`
/// tilts toward +Y.
pub fn spherical_to_cartesian(distance: f32, angle_x: f32, angle_y: f32) -> Vec3 {
    Vec3::new(
        angle_x.sin() * angle_y.cos() * distance,
        angle_y.sin() * distance,
        angle_x.cos() * angle_y.cos() * distance,
    )
}

/// Values the smoothed camera chases.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTargets {
    pub distance: f32,
    pub angle_x: f32,
    pub angle_y: f32,
}

impl Default for CameraTargets {
    fn default() -> Self {
        Self {
            distance: INITIAL_CAMERA_Z,
            angle_x: 0.0,
            angle_y: 0.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CameraRig {
    pub target: CameraTargets,
    distance: f32,
    angle_x: f32,
    angle_y: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraRig {
    pub fn new() -> Self {
        let target = CameraTargets::default();
        Self {
            target,
            distance: target.distance,
            angle_x: target.angle_x,
            angle_y: target.angle_y,
        }
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    #[inline]
    pub fn angle_x(&self) -> f32 {
        self.angle_x
    }

    #[inline]
    pub fn angle_y(&self) -> f32 {
        self.angle_y
    }

    /// Snap the smoothed orbit angles onto their targets.
    ///
    /// Called when an orbit gesture starts so that steering begins from
    /// wherever the camera was headed. Distance is left alone.
    pub fn settle_angles(&mut self) {
        self.angle_x = self.target.angle_x;
        self.angle_y = self.target.angle_y;
    }

    /// Move the smoothed values one frame toward their targets.
    ///
    /// Horizontal smoothing takes the short way round the circle; the result
    /// stays in `(-π, π]`. Vertical angle and distance are clamped.
    pub fn step(&mut self) {
        self.distance += (self.target.distance - self.distance) * ZOOM_SMOOTHING;
        self.distance = self.distance.clamp(MIN_CAMERA_Z, MAX_CAMERA_Z);

        let dx = wrap_angle(self.target.angle_x - self.angle_x);
        self.angle_x = wrap_angle(self.angle_x + dx * ROTATION_SMOOTHING);

        self.angle_y += (self.target.angle_y - self.angle_y) * ROTATION_SMOOTHING;
        self.angle_y = self.angle_y.clamp(-MAX_Y_ANGLE, MAX_Y_ANGLE);
    }

    /// Eye position for the current smoothed values.
    pub fn eye(&self) -> Vec3 {
        spherical_to_cartesian(self.distance, self.angle_x, self.angle_y)
    }

    /// Camera aimed at the origin for a viewport of the given aspect ratio.
    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}
