//! Hand-landmark interpretation.
//!
//! An external detector delivers a [`HandFrame`] per processed video frame.
//! [`GestureMapper`] turns those frames into camera targets and discrete
//! [`GestureEvent`]s:
//!
//! * Left hand: thumb-to-index pinch distance sets the zoom target.
//! * Right hand: roll of the wrist-to-middle-knuckle vector and wrist height,
//!   relative to where the hand was first seen, steer the orbit. The targets
//!   are offset from the current smoothed angles, so the offset sets a
//!   turning rate rather than a fixed position.
//! * Both hands: a close-then-separate motion of the index fingertips is a
//!   clap.
//!
//! Landmark coordinates are normalized image units with y growing downward.

use crate::camera::{map_range, wrap_angle, CameraRig};
use crate::constants::{
    CLAP_APPROACH_THRESHOLD, CLAP_COOLDOWN, CLAP_SEPARATION_THRESHOLD, INDEX_TIP, LANDMARK_COUNT,
    MAX_CAMERA_Z, MAX_PINCH_DIST, MAX_Y_ANGLE, MIDDLE_MCP, MIN_CAMERA_Z, MIN_HANDS_DISTANCE,
    MIN_PINCH_DIST, ROTATION_SENSITIVITY, THUMB_TIP, WRIST, Y_ROTATION_SENSITIVITY,
};
use glam::Vec3;
use instant::Instant;
use smallvec::SmallVec;
use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

/// One detected hand: its handedness label and its landmark points.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    pub handedness: Handedness,
    pub points: SmallVec<[Vec3; LANDMARK_COUNT]>,
}

impl HandLandmarks {
    pub fn new(handedness: Handedness, points: impl IntoIterator<Item = Vec3>) -> Self {
        Self {
            handedness,
            points: points.into_iter().collect(),
        }
    }

    #[inline]
    pub fn point(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    /// Screen-plane distance between thumb tip and index tip.
    pub fn pinch_distance(&self) -> Option<f32> {
        Some(planar_distance(self.point(THUMB_TIP)?, self.point(INDEX_TIP)?))
    }

    /// Roll of the wrist-to-middle-knuckle vector, offset by a quarter turn.
    /// Only differences between samples are meaningful.
    pub fn hand_angle(&self) -> Option<f32> {
        let wrist = self.point(WRIST)?;
        let knuckle = self.point(MIDDLE_MCP)?;
        Some((knuckle.y - wrist.y).atan2(knuckle.x - wrist.x) - FRAC_PI_2)
    }

    /// Wrist height in image units (grows downward).
    pub fn hand_height(&self) -> Option<f32> {
        self.point(WRIST).map(|w| w.y)
    }
}

/// Everything the detector reported for one video frame (zero to two hands).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandFrame {
    pub hands: SmallVec<[HandLandmarks; 2]>,
}

impl HandFrame {
    pub fn new(hands: impl IntoIterator<Item = HandLandmarks>) -> Self {
        Self {
            hands: hands.into_iter().collect(),
        }
    }

    pub fn hand(&self, handedness: Handedness) -> Option<&HandLandmarks> {
        self.hands.iter().find(|h| h.handedness == handedness)
    }

    #[inline]
    pub fn left(&self) -> Option<&HandLandmarks> {
        self.hand(Handedness::Left)
    }

    #[inline]
    pub fn right(&self) -> Option<&HandLandmarks> {
        self.hand(Handedness::Right)
    }
}

#[inline]
fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    a.truncate().distance(b.truncate())
}

/// Distance between the two index fingertips, if both are available.
pub fn hands_distance(left: &HandLandmarks, right: &HandLandmarks) -> Option<f32> {
    Some(planar_distance(left.point(INDEX_TIP)?, right.point(INDEX_TIP)?))
}

/// Camera distance target for a pinch distance.
pub fn zoom_for_pinch(pinch: f32) -> f32 {
    map_range(pinch, MIN_PINCH_DIST, MAX_PINCH_DIST, MIN_CAMERA_Z, MAX_CAMERA_Z)
        .clamp(MIN_CAMERA_Z, MAX_CAMERA_Z)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureEvent {
    /// Hands came together and separated again.
    Clap,
}

/// Three-phase clap recogniser: approach, close, separate.
///
/// Each phase must be observed in order. Hands drifting apart before they
/// were close clears progress without penalty. A recognised clap is ignored
/// while the cooldown since the previous one is running.
#[derive(Clone, Debug)]
pub struct ClapDetector {
    last_distance: f32,
    approaching: bool,
    was_close: bool,
    last_clap: Option<Instant>,
    cooldown: Duration,
}

impl Default for ClapDetector {
    fn default() -> Self {
        Self::new(CLAP_COOLDOWN)
    }
}

impl ClapDetector {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            last_distance: f32::INFINITY,
            approaching: false,
            was_close: false,
            last_clap: None,
            cooldown,
        }
    }

    /// Forget the current approach; called when either hand is missing.
    pub fn reset(&mut self) {
        self.last_distance = f32::INFINITY;
        self.approaching = false;
        self.was_close = false;
    }

    fn cooled_down(&self, now: Instant) -> bool {
        self.last_clap.map_or(true, |t| now > t + self.cooldown)
    }

    /// Feed one hand-to-hand distance sample. Returns `true` on a clap.
    pub fn observe(&mut self, distance: f32, now: Instant) -> bool {
        let last = self.last_distance;
        let mut clapped = false;

        if distance < last - CLAP_APPROACH_THRESHOLD {
            self.approaching = true;
        }
        if self.approaching && distance < MIN_HANDS_DISTANCE {
            self.was_close = true;
        }

        if self.approaching && self.was_close && distance > last + CLAP_SEPARATION_THRESHOLD {
            if self.cooled_down(now) {
                self.last_clap = Some(now);
                self.approaching = false;
                self.was_close = false;
                clapped = true;
            }
        } else if distance >= MIN_HANDS_DISTANCE {
            self.approaching = false;
            self.was_close = false;
        }

        self.last_distance = distance;
        clapped
    }
}

/// Right-hand pose captured when the hand is first seen.
#[derive(Clone, Copy, Debug)]
struct OrbitAnchor {
    hand_angle: f32,
    hand_height: f32,
}

#[derive(Clone, Debug, Default)]
pub struct GestureMapper {
    clap: ClapDetector,
    anchor: Option<OrbitAnchor>,
}

impl GestureMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the right hand is currently steering the orbit.
    #[inline]
    pub fn is_orbiting(&self) -> bool {
        self.anchor.is_some()
    }

    /// Interpret one detector frame.
    ///
    /// Writes the rig's targets and reads its smoothed angles; the smoothed
    /// values are only touched when the orbit hand is first acquired. Missing
    /// hands are not errors: the affected targets simply stop changing.
    pub fn handle(
        &mut self,
        frame: &HandFrame,
        rig: &mut CameraRig,
        now: Instant,
    ) -> Option<GestureEvent> {
        let left = frame.left();
        let right = frame.right();

        if let Some(pinch) = left.and_then(HandLandmarks::pinch_distance) {
            rig.target.distance = zoom_for_pinch(pinch);
        }

        match right.and_then(|h| Some((h.hand_angle()?, h.hand_height()?))) {
            Some((angle, height)) => self.steer_orbit(angle, height, rig),
            None => {
                if self.anchor.take().is_some() {
                    log::debug!("[gesture] orbit hand lost; baseline cleared");
                }
            }
        }

        let distance = match (left, right) {
            (Some(l), Some(r)) => hands_distance(l, r),
            _ => None,
        };
        match distance {
            Some(d) if self.clap.observe(d, now) => {
                log::info!("[gesture] clap detected");
                Some(GestureEvent::Clap)
            }
            Some(_) => None,
            None => {
                self.clap.reset();
                None
            }
        }
    }

    /// Roll and lift away from the acquisition pose push the orbit targets
    /// away from the current smoothed angles, so a held pose keeps the
    /// camera turning at a steady rate.
    fn steer_orbit(&mut self, angle: f32, height: f32, rig: &mut CameraRig) {
        let anchor = *self.anchor.get_or_insert_with(|| {
            log::debug!("[gesture] orbit hand acquired at angle {angle:.3}");
            rig.settle_angles();
            OrbitAnchor {
                hand_angle: angle,
                hand_height: height,
            }
        });
        let roll = wrap_angle(angle - anchor.hand_angle);
        // image y grows downward, so raising the hand is a negative delta
        let lift = anchor.hand_height - height;
        rig.target.angle_x = wrap_angle(rig.angle_x() - roll * ROTATION_SENSITIVITY);
        rig.target.angle_y =
            (rig.angle_y() + lift * Y_ROTATION_SENSITIVITY).clamp(-MAX_Y_ANGLE, MAX_Y_ANGLE);
    }
}
