//! Cross-fading one point cloud into another.
//!
//! A transition snapshots the live buffers as "from", evaluates the target
//! pattern and palette as "to", then writes eased interpolations of the two
//! into the live buffers each tick. The snapshots themselves are never
//! modified. At most one transition is in flight: starting a new one first
//! commits the old one.

use crate::constants::FRAMES_PER_SECOND_REFERENCE;
use crate::palette::palette_for;
use crate::particles::{generate_positions, ParticleBuffer};
use crate::patterns::PatternKind;
use glam::Vec3;
use rand::Rng;

/// Symmetric cubic ease: `4t³` for the first half, `1 - (2 - 2t)³ / 2` after.
///
/// Input is clamped to `[0, 1]`.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Snapshot data for an in-flight transition.
#[derive(Clone, Debug)]
pub struct TransitionRecord {
    pub target: PatternKind,
    pub progress: f32,
    pub from_positions: Vec<Vec3>,
    pub to_positions: Vec<Vec3>,
    pub from_colors: Vec<Vec3>,
    pub to_colors: Vec<Vec3>,
}

impl TransitionRecord {
    fn lengths_match(&self, live: &ParticleBuffer) -> bool {
        let n = live.positions.len();
        self.from_positions.len() == n
            && self.to_positions.len() == n
            && self.from_colors.len() == live.colors.len()
            && self.to_colors.len() == live.colors.len()
    }
}

#[derive(Clone, Debug, Default)]
pub enum TransitionState {
    #[default]
    Stable,
    Transitioning(Box<TransitionRecord>),
}

impl TransitionState {
    #[inline]
    pub fn is_transitioning(&self) -> bool {
        matches!(self, TransitionState::Transitioning(_))
    }

    pub fn target(&self) -> Option<PatternKind> {
        match self {
            TransitionState::Transitioning(rec) => Some(rec.target),
            TransitionState::Stable => None,
        }
    }

    pub fn progress(&self) -> Option<f32> {
        match self {
            TransitionState::Transitioning(rec) => Some(rec.progress),
            TransitionState::Stable => None,
        }
    }
}

/// What a call to [`TransitionEngine::advance`] did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// No transition in flight.
    Idle,
    /// Buffers were interpolated with this eased factor.
    Progressed { eased: f32 },
    /// Progress reached 1 and the target pattern is now current.
    Completed(PatternKind),
    /// Snapshot lengths no longer matched the live buffers; the transition
    /// was force-completed.
    Aborted,
}

/// Current pattern plus the optional in-flight transition.
#[derive(Clone, Debug)]
pub struct TransitionEngine {
    current: PatternKind,
    state: TransitionState,
}

impl TransitionEngine {
    pub fn new(current: PatternKind) -> Self {
        Self {
            current,
            state: TransitionState::Stable,
        }
    }

    #[inline]
    pub fn current(&self) -> PatternKind {
        self.current
    }

    #[inline]
    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.state.is_transitioning()
    }

    /// Start morphing `live` toward `target`.
    ///
    /// An in-flight transition is committed first so transitions never overlap.
    pub fn begin<R: Rng + ?Sized>(
        &mut self,
        target: PatternKind,
        live: &mut ParticleBuffer,
        rng: &mut R,
    ) {
        if self.is_transitioning() {
            self.complete(live);
        }
        let count = live.len();
        let record = TransitionRecord {
            target,
            progress: 0.0,
            from_positions: live.positions.clone(),
            to_positions: generate_positions(target, count, rng),
            from_colors: live.colors.clone(),
            to_colors: vec![palette_for(target).primary(); count],
        };
        log::info!(
            "[transition] {} -> {} ({} particles)",
            self.current.name(),
            target.name(),
            count
        );
        self.state = TransitionState::Transitioning(Box::new(record));
    }

    /// Advance progress by `speed * dt * 60` and write the interpolated frame.
    pub fn advance(&mut self, live: &mut ParticleBuffer, dt_sec: f32, speed: f32) -> TickOutcome {
        let TransitionState::Transitioning(rec) = &mut self.state else {
            return TickOutcome::Idle;
        };

        rec.progress += speed * dt_sec * FRAMES_PER_SECOND_REFERENCE;
        if rec.progress >= 1.0 {
            rec.progress = 1.0;
            return match self.complete(live) {
                Some(target) => TickOutcome::Completed(target),
                None => TickOutcome::Aborted,
            };
        }

        if !rec.lengths_match(live) {
            log::error!(
                "[transition] snapshot length mismatch (live={}, from={}, to={}); forcing completion",
                live.len(),
                rec.from_positions.len(),
                rec.to_positions.len()
            );
            self.complete(live);
            return TickOutcome::Aborted;
        }

        let eased = ease_in_out_cubic(rec.progress);
        for (dst, (from, to)) in live
            .positions
            .iter_mut()
            .zip(rec.from_positions.iter().zip(&rec.to_positions))
        {
            *dst = from.lerp(*to, eased);
        }
        for (dst, (from, to)) in live
            .colors
            .iter_mut()
            .zip(rec.from_colors.iter().zip(&rec.to_colors))
        {
            *dst = from.lerp(*to, eased);
        }
        TickOutcome::Progressed { eased }
    }

    /// Commit the in-flight transition's "to" buffers immediately.
    ///
    /// Returns the new current pattern, or `None` when nothing was committed
    /// (no transition, or the snapshots no longer fit the live buffers). The
    /// record is discarded in every case.
    pub fn complete(&mut self, live: &mut ParticleBuffer) -> Option<PatternKind> {
        let TransitionState::Transitioning(rec) = std::mem::take(&mut self.state) else {
            return None;
        };
        let rec = *rec;
        if rec.to_positions.len() != live.positions.len()
            || rec.to_colors.len() != live.colors.len()
        {
            log::error!(
                "[transition] cannot commit {}: target buffers sized {} for {} live particles",
                rec.target.name(),
                rec.to_positions.len(),
                live.len()
            );
            return None;
        }
        live.positions = rec.to_positions;
        live.colors = rec.to_colors;
        self.current = rec.target;
        log::info!("[transition] now showing {}", self.current.name());
        Some(self.current)
    }
}
