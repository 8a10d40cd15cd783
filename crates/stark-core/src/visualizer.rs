//! The controller that owns every piece of mutable visualizer state.
//!
//! Two producers drive it: the host's frame callback ([`Visualizer::tick`])
//! and the hand detector ([`Visualizer::handle_hands`]). Either can call in
//! directly, or both can be funnelled through [`Visualizer::apply`] from one
//! channel. Gesture handling writes camera targets and may queue a pattern
//! change; the tick owns the particle buffers and advances the smoothed
//! camera values.

use crate::camera::CameraRig;
use crate::config::{clamp_logged, VisualizerConfig};
use crate::constants::{IDLE_INTENSITY_RANGE, PARTICLE_SIZE_RANGE, TRANSITION_SPEED_RANGE};
use crate::controls::Control;
use crate::error::Result;
use crate::gesture::{GestureEvent, GestureMapper, HandFrame};
use crate::idle::apply_idle_drift;
use crate::palette::palette_for;
use crate::particles::ParticleBuffer;
use crate::patterns::PatternKind;
use crate::render::{FrameView, PostSettings, RenderSink};
use crate::transition::{TickOutcome, TransitionEngine};
use instant::Instant;
use rand::prelude::*;

/// One unit of work for [`Visualizer::apply`].
#[derive(Clone, Debug)]
pub enum Command {
    Tick { dt_sec: f32 },
    Hands { frame: HandFrame, at: Instant },
    Control(Control),
}

pub struct Visualizer {
    particles: ParticleBuffer,
    transition: TransitionEngine,
    camera: CameraRig,
    gestures: GestureMapper,
    rng: StdRng,
    transition_speed: f32,
    idle_intensity: f32,
    particle_size: f32,
    post: PostSettings,
    elapsed_sec: f32,
    advance_queued: bool,
}

impl Visualizer {
    /// Validate `config` and lay out the first pattern.
    pub fn new(config: VisualizerConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let initial = PatternKind::ALL[0];
        let particles = ParticleBuffer::from_pattern(
            initial,
            config.particle_count,
            palette_for(initial).primary(),
            &mut rng,
        );
        log::info!(
            "[visualizer] {} particles, starting with {}",
            config.particle_count,
            initial.name()
        );
        Ok(Self {
            particles,
            transition: TransitionEngine::new(initial),
            camera: CameraRig::new(),
            gestures: GestureMapper::new(),
            rng,
            transition_speed: config.transition_speed,
            idle_intensity: config.idle_intensity,
            particle_size: config.particle_size,
            post: config.post,
            elapsed_sec: 0.0,
            advance_queued: false,
        })
    }

    #[inline]
    pub fn particles(&self) -> &ParticleBuffer {
        &self.particles
    }

    #[inline]
    pub fn transition(&self) -> &TransitionEngine {
        &self.transition
    }

    #[inline]
    pub fn current_pattern(&self) -> PatternKind {
        self.transition.current()
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_transitioning()
    }

    #[inline]
    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    #[inline]
    pub fn gestures(&self) -> &GestureMapper {
        &self.gestures
    }

    #[inline]
    pub fn transition_speed(&self) -> f32 {
        self.transition_speed
    }

    #[inline]
    pub fn idle_intensity(&self) -> f32 {
        self.idle_intensity
    }

    #[inline]
    pub fn particle_size(&self) -> f32 {
        self.particle_size
    }

    #[inline]
    pub fn post(&self) -> &PostSettings {
        &self.post
    }

    /// Seconds of simulated time accumulated by [`tick`](Self::tick).
    #[inline]
    pub fn elapsed_sec(&self) -> f32 {
        self.elapsed_sec
    }

    /// Whether a clap has queued a pattern change for the next tick.
    #[inline]
    pub fn advance_queued(&self) -> bool {
        self.advance_queued
    }

    /// Advance one frame.
    ///
    /// A queued pattern change starts first. Then the running transition
    /// advances, or idle drift applies if none is running, and finally the
    /// camera eases toward its targets. Negative or non-finite `dt_sec` is
    /// treated as zero.
    pub fn tick(&mut self, dt_sec: f32) -> TickOutcome {
        let dt = if dt_sec.is_finite() { dt_sec.max(0.0) } else { 0.0 };
        if std::mem::take(&mut self.advance_queued) {
            self.advance_pattern();
        }
        self.elapsed_sec += dt;

        let outcome = if self.transition.is_transitioning() {
            self.transition
                .advance(&mut self.particles, dt, self.transition_speed)
        } else {
            apply_idle_drift(
                &mut self.particles.positions,
                self.elapsed_sec,
                dt,
                self.idle_intensity,
            );
            TickOutcome::Idle
        };

        self.camera.step();
        outcome
    }

    /// Interpret one detector frame; a clap queues a pattern change.
    pub fn handle_hands(&mut self, frame: &HandFrame, now: Instant) -> Option<GestureEvent> {
        let event = self.gestures.handle(frame, &mut self.camera, now);
        if event == Some(GestureEvent::Clap) {
            self.advance_queued = true;
        }
        event
    }

    /// Commit any running transition, then start one to the pattern after
    /// the current one in registry order.
    pub fn advance_pattern(&mut self) {
        self.transition.complete(&mut self.particles);
        self.begin_transition(self.transition.current().next());
    }

    /// Start a transition to `target`, committing any running one first.
    pub fn begin_transition(&mut self, target: PatternKind) {
        self.transition
            .begin(target, &mut self.particles, &mut self.rng);
    }

    pub fn set_transition_speed(&mut self, speed: f32) {
        self.transition_speed = clamp_logged("transition_speed", speed, TRANSITION_SPEED_RANGE);
    }

    pub fn set_idle_intensity(&mut self, intensity: f32) {
        self.idle_intensity = clamp_logged("idle_intensity", intensity, IDLE_INTENSITY_RANGE);
    }

    pub fn set_particle_size(&mut self, size: f32) {
        self.particle_size = clamp_logged("particle_size", size, PARTICLE_SIZE_RANGE);
    }

    pub fn set_post(&mut self, post: PostSettings) {
        self.post = post;
    }

    pub fn control(&mut self, control: Control) {
        match control {
            Control::NextPattern => self.advance_pattern(),
            Control::GoTo(pattern) => self.begin_transition(pattern),
            Control::SetTransitionSpeed(v) => self.set_transition_speed(v),
            Control::SetIdleIntensity(v) => self.set_idle_intensity(v),
            Control::SetParticleSize(v) => self.set_particle_size(v),
            Control::ScaleTransitionSpeed(f) => {
                self.set_transition_speed(self.transition_speed * f)
            }
            Control::NudgeIdleIntensity(d) => self.set_idle_intensity(self.idle_intensity + d),
            Control::ScaleParticleSize(f) => self.set_particle_size(self.particle_size * f),
        }
    }

    /// Dispatch one queued command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Tick { dt_sec } => {
                self.tick(dt_sec);
            }
            Command::Hands { frame, at } => {
                self.handle_hands(&frame, at);
            }
            Command::Control(control) => self.control(control),
        }
    }

    /// Hand the current frame to `sink`, camera sized for the configured
    /// output resolution.
    pub fn render_into<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        let frame = FrameView {
            positions: self.particles.positions_flat(),
            colors: self.particles.colors_flat(),
            sizes: &self.particles.sizes,
            point_size: self.particle_size,
        };
        let camera = self.camera.camera(self.post.aspect());
        sink.draw(frame, &camera, &self.post);
    }
}
