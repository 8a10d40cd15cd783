use std::f32::consts::PI;
use std::time::Duration;

// Shared tuning constants used by the core and by front-ends.

// Particle defaults
pub const DEFAULT_PARTICLE_COUNT: usize = 15_000;
pub const DEFAULT_TRANSITION_SPEED: f32 = 0.005; // progress per 1/60 s
pub const DEFAULT_IDLE_INTENSITY: f32 = 0.0; // 0 disables idle drift
pub const DEFAULT_PARTICLE_SIZE: f32 = 0.5;
pub const BASE_PARTICLE_SIZE: f32 = 1.0; // per-particle size attribute

// Control-surface ranges
pub const TRANSITION_SPEED_RANGE: (f32, f32) = (0.001, 0.05);
pub const IDLE_INTENSITY_RANGE: (f32, f32) = (0.0, 1.0);
pub const PARTICLE_SIZE_RANGE: (f32, f32) = (0.1, 10.0);

// Transition timing
pub const FRAMES_PER_SECOND_REFERENCE: f32 = 60.0; // speed is expressed per reference frame

// Idle drift: dx = cos(t*f + i*phi) * intensity * dt * k
pub const IDLE_TIME_FREQUENCY: f32 = 0.5;
pub const IDLE_INDEX_PHASE: f32 = 0.05;
pub const IDLE_DISPLACEMENT_SCALE: f32 = 20.0;

// Camera
pub const INITIAL_CAMERA_Z: f32 = 100.0;
pub const MIN_CAMERA_Z: f32 = 20.0;
pub const MAX_CAMERA_Z: f32 = 200.0;
pub const ZOOM_SMOOTHING: f32 = 0.04; // fraction of the gap closed per tick
pub const ROTATION_SMOOTHING: f32 = 0.03;
pub const ROTATION_SENSITIVITY: f32 = 0.8; // horizontal, per radian of hand roll
pub const Y_ROTATION_SENSITIVITY: f32 = 0.5; // vertical, per unit of wrist travel
pub const MAX_Y_ANGLE: f32 = PI / 4.0; // keeps the camera from flipping over the pole
pub const CAMERA_FOVY_DEGREES: f32 = 65.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1500.0;

// Pinch-to-zoom input domain (normalized image units)
pub const MIN_PINCH_DIST: f32 = 0.04; // fully pinched -> closest camera
pub const MAX_PINCH_DIST: f32 = 0.16; // fully open -> farthest camera

// Clap detection
pub const MIN_HANDS_DISTANCE: f32 = 0.12; // hands count as "together" below this
pub const CLAP_APPROACH_THRESHOLD: f32 = 0.01; // per-frame decrease that counts as approaching
pub const CLAP_SEPARATION_THRESHOLD: f32 = 0.02; // per-frame increase that counts as separating
pub const CLAP_COOLDOWN: Duration = Duration::from_millis(1500);

// Hand landmark indices (21-point hand model)
pub const LANDMARK_COUNT: usize = 21;
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;

// Post-processing defaults (consumed by the external renderer)
pub const BLOOM_STRENGTH: f32 = 2.0;
pub const BLOOM_RADIUS: f32 = 0.1;
pub const BLOOM_THRESHOLD: f32 = 0.1;
pub const CHROMATIC_STRENGTH: f32 = 0.5;
pub const DEFAULT_RESOLUTION: [u32; 2] = [1280, 720];
