// Host-side tests for constants and their mathematical relationships.

use stark_core::*;
use std::f32::consts::FRAC_PI_2;

#[test]
#[allow(clippy::assertions_on_constants)]
fn defaults_sit_inside_their_control_ranges() {
    assert!(DEFAULT_PARTICLE_COUNT >= 1);
    assert!(
        (TRANSITION_SPEED_RANGE.0..=TRANSITION_SPEED_RANGE.1).contains(&DEFAULT_TRANSITION_SPEED)
    );
    assert!((IDLE_INTENSITY_RANGE.0..=IDLE_INTENSITY_RANGE.1).contains(&DEFAULT_IDLE_INTENSITY));
    assert!((PARTICLE_SIZE_RANGE.0..=PARTICLE_SIZE_RANGE.1).contains(&DEFAULT_PARTICLE_SIZE));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_constants_have_logical_relationships() {
    assert!(MIN_CAMERA_Z < INITIAL_CAMERA_Z && INITIAL_CAMERA_Z < MAX_CAMERA_Z);
    assert!(CAMERA_ZNEAR > 0.0 && CAMERA_ZNEAR < MIN_CAMERA_Z);
    // the whole scene stays in front of the far plane from the farthest orbit
    assert!(CAMERA_ZFAR > MAX_CAMERA_Z * 2.0);
    assert!(MAX_Y_ANGLE > 0.0 && MAX_Y_ANGLE < FRAC_PI_2);

    // Smoothing factors are fractions per tick
    assert!(ZOOM_SMOOTHING > 0.0 && ZOOM_SMOOTHING <= 1.0);
    assert!(ROTATION_SMOOTHING > 0.0 && ROTATION_SMOOTHING <= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn gesture_thresholds_are_consistent() {
    assert!(MIN_PINCH_DIST < MAX_PINCH_DIST);
    assert!(CLAP_APPROACH_THRESHOLD > 0.0);
    assert!(CLAP_SEPARATION_THRESHOLD > CLAP_APPROACH_THRESHOLD);
    assert!(MIN_HANDS_DISTANCE > CLAP_SEPARATION_THRESHOLD);
    assert!(!CLAP_COOLDOWN.is_zero());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn landmark_indices_fit_the_hand_model() {
    for index in [WRIST, THUMB_TIP, INDEX_TIP, MIDDLE_MCP] {
        assert!(index < LANDMARK_COUNT);
    }
    assert_ne!(THUMB_TIP, INDEX_TIP);
    assert_ne!(WRIST, MIDDLE_MCP);
}

#[test]
fn post_defaults_are_positive() {
    let post = PostSettings::default();
    assert!(post.bloom_strength > 0.0);
    assert!(post.bloom_radius > 0.0);
    assert!(post.bloom_threshold >= 0.0);
    assert!(post.chromatic_strength >= 0.0);
    assert!((post.aspect() - 16.0 / 9.0).abs() < 1e-6);
    let degenerate = PostSettings {
        resolution: [0, 0],
        ..post
    };
    assert_eq!(degenerate.aspect(), 1.0);
}
