// Host-side integration tests for the transition engine and idle drift.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stark_core::*;

fn setup(count: usize) -> (TransitionEngine, ParticleBuffer, StdRng) {
    let mut rng = StdRng::seed_from_u64(11);
    let start = PatternKind::Cube;
    let live = ParticleBuffer::from_pattern(start, count, palette_for(start).primary(), &mut rng);
    (TransitionEngine::new(start), live, rng)
}

fn record(engine: &TransitionEngine) -> &TransitionRecord {
    match engine.state() {
        TransitionState::Transitioning(rec) => rec,
        TransitionState::Stable => panic!("expected a transition in flight"),
    }
}

#[test]
fn grid_to_sphere_lands_exactly_on_the_sphere() {
    let (mut engine, mut live, mut rng) = setup(6);
    engine.begin(PatternKind::Sphere, &mut live, &mut rng);
    assert!(engine.is_transitioning());

    let outcome = engine.advance(&mut live, 1.0, 0.05);
    assert_eq!(outcome, TickOutcome::Completed(PatternKind::Sphere));
    assert_eq!(engine.current(), PatternKind::Sphere);
    assert!(!engine.is_transitioning());

    let mut scratch = StdRng::seed_from_u64(0);
    for i in 0..6 {
        assert_eq!(live.positions[i], PatternKind::Sphere.generate(i, 6, &mut scratch));
        assert_eq!(live.colors[i], palette_for(PatternKind::Sphere).primary());
    }
}

#[test]
fn commit_copies_the_target_buffers_exactly() {
    let (mut engine, mut live, mut rng) = setup(300);
    engine.begin(PatternKind::Galaxy, &mut live, &mut rng);
    let expected_positions = record(&engine).to_positions.clone();
    let expected_colors = record(&engine).to_colors.clone();

    let mut completed = None;
    for _ in 0..1_000 {
        if let TickOutcome::Completed(p) = engine.advance(&mut live, 1.0 / 60.0, 0.02) {
            completed = Some(p);
            break;
        }
    }
    assert_eq!(completed, Some(PatternKind::Galaxy));
    assert_eq!(live.positions, expected_positions);
    assert_eq!(live.colors, expected_colors);
    assert!(matches!(engine.state(), TransitionState::Stable));
    assert_eq!(engine.state().progress(), None);
}

#[test]
fn mid_transition_frames_blend_without_touching_snapshots() {
    let (mut engine, mut live, mut rng) = setup(50);
    let original = live.positions.clone();
    engine.begin(PatternKind::Torus, &mut live, &mut rng);

    let outcome = engine.advance(&mut live, 1.0 / 60.0, 0.2);
    let TickOutcome::Progressed { eased } = outcome else {
        panic!("expected progress, got {outcome:?}");
    };
    assert!(eased > 0.0 && eased < 1.0);

    let rec = record(&engine);
    assert!((rec.progress - 0.2).abs() < 1e-6);
    assert_eq!(rec.from_positions, original);
    for i in 0..50 {
        let expected = rec.from_positions[i].lerp(rec.to_positions[i], eased);
        assert_eq!(live.positions[i], expected);
    }
}

#[test]
fn progress_scales_with_elapsed_time() {
    let (mut engine, mut live, mut rng) = setup(10);
    engine.begin(PatternKind::Wave, &mut live, &mut rng);
    engine.advance(&mut live, 0.5, 0.01);
    // 0.01 per reference frame over 30 reference frames
    assert!((engine.state().progress().unwrap() - 0.3).abs() < 1e-5);
}

#[test]
fn beginning_again_commits_the_running_transition() {
    let (mut engine, mut live, mut rng) = setup(40);
    engine.begin(PatternKind::Sphere, &mut live, &mut rng);
    let sphere = record(&engine).to_positions.clone();
    engine.advance(&mut live, 1.0 / 60.0, 0.01);

    engine.begin(PatternKind::Helix, &mut live, &mut rng);
    assert_eq!(engine.current(), PatternKind::Sphere);
    assert_eq!(engine.state().target(), Some(PatternKind::Helix));
    assert_eq!(record(&engine).from_positions, sphere);
    assert_eq!(record(&engine).progress, 0.0);
}

#[test]
fn length_mismatch_aborts_and_returns_to_stable() {
    let (mut engine, mut live, mut rng) = setup(6);
    engine.begin(PatternKind::Sphere, &mut live, &mut rng);
    live.positions.push(Vec3::ZERO);
    live.colors.push(Vec3::ONE);
    live.sizes.push(1.0);

    assert_eq!(engine.advance(&mut live, 1.0 / 60.0, 0.01), TickOutcome::Aborted);
    assert!(!engine.is_transitioning());
    assert_eq!(engine.current(), PatternKind::Cube);
    assert_eq!(live.len(), 7);
    assert!(live.is_consistent());
}

#[test]
fn complete_without_transition_is_a_no_op() {
    let (mut engine, mut live, _) = setup(6);
    let before = live.clone();
    assert_eq!(engine.complete(&mut live), None);
    assert_eq!(engine.advance(&mut live, 1.0, 0.05), TickOutcome::Idle);
    assert_eq!(live, before);
}

#[test]
fn ease_hits_its_endpoints() {
    assert_eq!(ease_in_out_cubic(0.0), 0.0);
    assert_eq!(ease_in_out_cubic(1.0), 1.0);
}

#[test]
fn ease_is_monotonic_on_the_unit_interval() {
    let mut prev = ease_in_out_cubic(0.0);
    for k in 1..=1_000 {
        let e = ease_in_out_cubic(k as f32 / 1_000.0);
        assert!(e >= prev, "ease decreased at t={}", k as f32 / 1_000.0);
        prev = e;
    }
}

#[test]
fn ease_is_symmetric_about_the_midpoint() {
    for k in 0..=100 {
        let t = k as f32 / 100.0;
        let sum = ease_in_out_cubic(t) + ease_in_out_cubic(1.0 - t);
        assert!((sum - 1.0).abs() < 1e-5, "asymmetric at t={t}");
    }
}

#[test]
fn idle_drift_accumulates() {
    let mut positions = vec![Vec3::ZERO; 4];
    apply_idle_drift(&mut positions, 0.0, 1.0 / 60.0, 1.0);
    let first = positions.clone();
    apply_idle_drift(&mut positions, 0.0, 1.0 / 60.0, 1.0);
    for (a, b) in first.iter().zip(&positions) {
        // same phase, so the second step doubles the displacement
        assert!((*b - *a * 2.0).length() < 1e-6);
        assert_eq!(b.z, 0.0);
    }
    // particle 0 at t=0 moves purely along +x
    assert!((first[0].x - 20.0 / 60.0).abs() < 1e-6);
    assert!(first[0].y.abs() < 1e-6);
}

#[test]
fn idle_drift_is_disabled_at_zero_intensity() {
    let mut positions = vec![Vec3::new(1.0, 2.0, 3.0); 8];
    apply_idle_drift(&mut positions, 12.5, 1.0 / 60.0, 0.0);
    assert!(positions.iter().all(|&p| p == Vec3::new(1.0, 2.0, 3.0)));
}
