//! Producers that feed the frame loop over a single channel.

use glam::{Vec2, Vec3};
use stark_core::{
    handle_key, Command, HandFrame, HandLandmarks, Handedness, INDEX_TIP, LANDMARK_COUNT,
    MIDDLE_MCP, THUMB_TIP, WRIST,
};
use std::f32::consts::{FRAC_PI_2, TAU};
use std::io::BufRead;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

/// Anything that can deliver hand frames as [`Command`]s over a channel.
pub trait GestureSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<Command>);
}

/// Spawn a gesture source on its own named thread.
pub fn spawn_gesture_source<G: GestureSource>(
    source: G,
    tx: Sender<Command>,
) -> anyhow::Result<thread::JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("gesture-source".into())
        .spawn(move || Box::new(source).run(tx))?;
    Ok(handle)
}

const DETECTOR_PERIOD: Duration = Duration::from_millis(33);

#[derive(Clone, Copy, Debug)]
enum Phase {
    Zoom,
    Orbit,
    Clap,
    Empty,
}

impl Phase {
    const CYCLE: [(Phase, u32); 4] = [
        (Phase::Zoom, 60),
        (Phase::Orbit, 90),
        (Phase::Clap, 20),
        (Phase::Empty, 30),
    ];
}

/// Replays a fixed choreography at detector rate until the receiver goes
/// away: a pinching left hand, a rolling right hand, a clap, then no hands.
#[derive(Default)]
pub struct ScriptedHands;

impl GestureSource for ScriptedHands {
    fn run(self: Box<Self>, tx: Sender<Command>) {
        for cycle in 0u64.. {
            for (phase, frames) in Phase::CYCLE {
                log::debug!("[source] cycle {cycle} phase {phase:?}");
                for f in 0..frames {
                    let t = f as f32 / frames as f32;
                    let command = Command::Hands {
                        frame: scripted_frame(phase, t),
                        at: instant::Instant::now(),
                    };
                    if tx.send(command).is_err() {
                        return;
                    }
                    thread::sleep(DETECTOR_PERIOD);
                }
            }
        }
    }
}

fn scripted_frame(phase: Phase, t: f32) -> HandFrame {
    match phase {
        Phase::Zoom => {
            let pinch = 0.1 + 0.07 * (t * TAU).sin();
            HandFrame::new([synth_hand(
                Handedness::Left,
                Vec2::new(0.3, 0.6),
                0.0,
                pinch,
            )])
        }
        Phase::Orbit => {
            let roll = 0.6 * (t * TAU).sin();
            let wrist = Vec2::new(0.7, 0.6 - 0.15 * (t * TAU).sin());
            HandFrame::new([synth_hand(Handedness::Right, wrist, roll, 0.1)])
        }
        Phase::Clap => {
            // 0.33 down to 0.03 and back in 0.03 steps
            let d = 0.03 + 0.3 * (2.0 * t - 1.0).abs();
            let mut left = synth_hand(Handedness::Left, Vec2::new(0.35, 0.6), 0.0, 0.1);
            let mut right = synth_hand(Handedness::Right, Vec2::new(0.65, 0.6), 0.0, 0.1);
            left.points[INDEX_TIP] = Vec3::new(0.5 - d / 2.0, 0.4, 0.0);
            right.points[INDEX_TIP] = Vec3::new(0.5 + d / 2.0, 0.4, 0.0);
            HandFrame::new([left, right])
        }
        Phase::Empty => HandFrame::default(),
    }
}

/// A hand with the four landmarks the core reads placed deliberately and
/// the rest parked on the wrist.
fn synth_hand(handedness: Handedness, wrist: Vec2, roll: f32, pinch: f32) -> HandLandmarks {
    let wrist = wrist.extend(0.0);
    let heading = roll + FRAC_PI_2;
    let knuckle = wrist + Vec3::new(heading.cos(), heading.sin(), 0.0) * 0.1;
    let thumb = wrist + Vec3::new(0.05, -0.08, 0.0);
    let index = thumb + Vec3::new(pinch, 0.0, 0.0);

    let mut hand = HandLandmarks::new(handedness, std::iter::repeat(wrist).take(LANDMARK_COUNT));
    hand.points[WRIST] = wrist;
    hand.points[MIDDLE_MCP] = knuckle;
    hand.points[THUMB_TIP] = thumb;
    hand.points[INDEX_TIP] = index;
    hand
}

/// Reads key presses from stdin, one character at a time, until EOF.
pub fn spawn_keyboard(tx: Sender<Command>) -> anyhow::Result<thread::JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("keyboard".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { return };
                for c in line.chars() {
                    let key = c.to_string();
                    match handle_key(&key) {
                        Some(control) => {
                            if tx.send(Command::Control(control)).is_err() {
                                return;
                            }
                        }
                        None => log::debug!("[keyboard] unbound key {key:?}"),
                    }
                }
            }
        })?;
    Ok(handle)
}
