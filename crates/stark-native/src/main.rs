mod source;

use anyhow::Context;
use glam::Vec3;
use stark_core::{
    Camera, Command, FrameView, PostSettings, RenderSink, Visualizer, VisualizerConfig,
};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use source::{spawn_gesture_source, spawn_keyboard, ScriptedHands};

const FRAME_DT: Duration = Duration::from_nanos(1_000_000_000 / 60);
const DEFAULT_FRAMES: u64 = 1_200;
const REPORT_EVERY: u64 = 60;

/// Stands in for a GPU renderer: summarizes every `REPORT_EVERY`th frame.
#[derive(Default)]
struct LogSink {
    frames: u64,
}

impl RenderSink for LogSink {
    fn draw(&mut self, frame: FrameView<'_>, camera: &Camera, post: &PostSettings) {
        self.frames += 1;
        if self.frames % REPORT_EVERY != 0 {
            return;
        }
        let n = frame.particle_count().max(1) as f32;
        let centroid = frame
            .positions
            .chunks_exact(3)
            .fold(Vec3::ZERO, |acc, p| acc + Vec3::new(p[0], p[1], p[2]))
            / n;
        let view_proj = camera.projection_matrix() * camera.view_matrix();
        let on_screen = view_proj.project_point3(centroid);
        log::info!(
            "[render] frame {} | {} particles, size {:.2} | eye ({:.1}, {:.1}, {:.1}) | centroid ndc ({:.2}, {:.2}) | bloom {:.1}",
            self.frames,
            frame.particle_count(),
            frame.point_size,
            camera.eye.x,
            camera.eye.y,
            camera.eye.z,
            on_screen.x,
            on_screen.y,
            post.bloom_strength,
        );
    }
}

/// `[frames] [seed] [particle count]`, all positional and optional.
fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<(u64, VisualizerConfig)> {
    let frames = match args.next() {
        Some(a) => a.parse().with_context(|| format!("frame count {a:?}"))?,
        None => DEFAULT_FRAMES,
    };
    let mut config = VisualizerConfig::default();
    if let Some(a) = args.next() {
        config = config.with_seed(a.parse().with_context(|| format!("seed {a:?}"))?);
    }
    if let Some(a) = args.next() {
        let count = a.parse().with_context(|| format!("particle count {a:?}"))?;
        config = config.with_particle_count(count);
    }
    Ok((frames, config))
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let (frames, config) = parse_args(std::env::args().skip(1))?;
    let mut vis = Visualizer::new(config).context("invalid visualizer configuration")?;

    let (tx, rx) = mpsc::channel::<Command>();
    let _hands = spawn_gesture_source(ScriptedHands::default(), tx.clone())?;
    let _keys = spawn_keyboard(tx)?;

    let mut sink = LogSink::default();
    let mut next_frame = Instant::now();
    for _ in 0..frames {
        for command in rx.try_iter() {
            vis.apply(command);
        }
        vis.apply(Command::Tick {
            dt_sec: FRAME_DT.as_secs_f32(),
        });
        vis.render_into(&mut sink);

        next_frame += FRAME_DT;
        if let Some(wait) = next_frame.checked_duration_since(Instant::now()) {
            thread::sleep(wait);
        }
    }

    log::info!(
        "[native] done after {} frames; showing {}",
        frames,
        vis.current_pattern().name()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<(u64, VisualizerConfig)> {
        parse_args(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn no_arguments_uses_defaults() {
        let (frames, config) = parse(&[]).unwrap();
        assert_eq!(frames, DEFAULT_FRAMES);
        assert_eq!(config.particle_count, stark_core::DEFAULT_PARTICLE_COUNT);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn positional_arguments_set_frames_seed_and_particle_count() {
        let (frames, config) = parse(&["300", "42", "5000"]).unwrap();
        assert_eq!(frames, 300);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.particle_count, 5_000);
    }

    #[test]
    fn malformed_particle_count_names_the_argument() {
        let err = parse(&["300", "42", "lots"]).unwrap_err();
        assert!(format!("{err:#}").contains("particle count"));
    }
}
