mod config;
mod loopback;
mod synthetic;

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use farview_tracking::{FrameCorrelator, HeadSlot, SyncLoop};
use farview_vr::{session_status, Eye, HapticPulse, HeadSource, Side};

use crate::config::ClientConfig;
use crate::loopback::LoopbackEngine;
use crate::synthetic::{SyntheticControllers, SyntheticHead};

#[derive(Parser, Debug)]
#[command(name = "farview-client", about = "Headless Farview tracking session")]
struct Args {
    /// Path to a JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds to run before shutting down.
    #[arg(long, default_value_t = 5)]
    duration: u64,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => config::load(path)?,
        None => ClientConfig::default(),
    };
    info!(?config, "starting session");

    run_session(&config, Duration::from_secs(args.duration))
}

fn run_session(config: &ClientConfig, duration: Duration) -> Result<()> {
    let engine = Arc::new(LoopbackEngine::new());
    let head = Arc::new(HeadSlot::new());

    // Spawn failure means no tracking at all; bail out of the session.
    let mut sync = SyncLoop::spawn_with_interval(
        engine.clone(),
        Box::new(SyntheticControllers::new(200)),
        head.clone(),
        Duration::from_millis(config.tick_interval_ms),
    )
    .context("starting synchronization loop")?;
    info!(status = %session_status(), "synchronization loop up");

    let frame_period = Duration::from_secs_f64(1.0 / f64::from(config.frame_rate_hz.max(1)));
    let mut head_source = SyntheticHead::new(0.005);
    let mut correlator = FrameCorrelator::new(head.clone());

    let deadline = Instant::now() + duration;
    let mut frames = 0u64;
    while Instant::now() < deadline {
        if frames > 0 && frames % 144 == 0 {
            // Pretend the remote renderer asked for feedback.
            engine.inject_haptic(HapticPulse {
                side: Side::Right,
                amplitude: 0.6,
                duration_ms: 30,
            });
        }
        let sample = head_source.head_sample()?;
        correlator.begin_frame(engine.as_ref(), &mut head_source, sample);
        let _left = correlator.eye_texture(engine.as_ref(), Eye::Left);
        let _right = correlator.eye_texture(engine.as_ref(), Eye::Right);
        correlator.end_frame(engine.as_ref());
        frames += 1;
        thread::sleep(frame_period);
    }

    sync.stop();

    let display_sample = correlator.display_pose();
    info!(
        frames,
        orientation = ?display_sample.pose.orientation,
        position = ?display_sample.pose.position,
        "session complete"
    );
    Ok(())
}
