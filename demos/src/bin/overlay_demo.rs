//! # Overlay Demo
//!
//! Runs the showcase scene for a number of frames through an SVG backend and
//! writes the last frame to disk.
//!
//! ```bash
//! cargo run -p xr-overlay-demos --bin overlay_demo -- --output overlay.svg
//! ```

use std::path::PathBuf;

use clap::Parser;
use xr_overlay_debug_drawer::{DrawContext, OverlayConfig, OverlayResources};
use xr_overlay_demos::{draw_showcase, SvgBackend};

/// Overlay demo arguments.
#[derive(Parser, Debug)]
#[command(
    name = "overlay_demo",
    about = "Render the XR overlay showcase into an SVG file",
    version
)]
struct Args {
    /// SVG file to write.
    #[arg(long, short, default_value = "overlay_demo.svg")]
    output: PathBuf,

    /// RON overlay configuration to load instead of the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of simulated frames; only the last one is written.
    #[arg(long, default_value = "1")]
    frames: u32,

    /// Seconds between simulated frames.
    #[arg(long, default_value = "0.016")]
    frame_time: f32,

    /// Output pixels per world unit.
    #[arg(long, default_value = "200")]
    scale: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => OverlayConfig::load(path)?,
        None => OverlayConfig::default(),
    };

    let mut overlay = DrawContext::new(
        SvgBackend::new(args.scale),
        OverlayResources::tagged(()),
        config,
    )?;

    for frame in 0..args.frames.max(1) {
        overlay.backend_mut().clear();
        overlay.begin_frame();

        draw_showcase(&mut overlay, frame as f32 * args.frame_time);

        let stats = overlay.frame_stats();
        log::info!(
            "frame {}: {} draw calls, {} instances ({} instanced flushes)",
            frame,
            stats.draw_calls,
            stats.instances,
            overlay.backend().flushes()
        );
    }

    overlay.backend().save(&args.output)?;
    log::info!(
        "wrote {} shapes to {}",
        overlay.backend().shapes().len(),
        args.output.display()
    );

    overlay.shutdown();
    Ok(())
}
