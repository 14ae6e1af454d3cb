//! Count frames in a raw PPM stream.

use std::path::PathBuf;

use reel_common::config::ReelConfig;
use reel_render_engine::{count_frames, FrameFormat};

pub fn run(config: ReelConfig, path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(|| config.visualizer.output.clone());
    let frames = count_frames(&path, &FrameFormat::from_config(&config))
        .map_err(|e| anyhow::anyhow!("Failed to count frames in {}: {e}", path.display()))?;
    println!("{frames}");
    Ok(())
}
