//! Print the commands a `make` run would execute.

use reel_common::config::ReelConfig;
use reel_render_engine::{count_rendered_frames, plan_encode, visualizer_invocation};

pub fn run(config: ReelConfig, frames: Option<u64>) -> anyhow::Result<()> {
    let frames = match frames {
        Some(frames) => frames,
        None => count_rendered_frames(&config).map_err(|e| {
            anyhow::anyhow!("{e} (render frames first or pass --frames)")
        })?,
    };
    let plan = plan_encode(&config, frames);

    println!("Visualizer:");
    println!("  {}", visualizer_invocation(&config).command_line());
    println!();

    println!("Timing:");
    println!("  Frames: {} @ {}fps", plan.timing.frames, plan.timing.fps);
    println!("  Main: {:.3}s", plan.timing.main_secs);
    println!(
        "  Credits: {:.3}s .. {:.3}s",
        plan.timing.credits_start, plan.timing.credits_end
    );
    println!(
        "  Audio: {:.3}s, fade out from {:.3}s",
        plan.timing.audio_duration, plan.timing.audio_fade_start
    );
    println!();

    println!("Filter graph:");
    for fragment in plan.graph.fragments() {
        println!("  [{}] {}", fragment.label, fragment.text);
    }
    println!();

    println!("Encoder:");
    println!("  {}", plan.invocation.command_line());

    Ok(())
}
