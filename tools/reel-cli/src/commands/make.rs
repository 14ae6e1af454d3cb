//! Run the whole movie pipeline.

use reel_avatars::HttpAvatarSource;
use reel_common::config::ReelConfig;
use reel_common::process::SystemRunner;
use reel_render_engine::run_pipeline;

pub async fn run(config: ReelConfig) -> anyhow::Result<()> {
    let source = HttpAvatarSource::new()?;
    let report = run_pipeline(&config, &SystemRunner, &source).await?;

    println!();
    println!("Movie: {}", report.output.display());
    println!(
        "  Frames: {} ({:.2}s + {:.2}s intro)",
        report.frames, report.timing.main_secs, config.composition.intro.duration_secs
    );
    println!(
        "  Avatars: {} authors, {} fetched, {} cached, {} unavailable",
        report.avatars.authors,
        report.avatars.fetched,
        report.avatars.cached,
        report.avatars.missing + report.avatars.failed + report.avatars.skipped
    );
    if report.visualizer_code != Some(0) || report.encoder_code != Some(0) {
        println!(
            "  Warning: visualizer exit {:?}, encoder exit {:?}",
            report.visualizer_code, report.encoder_code
        );
    }
    println!("  Started: {}", report.started_at);
    println!("  Elapsed: {:.1}s", report.elapsed_secs);

    Ok(())
}
