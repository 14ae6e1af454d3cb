//! Fetch contributor avatars.

use reel_avatars::{fetch_avatars, HttpAvatarSource};
use reel_common::config::ReelConfig;
use reel_common::process::SystemRunner;

pub async fn run(config: ReelConfig) -> anyhow::Result<()> {
    let source = HttpAvatarSource::new()?;
    let summary = fetch_avatars(&SystemRunner, &source, &config).await?;

    println!(
        "{} authors: {} fetched, {} already cached, {} without avatar, {} failed, {} unusable names",
        summary.authors,
        summary.fetched,
        summary.cached,
        summary.missing,
        summary.failed,
        summary.skipped
    );
    Ok(())
}
