//! Write the default configuration.

use std::path::PathBuf;

use reel_common::config::ReelConfig;

pub fn run(path: PathBuf, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        return Err(anyhow::anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }

    ReelConfig::default()
        .save(&path)
        .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
