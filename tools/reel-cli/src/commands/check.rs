//! Check external tools and input files.

use std::path::Path;

use reel_common::config::ReelConfig;
use reel_common::process::command_exists;

pub fn run(config: ReelConfig) -> anyhow::Result<()> {
    println!("commit-reel System Check");
    println!("{}", "=".repeat(50));

    let mut tools = vec![
        ("commit log", config.tools.git.as_str()),
        ("visualizer", config.tools.visualizer.as_str()),
        ("encoder", config.tools.encoder.as_str()),
    ];
    if config.tools.virtual_display {
        tools.push(("virtual display", config.tools.xvfb_run.as_str()));
    }

    let mut all_ok = true;
    for (role, binary) in tools {
        if command_exists(binary) {
            println!("[OK] {role}: {binary}");
        } else {
            println!("[MISSING] {role}: {binary} not found in PATH");
            all_ok = false;
        }
    }

    println!();
    let inputs: [(&str, &Path); 3] = [
        ("logo", config.visualizer.logo.as_path()),
        ("music", config.composition.music.as_path()),
        ("font", config.composition.font_file.as_path()),
    ];
    for (role, path) in inputs {
        if path.exists() {
            println!("[OK] {role}: {}", path.display());
        } else {
            println!("[MISSING] {role}: {}", path.display());
            all_ok = false;
        }
    }

    println!();
    if all_ok {
        println!("Everything is in place. Run `commit-reel make`.");
    } else {
        println!("Some tools or inputs are missing. See above.");
    }

    Ok(())
}
