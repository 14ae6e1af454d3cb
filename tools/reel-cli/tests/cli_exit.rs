use std::path::PathBuf;
use std::process::{Command, Output};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("reel_cli_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn commit_reel(dir: &PathBuf, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_commit-reel"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn unreadable_commit_log_exits_with_status_one() {
    let dir = scratch_dir("no_git");
    let config = dir.join("reel.json");
    std::fs::write(
        &config,
        r#"{"tools": {"git": "/nonexistent/reel-git"}}"#,
    )
    .unwrap();

    let output = commit_reel(&dir, &["--config", config.to_str().unwrap(), "avatars"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("ERROR: Unable to read git log."), "{stderr}");
    assert!(stderr.contains("/nonexistent/reel-git"), "{stderr}");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let dir = scratch_dir("missing_config");

    let output = commit_reel(
        &dir,
        &["--config", "does-not-exist.json", "plan", "--frames", "30"],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "{stderr}");
    assert!(stderr.contains("Config file not found"), "{stderr}");
    assert!(stdout.contains("nullsrc=r=30.000000:s=1920x1080"), "{stdout}");

    std::fs::remove_dir_all(&dir).ok();
}
