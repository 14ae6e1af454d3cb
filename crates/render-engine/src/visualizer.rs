//! Visualizer (gource) invocation.
//!
//! Timing and speed defaults are geared for roughly one year of development
//! history.

use reel_common::config::ReelConfig;
use reel_common::process::Invocation;

/// The visualizer command that writes raw frames to `visualizer.output`.
pub fn gource_invocation(config: &ReelConfig) -> Invocation {
    let video = &config.video;
    let vis = &config.visualizer;

    let mut inv = Invocation::new(&config.tools.visualizer)
        .arg(format!("-{}x{}", video.width, video.height))
        .args(["--start-date", config.start_date.as_str()])
        .args(["--stop-date", config.end_date.as_str()]);
    if vis.multi_sampling {
        inv = inv.arg("--multi-sampling");
    }

    inv.arg("-s")
        .arg(vis.seconds_per_day.to_string())
        .arg("--auto-skip-seconds")
        .arg(vis.auto_skip_seconds.to_string())
        .arg("--max-file-lag")
        .arg(vis.max_file_lag.to_string())
        .arg("--max-user-speed")
        .arg(vis.max_user_speed.to_string())
        .arg("--user-friction")
        .arg(vis.user_friction.to_string())
        .arg("--user-image-dir")
        .arg(config.avatars.dir.display().to_string())
        .arg("--user-scale")
        .arg(vis.user_scale.to_string())
        .args(["--hide", vis.hide.as_str()])
        .arg("-r")
        .arg(video.rate_arg())
        .args(["--title", config.title.as_str()])
        .arg("--logo")
        .arg(vis.logo.display().to_string())
        .arg("--bloom-multiplier")
        .arg(vis.bloom_multiplier.to_string())
        .arg("--bloom-intensity")
        .arg(vis.bloom_intensity.to_string())
        .arg("-o")
        .arg(vis.output.display().to_string())
}

/// `xvfb-run` prefix giving the visualizer a screen of the output size.
pub fn virtual_display(config: &ReelConfig) -> Invocation {
    Invocation::new(&config.tools.xvfb_run).args([
        "-a".to_string(),
        "-s".to_string(),
        format!(
            "-screen 0 {}x{}x24",
            config.video.width, config.video.height
        ),
    ])
}

/// The command actually run to render frames.
pub fn visualizer_invocation(config: &ReelConfig) -> Invocation {
    let gource = gource_invocation(config);
    if config.tools.virtual_display {
        gource.wrapped_in(virtual_display(config))
    } else {
        gource
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_argument_list() {
        let inv = visualizer_invocation(&ReelConfig::default());
        assert_eq!(inv.program, "xvfb-run");
        assert_eq!(
            inv.args,
            vec![
                "-a",
                "-s",
                "-screen 0 1920x1080x24",
                "gource",
                "-1920x1080",
                "--start-date",
                "2013-12-09 14:24:51 +01",
                "--stop-date",
                "2015-03-20 12:59:18 +01",
                "--multi-sampling",
                "-s",
                "0.1",
                "--auto-skip-seconds",
                "0.25",
                "--max-file-lag",
                "0.2",
                "--max-user-speed",
                "150",
                "--user-friction",
                "1",
                "--user-image-dir",
                "avatar",
                "--user-scale",
                "2",
                "--hide",
                "progress,filenames,usernames,mouse",
                "-r",
                "30.000000",
                "--title",
                "ObsPy 0.10.1 Development",
                "--logo",
                "../docs/source/_static/obspy_logo.png",
                "--bloom-multiplier",
                "1.1",
                "--bloom-intensity",
                "0.4",
                "-o",
                "obspy-devel.ppm",
            ]
        );
    }

    #[test]
    fn test_without_virtual_display() {
        let mut config = ReelConfig::default();
        config.tools.virtual_display = false;
        config.visualizer.multi_sampling = false;
        let inv = visualizer_invocation(&config);
        assert_eq!(inv.program, "gource");
        assert_eq!(inv.args[0], "-1920x1080");
        assert!(!inv.args.iter().any(|a| a == "--multi-sampling"));
    }
}
