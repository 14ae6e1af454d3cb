//! Encoder (ffmpeg) invocation.

use reel_common::config::ReelConfig;
use reel_common::process::Invocation;

use crate::filter_graph::{FilterGraph, AUDIO_OUT, VIDEO_OUT};

/// Inputs in index order: raw frames, looped logo, music.
fn input_args(config: &ReelConfig) -> Vec<String> {
    let rate = config.video.rate_arg();
    vec![
        "-f".to_string(),
        "image2pipe".to_string(),
        "-r".to_string(),
        rate.clone(),
        "-vcodec".to_string(),
        "ppm".to_string(),
        "-i".to_string(),
        config.visualizer.output.display().to_string(),
        "-loop".to_string(),
        "1".to_string(),
        "-framerate".to_string(),
        rate,
        "-i".to_string(),
        config.visualizer.logo.display().to_string(),
        "-i".to_string(),
        config.composition.music.display().to_string(),
    ]
}

fn output_args(config: &ReelConfig) -> Vec<String> {
    let enc = &config.encoder;
    vec![
        "-map".to_string(),
        format!("[{VIDEO_OUT}]"),
        "-vcodec".to_string(),
        enc.video_codec.clone(),
        "-b:v".to_string(),
        enc.video_bitrate.clone(),
        "-map".to_string(),
        format!("[{AUDIO_OUT}]"),
        "-acodec".to_string(),
        enc.audio_codec.clone(),
        "-b:a".to_string(),
        enc.audio_bitrate.clone(),
        "-aq".to_string(),
        enc.audio_quality.clone(),
        "-shortest".to_string(),
        enc.output.display().to_string(),
    ]
}

/// The ffmpeg command that muxes the final movie.
pub fn encoder_invocation(config: &ReelConfig, graph: &FilterGraph) -> Invocation {
    Invocation::new(&config.tools.encoder)
        .arg("-y")
        .args(input_args(config))
        .arg("-filter_complex")
        .arg(graph.expression())
        .args(output_args(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_graph::{build_filter_graph, Timing};

    #[test]
    fn test_production_argument_list() {
        let config = ReelConfig::default();
        let graph = build_filter_graph(&config, &Timing::from_config(300, &config));
        let inv = encoder_invocation(&config, &graph);

        assert_eq!(inv.program, "ffmpeg");
        let filter_at = inv.args.iter().position(|a| a == "-filter_complex").unwrap();
        assert_eq!(
            &inv.args[..filter_at],
            &[
                "-y",
                "-f",
                "image2pipe",
                "-r",
                "30.000000",
                "-vcodec",
                "ppm",
                "-i",
                "obspy-devel.ppm",
                "-loop",
                "1",
                "-framerate",
                "30.000000",
                "-i",
                "../docs/source/_static/obspy_logo.png",
                "-i",
                "Severe Tire Damage.mp3",
            ]
        );
        assert_eq!(inv.args[filter_at + 1], graph.expression());
        assert_eq!(
            &inv.args[filter_at + 2..],
            &[
                "-map",
                "[video_out]",
                "-vcodec",
                "libvpx",
                "-b:v",
                "25000k",
                "-map",
                "[audio_out]",
                "-acodec",
                "libvorbis",
                "-b:a",
                "256k",
                "-aq",
                "4",
                "-shortest",
                "obspy-devel.webm",
            ]
        );
    }

    #[test]
    fn test_codecs_follow_config() {
        let mut config = ReelConfig::default();
        config.encoder.video_codec = "libvpx-vp9".to_string();
        config.encoder.output = "movie.webm".into();
        let graph = build_filter_graph(&config, &Timing::from_config(0, &config));
        let inv = encoder_invocation(&config, &graph);
        assert!(inv.args.windows(2).any(|w| w[0] == "-vcodec" && w[1] == "libvpx-vp9"));
        assert_eq!(inv.args.last().unwrap(), "movie.webm");
    }
}
