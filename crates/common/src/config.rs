//! Movie configuration.
//!
//! Every tunable of a production run lives here. The `Default` impls carry
//! the values used for the ObsPy 0.10.1 development movie; a JSON file can
//! override any subset of them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReelError, ReelResult};

/// Full date form accepted by gource's `--start-date`/`--stop-date`.
pub const GOURCE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %#z";

/// Zone-less forms gource also accepts, interpreted in local time.
const GOURCE_LOCAL_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
const GOURCE_DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

/// Where [`ReelConfig::load_or_default`] took its values from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file.
    File(PathBuf),
    /// This file was requested but does not exist; defaults are used.
    Missing(PathBuf),
    /// No file was requested; defaults are used.
    BuiltIn,
}

impl ConfigSource {
    /// Log how the configuration was obtained. Call once logging is set up.
    pub fn log(&self) {
        match self {
            Self::File(path) => tracing::debug!(path = %path.display(), "Loaded config file"),
            Self::Missing(path) => tracing::warn!(
                path = %path.display(),
                "Config file not found, using built-in defaults"
            ),
            Self::BuiltIn => tracing::info!("No config file given, using built-in defaults"),
        }
    }
}

/// Top-level configuration for one movie.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelConfig {
    /// Title rendered by the visualizer.
    pub title: String,

    /// First commit date shown (gource date format).
    pub start_date: String,

    /// Last commit date shown (gource date format).
    pub end_date: String,

    /// Output geometry and frame rate.
    pub video: VideoConfig,

    /// Avatar cache and lookup service.
    pub avatars: AvatarConfig,

    /// Visualizer tuning and raw frame output.
    pub visualizer: VisualizerConfig,

    /// Filter graph styling and timing.
    pub composition: CompositionConfig,

    /// Final encode settings.
    pub encoder: EncoderConfig,

    /// External program names.
    pub tools: ToolsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    /// Directory holding `<author>.png` files.
    pub dir: PathBuf,

    /// Requested image size in pixels.
    pub size: u32,

    /// Avatar service endpoint; the email hash is appended as a path segment.
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Raw PPM stream written by the visualizer.
    pub output: PathBuf,

    /// Logo shown by the visualizer and faded in by the intro.
    pub logo: PathBuf,

    /// Comment line the visualizer writes into every PPM header.
    pub generator_comment: String,

    pub seconds_per_day: f64,
    pub auto_skip_seconds: f64,
    pub max_file_lag: f64,
    pub max_user_speed: u32,
    pub user_friction: f64,
    pub user_scale: f64,

    /// Comma-separated elements passed to `--hide`.
    pub hide: String,

    pub bloom_multiplier: f64,
    pub bloom_intensity: f64,
    pub multi_sampling: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionConfig {
    /// Canvas color behind the intro logo.
    pub background: String,

    /// Font used by every credit line.
    pub font_file: PathBuf,

    /// Font color used by every credit line.
    pub text_color: String,

    /// Audio track muxed under the video.
    pub music: PathBuf,

    /// Seconds the main clip is extended past its last frame.
    pub post_padding_secs: f64,

    /// Length of the audio fade-out.
    pub audio_fade_secs: f64,

    pub intro: IntroConfig,

    /// Lines drawn over the post-time window, top to bottom.
    pub credits: Vec<CreditLine>,
}

/// Logo intro timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    /// Total intro length in seconds.
    pub duration_secs: f64,

    /// Time the logo stays centered before sliding.
    pub hold_secs: f64,

    pub fade_start_secs: f64,
    pub fade_duration_secs: f64,

    /// Distance from the bottom-right corner where the logo settles.
    pub margin_px: u32,
}

/// One `drawtext` line of the credits overlay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditLine {
    /// Unescaped text.
    pub text: String,
    pub font_size: u32,

    /// ffmpeg expression for the x position.
    pub x: String,

    /// ffmpeg expression for the y position.
    pub y: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub output: PathBuf,
    pub video_codec: String,
    pub video_bitrate: String,
    pub audio_codec: String,
    pub audio_bitrate: String,
    pub audio_quality: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub git: String,
    pub visualizer: String,
    pub encoder: String,
    pub xvfb_run: String,

    /// Run the visualizer under `xvfb-run`.
    pub virtual_display: bool,

    /// Treat a non-zero exit from the visualizer or encoder as fatal.
    pub strict: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "reel_avatars=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

const MUSIC_COPYRIGHT: &str = "Music: \"Severe Tire Damage\" Kevin MacLeod (incompetech.com)
Licensed under Creative Commons: By Attribution 3.0
https://creativecommons.org/licenses/by/3.0/";

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            title: "ObsPy 0.10.1 Development".to_string(),
            start_date: "2013-12-09 14:24:51 +01".to_string(),
            end_date: "2015-03-20 12:59:18 +01".to_string(),
            video: VideoConfig::default(),
            avatars: AvatarConfig::default(),
            visualizer: VisualizerConfig::default(),
            composition: CompositionConfig::default(),
            encoder: EncoderConfig::default(),
            tools: ToolsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fps: 30,
        }
    }
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("avatar"),
            size: 90,
            base_url: "https://www.gravatar.com/avatar".to_string(),
        }
    }
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("obspy-devel.ppm"),
            logo: Path::new("..")
                .join("docs")
                .join("source")
                .join("_static")
                .join("obspy_logo.png"),
            generator_comment: "# Generated by Gource".to_string(),
            seconds_per_day: 0.1,
            auto_skip_seconds: 0.25,
            max_file_lag: 0.2,
            max_user_speed: 150,
            user_friction: 1.0,
            user_scale: 2.0,
            hide: "progress,filenames,usernames,mouse".to_string(),
            bloom_multiplier: 1.1,
            bloom_intensity: 0.4,
            multi_sampling: true,
        }
    }
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            background: "0x1a1a1a".to_string(),
            font_file: PathBuf::from("/usr/share/fonts/bitstream-vera/Vera.ttf"),
            text_color: "white".to_string(),
            music: PathBuf::from("Severe Tire Damage.mp3"),
            post_padding_secs: 2.0,
            audio_fade_secs: 1.0,
            intro: IntroConfig::default(),
            credits: vec![
                CreditLine {
                    text: "Created with gource".to_string(),
                    font_size: 40,
                    x: "w-text_w-2*max_glyph_w".to_string(),
                    y: "(h-text_h)/2-line_h".to_string(),
                },
                CreditLine {
                    text: "http://acaudwell.github.io/Gource/".to_string(),
                    font_size: 20,
                    x: "w-text_w-4*max_glyph_w".to_string(),
                    y: "(h-text_h)/2+line_h".to_string(),
                },
                CreditLine {
                    text: MUSIC_COPYRIGHT.to_string(),
                    font_size: 20,
                    x: "w-text_w-4*max_glyph_w".to_string(),
                    y: "h/2+2.5*line_h".to_string(),
                },
            ],
        }
    }
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            duration_secs: 4.25,
            hold_secs: 2.25,
            fade_start_secs: 0.25,
            fade_duration_secs: 2.0,
            margin_px: 10,
        }
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("obspy-devel.webm"),
            video_codec: "libvpx".to_string(),
            video_bitrate: "25000k".to_string(),
            audio_codec: "libvorbis".to_string(),
            audio_bitrate: "256k".to_string(),
            audio_quality: "4".to_string(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: "git".to_string(),
            visualizer: "gource".to_string(),
            encoder: "ffmpeg".to_string(),
            xvfb_run: "xvfb-run".to_string(),
            virtual_display: true,
            strict: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl VideoConfig {
    /// Frame rate as passed to the external tools (`30.000000`).
    pub fn rate_arg(&self) -> String {
        format!("{:.6}", self.fps as f64)
    }
}

impl ReelConfig {
    /// Load a config file. Missing keys fall back to their defaults.
    pub fn load(path: &Path) -> ReelResult<Self> {
        if !path.exists() {
            return Err(ReelError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` when given and present, otherwise use the built-in
    /// production values.
    ///
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default(path: Option<&Path>) -> ReelResult<(Self, ConfigSource)> {
        let Some(path) = path else {
            return Ok((Self::default(), ConfigSource::BuiltIn));
        };
        match Self::load(path) {
            Ok(config) => Ok((config, ConfigSource::File(path.to_path_buf()))),
            Err(ReelError::FileNotFound { path }) => {
                Ok((Self::default(), ConfigSource::Missing(path)))
            }
            Err(err) => Err(err),
        }
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> ReelResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values the external tools cannot work with.
    pub fn validate(&self) -> ReelResult<()> {
        if self.video.width == 0 || self.video.height == 0 {
            return Err(ReelError::config("video width and height must be non-zero"));
        }
        if self.video.fps == 0 {
            return Err(ReelError::config("video fps must be non-zero"));
        }

        let start = parse_gource_date(&self.start_date)?;
        let end = parse_gource_date(&self.end_date)?;
        if let (GourceDate::Zoned(start), GourceDate::Zoned(end)) = (start, end) {
            if start >= end {
                return Err(ReelError::config(format!(
                    "start_date {} is not before end_date {}",
                    self.start_date, self.end_date
                )));
            }
        }

        let intro = &self.composition.intro;
        if intro.hold_secs > intro.duration_secs {
            return Err(ReelError::config(format!(
                "intro hold ({}s) exceeds intro duration ({}s)",
                intro.hold_secs, intro.duration_secs
            )));
        }
        Ok(())
    }
}

/// A date string gource understands. Only zoned dates can be ordered
/// without knowing the local time zone.
enum GourceDate {
    Zoned(chrono::DateTime<chrono::FixedOffset>),
    Local,
}

fn parse_gource_date(value: &str) -> ReelResult<GourceDate> {
    let value = value.trim();
    if let Ok(date) = chrono::DateTime::parse_from_str(value, GOURCE_DATE_FORMAT) {
        return Ok(GourceDate::Zoned(date));
    }
    let local = GOURCE_LOCAL_DATETIME_FORMATS
        .iter()
        .any(|format| chrono::NaiveDateTime::parse_from_str(value, format).is_ok())
        || chrono::NaiveDate::parse_from_str(value, GOURCE_DATE_ONLY_FORMAT).is_ok();
    if local {
        return Ok(GourceDate::Local);
    }
    Err(ReelError::config(format!(
        "invalid date {value:?}: expected YYYY-MM-DD, YYYY-MM-DD hh:mm[:ss] or YYYY-MM-DD hh:mm:ss +zz"
    )))
}
