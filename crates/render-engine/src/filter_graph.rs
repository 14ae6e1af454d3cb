//! ffmpeg filter graph for the final movie.
//!
//! ```text
//! [1:v] logo ──► fade in ──► overlay on [blank], eased slide ──► [pre] ─────┐
//!                                                                           ├─ concat ─► [video_out]
//! [0:v] frames ──► overlay on [null] (post-time long) ──► credits ─► ... ───┘
//! [2:a] music ──► trim ──► fade out ──────────────────────────────────────────► [audio_out]
//! ```

use reel_common::config::{CompositionConfig, CreditLine, IntroConfig, ReelConfig};

/// Encoder input index of the raw frame stream.
pub const FRAMES_INPUT: usize = 0;
/// Encoder input index of the looped logo image.
pub const LOGO_INPUT: usize = 1;
/// Encoder input index of the music track.
pub const MUSIC_INPUT: usize = 2;

pub const VIDEO_OUT: &str = "video_out";
pub const AUDIO_OUT: &str = "audio_out";

/// Durations derived from the frame count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub frames: u64,
    pub fps: u32,
    /// Length of the rendered visualization.
    pub main_secs: f64,
    /// Length of the main clip after extension; the credits end here.
    pub post_time: f64,
    pub credits_start: f64,
    pub credits_end: f64,
    /// Total audio length: intro plus extended main clip.
    pub audio_duration: f64,
    pub audio_fade_start: f64,
    pub audio_fade_secs: f64,
}

impl Timing {
    pub fn new(frames: u64, fps: u32, composition: &CompositionConfig) -> Self {
        let main_secs = frames as f64 / fps as f64;
        let post_time = main_secs + composition.post_padding_secs;
        let audio_duration =
            main_secs + composition.intro.duration_secs + composition.post_padding_secs;

        Self {
            frames,
            fps,
            main_secs,
            post_time,
            credits_start: main_secs,
            credits_end: post_time,
            audio_duration,
            audio_fade_start: audio_duration - composition.audio_fade_secs,
            audio_fade_secs: composition.audio_fade_secs,
        }
    }

    pub fn from_config(frames: u64, config: &ReelConfig) -> Self {
        Self::new(frames, config.video.fps, &config.composition)
    }
}

/// One labelled piece of the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Output pad produced by this fragment.
    pub label: &'static str,
    pub text: String,
}

/// Ordered fragments that join into one `-filter_complex` expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterGraph {
    fragments: Vec<Fragment>,
}

impl FilterGraph {
    fn push(&mut self, label: &'static str, text: String) {
        self.fragments.push(Fragment { label, text });
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn fragment(&self, label: &str) -> Option<&str> {
        self.fragments
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.text.as_str())
    }

    pub fn expression(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

/// Assemble the whole graph for `timing`.
pub fn build_filter_graph(config: &ReelConfig, timing: &Timing) -> FilterGraph {
    let video = &config.video;
    let composition = &config.composition;
    let rate = video.rate_arg();
    let size = format!("{}x{}", video.width, video.height);

    let mut graph = FilterGraph::default();

    graph.push(
        "null",
        format!(
            "nullsrc=r={rate}:s={size}:d={post}, setpts=PTS-STARTPTS [null];",
            post = secs(timing.post_time),
        ),
    );
    graph.push(
        "blank",
        format!(
            "color=c={bg}:r={rate}:s={size} [blank];",
            bg = composition.background
        ),
    );

    let intro = &composition.intro;
    graph.push(
        "logo",
        format!(
            "[{LOGO_INPUT}:v] trim=duration={dur}, fade=t=in:st={st}:d={d}:alpha=1 [logo];",
            dur = intro.duration_secs,
            st = intro.fade_start_secs,
            d = intro.fade_duration_secs,
        ),
    );
    graph.push(
        "pre",
        format!(
            "[blank][logo]overlay=x='{x}':y='{y}':shortest=1,format=yuv420p,setpts=PTS-STARTPTS[pre];",
            x = eased_axis("main_w", "overlay_w", intro),
            y = eased_axis("main_h", "overlay_h", intro),
        ),
    );

    graph.push(
        "main",
        format!("[{FRAMES_INPUT}:v] setpts=PTS-STARTPTS [main];"),
    );
    graph.push(
        "mainpost",
        "[null][main] overlay, format=yuv420p, setpts=PTS-STARTPTS [mainpost];".to_string(),
    );

    let mut credits: Vec<String> = composition
        .credits
        .iter()
        .map(|line| drawtext(composition, line, timing))
        .collect();
    credits.push("setpts=PTS-STARTPTS [mainpostfont];".to_string());
    graph.push("mainpostfont", format!("[mainpost]{}", credits.join(",")));

    graph.push(
        VIDEO_OUT,
        format!("[pre][mainpostfont] concat=n=2:v=1:a=0 [{VIDEO_OUT}];"),
    );
    graph.push(
        AUDIO_OUT,
        format!(
            "[{MUSIC_INPUT}:a] atrim=duration={dur}, afade=t=out:st={st}:d={d} [{AUDIO_OUT}]",
            dur = secs(timing.audio_duration),
            st = secs(timing.audio_fade_start),
            d = timing.audio_fade_secs,
        ),
    );

    graph
}

/// Position expression for one axis of the intro logo.
///
/// Centered until `hold_secs`, then a cosine-eased slide toward the far
/// corner until `duration_secs`, then parked `margin_px` from the edge.
fn eased_axis(main: &str, overlay: &str, intro: &IntroConfig) -> String {
    let hold = intro.hold_secs;
    let end = intro.duration_secs;
    let slide = end - intro.hold_secs;
    let margin = intro.margin_px;
    let free = format!("({main}-{overlay})");

    format!(
        "if(lte(t,{hold}),{free}/2,if(lte(t,{end}),{free}/2-({free}/4-{margin})*(cos(PI*(t-{hold})/{slide})-1),{main}-{overlay}-{margin}))"
    )
}

fn drawtext(composition: &CompositionConfig, line: &CreditLine, timing: &Timing) -> String {
    format!(
        "drawtext=fontfile={font}:text='{text}':fontcolor={color}:enable='between(t,{start},{end})':x={x}:y={y}:fontsize={size}",
        font = composition.font_file.display(),
        text = escape_drawtext(&line.text),
        color = composition.text_color,
        start = secs(timing.credits_start),
        end = secs(timing.credits_end),
        x = line.x,
        y = line.y,
        size = line.font_size,
    )
}

/// Escape text for a quoted `drawtext` value.
pub fn escape_drawtext(text: &str) -> String {
    text.replace('\\', "\\\\").replace(':', "\\:")
}

fn secs(value: f64) -> String {
    format!("{value:.6}")
}
