//! commit-reel Render Engine
//!
//! Turns a repository's history into a finished movie by driving external
//! tools.
//!
//! # Pipeline Architecture
//!
//! ```text
//! git log ──► avatars/<author>.png
//!                    │
//!                    ▼
//!        xvfb-run gource ──► frames.ppm ──► frame count
//!                                              │
//! logo.png ─────┐                              ▼
//! music.mp3 ────┼──────────────► filter graph (intro, credits, fade)
//! frames.ppm ───┘                              │
//!                                              ▼
//!                                       ffmpeg ──► movie.webm
//! ```

pub mod encode;
pub mod filter_graph;
pub mod frames;
pub mod pipeline;
pub mod visualizer;

pub use encode::encoder_invocation;
pub use filter_graph::{build_filter_graph, FilterGraph, Timing};
pub use frames::{count_frames, count_frames_in, FrameFormat};
pub use pipeline::*;
pub use visualizer::visualizer_invocation;
