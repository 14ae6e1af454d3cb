//! End-to-end movie pipeline.
//!
//! Avatars, visualizer, frame count, filter graph, encoder; strictly in that
//! order. Each external command is printed before it runs so a failed run
//! can be reproduced by hand.

use std::path::PathBuf;
use std::time::Instant;

use reel_avatars::{fetch_avatars, AvatarSource, FetchSummary};
use reel_common::config::ReelConfig;
use reel_common::error::{ReelError, ReelResult};
use reel_common::process::{Invocation, ToolOutput, ToolRunner};
use tokio::runtime::RuntimeFlavor;

use crate::encode::encoder_invocation;
use crate::filter_graph::{build_filter_graph, FilterGraph, Timing};
use crate::frames::{count_frames, FrameFormat};
use crate::visualizer::visualizer_invocation;

/// Everything needed to run the encoder once the frame count is known.
#[derive(Debug, Clone)]
pub struct EncodePlan {
    pub timing: Timing,
    pub graph: FilterGraph,
    pub invocation: Invocation,
}

/// Summary of a finished pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Wall-clock start (RFC 3339).
    pub started_at: String,
    pub avatars: FetchSummary,
    pub visualizer_code: Option<i32>,
    pub frames: u64,
    pub timing: Timing,
    pub encoder_code: Option<i32>,
    pub output: PathBuf,
    pub elapsed_secs: f64,
}

/// Build the filter graph and encoder command for `frames` frames.
pub fn plan_encode(config: &ReelConfig, frames: u64) -> EncodePlan {
    let timing = Timing::from_config(frames, config);
    let graph = build_filter_graph(config, &timing);
    let invocation = encoder_invocation(config, &graph);
    EncodePlan {
        timing,
        graph,
        invocation,
    }
}

/// Run the visualizer, producing the raw frame stream.
pub fn render_frames<R: ToolRunner>(config: &ReelConfig, runner: &R) -> ReelResult<ToolOutput> {
    run_announced(runner, &visualizer_invocation(config), config.tools.strict)
}

/// Count frames in the configured frame stream.
pub fn count_rendered_frames(config: &ReelConfig) -> ReelResult<u64> {
    count_frames(
        &config.visualizer.output,
        &FrameFormat::from_config(config),
    )
}

/// Run the encoder for a prepared plan.
pub fn encode<R: ToolRunner>(
    config: &ReelConfig,
    runner: &R,
    plan: &EncodePlan,
) -> ReelResult<ToolOutput> {
    run_announced(runner, &plan.invocation, config.tools.strict)
}

/// Produce the movie described by `config`.
pub async fn run_pipeline<R, S>(
    config: &ReelConfig,
    runner: &R,
    source: &S,
) -> ReelResult<PipelineReport>
where
    R: ToolRunner,
    S: AvatarSource,
{
    let started = Instant::now();
    let started_at = chrono::Utc::now().to_rfc3339();
    tracing::info!(
        title = %config.title,
        output = %config.encoder.output.display(),
        "Starting movie pipeline"
    );

    let avatars = fetch_avatars(runner, source, config).await?;

    let (rendered, frames, plan, encoded) = run_blocking(|| {
        let rendered = render_frames(config, runner)?;

        let frames = count_rendered_frames(config)?;
        println!("{frames}");
        if frames == 0 {
            tracing::warn!(
                path = %config.visualizer.output.display(),
                "Frame stream is empty; the movie will only contain the intro and credits"
            );
        }

        let plan = plan_encode(config, frames);
        tracing::info!(
            frames,
            main_secs = plan.timing.main_secs,
            post_time = plan.timing.post_time,
            audio_duration = plan.timing.audio_duration,
            "Planned composition"
        );
        let encoded = encode(config, runner, &plan)?;
        Ok::<_, ReelError>((rendered, frames, plan, encoded))
    })?;

    let report = PipelineReport {
        started_at,
        avatars,
        visualizer_code: rendered.code,
        frames,
        timing: plan.timing,
        encoder_code: encoded.code,
        output: config.encoder.output.clone(),
        elapsed_secs: started.elapsed().as_secs_f64(),
    };
    tracing::info!(
        elapsed_secs = report.elapsed_secs,
        "Movie pipeline finished"
    );
    Ok(report)
}

/// Run long blocking work without stalling other tasks on a multi-thread
/// runtime. Elsewhere the closure runs inline.
fn run_blocking<T>(work: impl FnOnce() -> T) -> T {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(work)
        }
        _ => work(),
    }
}

/// Print the command, run it, and check the exit code.
///
/// A non-zero exit is only logged unless `strict` is set.
fn run_announced<R: ToolRunner>(
    runner: &R,
    invocation: &Invocation,
    strict: bool,
) -> ReelResult<ToolOutput> {
    println!("{}", invocation.command_line());
    let started = Instant::now();
    let output = runner.run(invocation)?;

    if output.success() {
        tracing::info!(
            program = %invocation.program,
            elapsed_secs = started.elapsed().as_secs_f64(),
            "Tool finished"
        );
        return Ok(output);
    }
    if strict {
        return output.ensure_success(&invocation.program);
    }

    let stderr = output.stderr_lossy();
    tracing::warn!(
        program = %invocation.program,
        status = %output.status_label(),
        stderr = %stderr.trim(),
        "Tool exited unsuccessfully, continuing"
    );
    Ok(output)
}
