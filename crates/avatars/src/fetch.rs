//! Avatar download and on-disk cache.
//!
//! Files are named `<author>.png` inside the avatar directory, which is the
//! layout gource's `--user-image-dir` expects. An existing file is never
//! refetched. Downloads stream into `<author>.png.part` and are renamed into
//! place once complete, so an interrupted run never leaves a truncated image
//! in the cache.

use std::fs::File;
use std::future::Future;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use reel_common::config::ReelConfig;
use reel_common::error::{ReelError, ReelResult};
use reel_common::process::ToolRunner;

use crate::authors::{parse_authors, read_commit_log, Author};
use crate::gravatar::{avatar_url, gravatar_hash};

/// Result of a single avatar lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// HTTP 200; this many body bytes went to the sink.
    Image(u64),
    /// Any other HTTP status. Nothing was written.
    Missing(u16),
}

/// Source of avatar images keyed by URL.
pub trait AvatarSource {
    /// Look up `url` and stream the image body into `sink`.
    fn fetch<W: Write>(
        &self,
        url: &str,
        sink: &mut W,
    ) -> impl Future<Output = ReelResult<FetchOutcome>>;
}

/// [`AvatarSource`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpAvatarSource {
    client: reqwest::Client,
}

impl HttpAvatarSource {
    pub fn new() -> ReelResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("commit-reel/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl AvatarSource for HttpAvatarSource {
    async fn fetch<W: Write>(&self, url: &str, sink: &mut W) -> ReelResult<FetchOutcome> {
        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Ok(FetchOutcome::Missing(status.as_u16()));
        }

        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            sink.write_all(&chunk)?;
            written += chunk.len() as u64;
        }
        Ok(FetchOutcome::Image(written))
    }
}

/// Counts from one [`fetch_avatars`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Unique authors in the commit log.
    pub authors: usize,
    /// Authors whose avatar file already existed.
    pub cached: usize,
    /// Avatars downloaded and written.
    pub fetched: usize,
    /// Lookups answered with a non-200 status.
    pub missing: usize,
    /// Lookups that failed in transport or while writing the file.
    pub failed: usize,
    /// Authors whose name cannot be used as a file name.
    pub skipped: usize,
}

/// Path of the cached avatar for `author`.
///
/// `None` when the name contains a path separator or is `.`/`..`; gource
/// could never match such a file to the author anyway.
pub fn avatar_path(dir: &Path, author: &Author) -> Option<PathBuf> {
    let name = author.name.as_str();
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0'])
    {
        return None;
    }
    Some(dir.join(format!("{name}.png")))
}

/// Make sure every commit author has an avatar file, downloading the missing
/// ones.
///
/// Only a failure to read the commit log is an error. Per-author failures are
/// logged and skipped.
pub async fn fetch_avatars<R, S>(
    runner: &R,
    source: &S,
    config: &ReelConfig,
) -> ReelResult<FetchSummary>
where
    R: ToolRunner,
    S: AvatarSource,
{
    let dir = &config.avatars.dir;
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }

    let log = read_commit_log(runner, &config.tools.git)?;
    let authors = parse_authors(&log);
    tracing::info!(authors = authors.len(), dir = %dir.display(), "Collected commit authors");

    let mut summary = FetchSummary {
        authors: authors.len(),
        ..Default::default()
    };

    for author in &authors {
        let Some(path) = avatar_path(dir, author) else {
            tracing::debug!(author = %author.name, "Author name is not a usable file name");
            summary.skipped += 1;
            continue;
        };
        if path.exists() {
            summary.cached += 1;
            continue;
        }

        let url = avatar_url(
            &config.avatars.base_url,
            &gravatar_hash(&author.email),
            config.avatars.size,
        );
        println!(
            "fetching image for \"{}\" {} ({})...",
            author.name, author.email, url
        );

        match fetch_one(source, &url, &path).await {
            Ok(FetchOutcome::Image(bytes)) => {
                tracing::debug!(author = %author.name, bytes, "Avatar saved");
                summary.fetched += 1;
            }
            Ok(FetchOutcome::Missing(status)) => {
                tracing::debug!(author = %author.name, status, "No avatar available");
                summary.missing += 1;
            }
            Err(err) => {
                tracing::debug!(author = %author.name, error = %err, "Avatar fetch failed");
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        fetched = summary.fetched,
        cached = summary.cached,
        missing = summary.missing,
        failed = summary.failed,
        skipped = summary.skipped,
        "Avatar fetch finished"
    );
    Ok(summary)
}

async fn fetch_one<S: AvatarSource>(
    source: &S,
    url: &str,
    path: &Path,
) -> ReelResult<FetchOutcome> {
    let partial = path.with_extension("png.part");
    let result = download(source, url, &partial).await;

    match result {
        Ok(FetchOutcome::Image(bytes)) => {
            std::fs::rename(&partial, path).map_err(|e| {
                ReelError::avatar(format!("Failed to move {} into place: {e}", path.display()))
            })?;
            Ok(FetchOutcome::Image(bytes))
        }
        other => {
            let _ = std::fs::remove_file(&partial);
            other
        }
    }
}

async fn download<S: AvatarSource>(
    source: &S,
    url: &str,
    partial: &Path,
) -> ReelResult<FetchOutcome> {
    let file = File::create(partial).map_err(|e| {
        ReelError::avatar(format!("Failed to create {}: {e}", partial.display()))
    })?;
    let mut sink = BufWriter::new(file);
    let outcome = source.fetch(url, &mut sink).await?;
    sink.flush()?;
    Ok(outcome)
}
