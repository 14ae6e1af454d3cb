//! commit-reel Avatars
//!
//! Reads the commit log of the current repository and caches one
//! gravatar image per author so the visualizer can draw contributor faces.

pub mod authors;
pub mod fetch;
pub mod gravatar;

pub use authors::{parse_authors, read_commit_log, Author};
pub use fetch::{fetch_avatars, AvatarSource, FetchOutcome, FetchSummary, HttpAvatarSource};
pub use gravatar::{avatar_url, gravatar_hash};
