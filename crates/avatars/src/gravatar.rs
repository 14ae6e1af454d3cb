//! Gravatar-style URL construction.

use md5::{Digest, Md5};

/// Lowercase hex MD5 of the trimmed, lowercased email.
pub fn gravatar_hash(email: &str) -> String {
    let digest = Md5::digest(email.trim().to_lowercase().as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

/// Avatar URL that answers 404 instead of serving a default image.
pub fn avatar_url(base_url: &str, hash: &str, size: u32) -> String {
    format!(
        "{}/{hash}?d=404&size={size}",
        base_url.trim_end_matches('/')
    )
}
