//! Frame counting for raw PPM streams.
//!
//! The visualizer writes one binary PPM (`P6`) image per frame, back to
//! back. Each record is a four-line ASCII header followed by
//! `width * height * 3` bytes of RGB data. Only the headers are read; pixel
//! data is skipped with a seek.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use reel_common::config::ReelConfig;
use reel_common::error::{ReelError, ReelResult};

/// Expected layout of every record in a frame stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameFormat {
    pub width: u32,
    pub height: u32,
    /// Comment line without its trailing newline, e.g. `# Generated by Gource`.
    pub generator_comment: String,
}

impl FrameFormat {
    pub fn from_config(config: &ReelConfig) -> Self {
        Self {
            width: config.video.width,
            height: config.video.height,
            generator_comment: config.visualizer.generator_comment.clone(),
        }
    }

    /// The four header lines, newline included, as raw bytes.
    pub fn header_lines(&self) -> [Vec<u8>; 4] {
        [
            b"P6\n".to_vec(),
            format!("{}\n", self.generator_comment).into_bytes(),
            format!("{} {}\n", self.width, self.height).into_bytes(),
            b"255\n".to_vec(),
        ]
    }

    /// RGB payload size of one frame.
    pub fn payload_bytes(&self) -> u64 {
        self.width as u64 * self.height as u64 * 3
    }
}

/// Count frames in the stream at `path`.
pub fn count_frames(path: &Path, format: &FrameFormat) -> ReelResult<u64> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ReelError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => ReelError::Io(e),
    })?;
    let frames = count_frames_in(&mut BufReader::new(file), format)?;
    tracing::debug!(path = %path.display(), frames, "Counted frames");
    Ok(frames)
}

/// Count records until the first header that does not match `format`.
///
/// A mismatching or missing header ends the stream; it is not an error.
/// A short final payload still counts because its header was valid.
pub fn count_frames_in<R: BufRead + Seek>(reader: &mut R, format: &FrameFormat) -> ReelResult<u64> {
    let expected = format.header_lines();
    let skip = i64::try_from(format.payload_bytes())
        .map_err(|_| ReelError::config("frame payload size overflows a seek offset"))?;

    let mut line = Vec::with_capacity(64);
    let mut frames = 0u64;
    while read_header(reader, &expected, &mut line)? {
        frames += 1;
        reader.seek(SeekFrom::Current(skip))?;
    }
    Ok(frames)
}

fn read_header<R: BufRead>(
    reader: &mut R,
    expected: &[Vec<u8>; 4],
    line: &mut Vec<u8>,
) -> std::io::Result<bool> {
    for want in expected {
        line.clear();
        reader.read_until(b'\n', line)?;
        if line.as_slice() != want.as_slice() {
            return Ok(false);
        }
    }
    Ok(true)
}
