use std::path::PathBuf;

use reel_render_engine::{count_frames, FrameFormat};

fn format() -> FrameFormat {
    FrameFormat {
        width: 64,
        height: 64,
        generator_comment: "# Generated by Gource".to_string(),
    }
}

fn record(format: &FrameFormat) -> Vec<u8> {
    let mut out = format.header_lines().concat();
    out.extend(std::iter::repeat(0xff).take(format.payload_bytes() as usize));
    out
}

fn scratch_file(name: &str, data: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("reel_frames_{name}_{}.ppm", std::process::id()));
    std::fs::write(&path, data).unwrap();
    path
}

#[test]
fn counts_every_well_formed_record() {
    let format = format();
    for n in [0usize, 1, 7] {
        let path = scratch_file(&format!("ok{n}"), &record(&format).repeat(n));
        assert_eq!(count_frames(&path, &format).unwrap(), n as u64);
        std::fs::remove_file(&path).ok();
    }
}

#[test]
fn stops_before_malformed_header() {
    let format = format();
    let mut data = record(&format).repeat(4);
    data.extend_from_slice(b"P6\n# Generated by something else\n64 64\n255\n");
    data.extend(record(&format));

    let path = scratch_file("bad", &data);
    assert_eq!(count_frames(&path, &format).unwrap(), 4);
    std::fs::remove_file(&path).ok();
}

#[test]
fn production_format_rejects_small_frames() {
    let small = format();
    let production = FrameFormat {
        width: 1920,
        height: 1080,
        ..format()
    };

    let path = scratch_file("mismatch", &record(&small).repeat(3));
    assert_eq!(count_frames(&path, &production).unwrap(), 0);
    std::fs::remove_file(&path).ok();
}
