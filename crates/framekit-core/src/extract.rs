use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::anim::decoder::GifFrameReader;
use crate::error::{Error, Result};

/// Parameters for frame extraction.
pub struct ExtractConfig {
    /// Prefix of every written file: `{base_name}_{index}.png`.
    pub base_name: String,
    /// Directory the frame files are written to. Created if missing.
    pub output_dir: PathBuf,
}

impl ExtractConfig {
    /// Config that names frames after the input's file stem and writes next to it.
    pub fn for_input(input: &Path) -> Self {
        let base_name = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output_dir = input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            base_name,
            output_dir,
        }
    }
}

pub fn frame_file_name(base: &str, index: u32) -> String {
    format!("{base}_{index}.png")
}

/// Write every frame of `input` as a separate PNG file.
///
/// Frames are decoded and written one at a time, in decode order. Existing
/// files with the same name are overwritten. On failure, frames written so
/// far are left in place. Returns the number of frames written.
pub fn extract_frames(input: &Path, config: &ExtractConfig) -> Result<usize> {
    info!(
        ?input,
        base_name = %config.base_name,
        output_dir = ?config.output_dir,
        "frame extraction starting"
    );

    let mut reader = GifFrameReader::open(input)?;

    if !config.output_dir.as_os_str().is_empty() {
        std::fs::create_dir_all(&config.output_dir)
            .map_err(|e| Error::write(&config.output_dir, e))?;
    }

    let mut written = 0;
    while let Some(frame) = reader.next_frame()? {
        let path = config
            .output_dir
            .join(frame_file_name(&config.base_name, frame.index));
        frame
            .image
            .save(&path)
            .map_err(|e| Error::write(&path, e))?;
        debug!(?path, index = frame.index, "wrote frame");
        written += 1;
    }

    info!(
        frames = written,
        width = reader.width(),
        height = reader.height(),
        "frame extraction complete"
    );
    Ok(written)
}
