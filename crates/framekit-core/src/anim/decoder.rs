use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, Frames, ImageDecoder};
use tracing::{debug, error, info};

use super::frame::Frame;
use crate::error::{Error, Result};

const IMAGE_DESCRIPTOR: u8 = 0x2c;
const EXTENSION_INTRODUCER: u8 = 0x21;
const TRAILER: u8 = 0x3b;

/// Reads the frames of a GIF file one at a time.
pub struct GifFrameReader {
    path: PathBuf,
    /// None for a GIF whose block stream holds no image.
    frames: Option<Frames<'static>>,
    width: u32,
    height: u32,
    frame_count: u32,
}

impl GifFrameReader {
    /// Open a GIF file for decoding.
    pub fn open(path: &Path) -> Result<Self> {
        info!(?path, "opening animated image");

        let file = File::open(path).map_err(|e| {
            error!(?path, %e, "failed to open animated image");
            Error::not_found(path, e)
        })?;
        let mut reader = BufReader::new(file);

        // The gif decoder refuses a stream that reaches the trailer before
        // any image, so an empty animation is recognised up front.
        let empty = scan_empty_gif(&mut reader)
            .and_then(|empty| reader.rewind().map(|_| empty))
            .map_err(|e| Error::not_found(path, e))?;
        if let Some((width, height)) = empty {
            info!(width, height, "animated image has no frames");
            return Ok(Self {
                path: path.to_path_buf(),
                frames: None,
                width,
                height,
                frame_count: 0,
            });
        }

        let decoder = GifDecoder::new(reader).map_err(|e| {
            error!(?path, %e, "not a valid GIF");
            Error::decode(path, e)
        })?;

        let (width, height) = decoder.dimensions();
        info!(width, height, "animated image opened");

        Ok(Self {
            path: path.to_path_buf(),
            frames: Some(decoder.into_frames()),
            width,
            height,
            frame_count: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Decode the next frame, or `None` once the animation is exhausted.
    pub fn next_frame(&mut self) -> Result<Option<Frame>> {
        let Some(decoded) = self.frames.as_mut().and_then(Iterator::next) else {
            info!(total_frames = self.frame_count, "animation ended");
            return Ok(None);
        };

        let decoded = decoded.map_err(|e| {
            error!(frame = self.frame_count, %e, "failed to decode frame");
            Error::decode(&self.path, e)
        })?;

        let (numer, denom) = decoded.delay().numer_denom_ms();
        let delay_ms = if denom > 0 { numer / denom } else { 0 };

        let index = self.frame_count;
        self.frame_count += 1;

        debug!(index, delay_ms, "decoded frame");

        Ok(Some(Frame {
            image: decoded.into_buffer(),
            index,
            delay_ms,
        }))
    }
}

/// Walk the GIF block stream up to the first image or the trailer.
///
/// Returns the logical screen size when the trailer comes first. Anything
/// malformed or truncated yields `None` so the real decoder reports it.
fn scan_empty_gif<R: Read>(r: &mut R) -> io::Result<Option<(u32, u32)>> {
    let mut header = [0u8; 13];
    if !read_or_eof(r, &mut header)? || !header.starts_with(b"GIF") {
        return Ok(None);
    }
    let width = u16::from_le_bytes([header[6], header[7]]) as u32;
    let height = u16::from_le_bytes([header[8], header[9]]) as u32;

    let packed = header[10];
    if packed & 0x80 != 0 {
        let palette_len = 3 * (1u64 << ((packed & 0x07) + 1));
        if !skip(r, palette_len)? {
            return Ok(None);
        }
    }

    loop {
        let mut label = [0u8; 1];
        if !read_or_eof(r, &mut label)? {
            return Ok(None);
        }
        match label[0] {
            TRAILER => return Ok(Some((width, height))),
            EXTENSION_INTRODUCER => {
                // Extension label, then data sub-blocks up to a zero length.
                if !skip(r, 1)? {
                    return Ok(None);
                }
                loop {
                    let mut len = [0u8; 1];
                    if !read_or_eof(r, &mut len)? {
                        return Ok(None);
                    }
                    if len[0] == 0 {
                        break;
                    }
                    if !skip(r, len[0] as u64)? {
                        return Ok(None);
                    }
                }
            }
            IMAGE_DESCRIPTOR => return Ok(None),
            other => {
                debug!(block = other, "unknown GIF block, leaving it to the decoder");
                return Ok(None);
            }
        }
    }
}

/// Fill `buf`, returning false if the stream ends first.
fn read_or_eof<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<bool> {
    match r.read_exact(buf) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

/// Discard `n` bytes, returning false if the stream ends first.
fn skip<R: Read>(r: &mut R, n: u64) -> io::Result<bool> {
    let skipped = io::copy(&mut r.by_ref().take(n), &mut io::sink())?;
    Ok(skipped == n)
}
