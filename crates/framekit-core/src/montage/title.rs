use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::rect::PixelRect;

/// Fonts tried in order when no explicit font is given.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const TEXT_SCALE: f32 = 22.0;
const TEXT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Draws cell titles.
pub struct TitleRenderer {
    font: FontVec,
}

impl TitleRenderer {
    /// Load `font_path`, or the first usable system font when it is None.
    pub fn new(font_path: Option<&Path>) -> Result<Self> {
        let font = match font_path {
            Some(path) => load_font(path)?,
            None => find_system_font()?,
        };
        Ok(Self { font })
    }

    /// Draw `text` centered in `rect`.
    pub fn draw(&self, img: &mut RgbaImage, rect: PixelRect, text: &str) {
        let scale = PxScale::from(TEXT_SCALE);
        let (text_w, text_h) = text_size(scale, &self.font, text);
        let x = rect.x as i32 + (rect.w as i32 - text_w as i32) / 2;
        let y = rect.y as i32 + (rect.h as i32 - text_h as i32) / 2;
        draw_text_mut(img, TEXT_COLOR, x, y, scale, &self.font, text);
        debug!(text, x, y, "drew title");
    }
}

fn load_font(path: &Path) -> Result<FontVec> {
    let data = std::fs::read(path).map_err(|e| Error::not_found(path, e))?;
    let font = FontVec::try_from_vec(data).map_err(|source| Error::Font {
        path: path.to_path_buf(),
        source,
    })?;
    info!(?path, "loaded title font");
    Ok(font)
}

fn find_system_font() -> Result<FontVec> {
    for candidate in FONT_CANDIDATES {
        let path = Path::new(candidate);
        if !path.is_file() {
            continue;
        }
        match load_font(path) {
            Ok(font) => return Ok(font),
            Err(e) => warn!(?path, error = %e, "skipping unusable system font"),
        }
    }
    Err(Error::NoFont {
        searched: FONT_CANDIDATES.iter().map(|p| p.to_string()).collect(),
    })
}
