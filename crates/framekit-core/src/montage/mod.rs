pub mod layout;
pub mod title;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{ImageReader, Rgba, RgbaImage};
use tracing::{debug, error, info};

use crate::error::{Error, Result};
use layout::{cell_position, GridLayout, CANVAS_HEIGHT, CANVAS_WIDTH, CELL_COUNT};
use title::TitleRenderer;

/// Figure background (`#EE7272`).
pub const BACKGROUND: Rgba<u8> = Rgba([0xee, 0x72, 0x72, 0xff]);

/// Parameters for montage assembly.
pub struct MontageConfig {
    /// Identifier in `kalman_{image_name}_{n}.png`.
    pub image_name: String,
    /// Directory holding the 15 input images.
    pub input_dir: PathBuf,
    /// Directory the montage is written to. Created if missing.
    pub output_dir: PathBuf,
    /// Font for the cell titles, or None to use the first usable system font.
    pub font_path: Option<PathBuf>,
}

pub fn input_file_name(image_name: &str, n: u32) -> String {
    format!("kalman_{image_name}_{n}.png")
}

pub fn output_file_name(image_name: &str) -> String {
    format!("kalman_{image_name}_subplots.png")
}

/// Compose the 15 input images into one titled 3x5 grid and write it.
///
/// Every input is checked and loaded before anything is written, so a
/// missing or broken input leaves no output behind. Returns the path of the
/// written montage.
pub fn assemble_montage(config: &MontageConfig) -> Result<PathBuf> {
    info!(
        image_name = %config.image_name,
        input_dir = ?config.input_dir,
        output_dir = ?config.output_dir,
        "montage assembly starting"
    );

    let paths: Vec<PathBuf> = (1..=CELL_COUNT)
        .map(|n| config.input_dir.join(input_file_name(&config.image_name, n)))
        .collect();

    for path in &paths {
        if let Err(e) = std::fs::metadata(path) {
            error!(?path, %e, "montage input missing");
            return Err(Error::not_found(path, e));
        }
    }

    let images = paths
        .iter()
        .map(|path| load_image(path))
        .collect::<Result<Vec<_>>>()?;

    let titles = TitleRenderer::new(config.font_path.as_deref())?;
    let canvas = render_montage(&images, &titles);

    if !config.output_dir.as_os_str().is_empty() {
        std::fs::create_dir_all(&config.output_dir)
            .map_err(|e| Error::write(&config.output_dir, e))?;
    }

    let output = config.output_dir.join(output_file_name(&config.image_name));
    canvas
        .save(&output)
        .map_err(|e| Error::write(&output, e))?;

    info!(
        ?output,
        width = canvas.width(),
        height = canvas.height(),
        "montage written"
    );
    Ok(output)
}

fn load_image(path: &Path) -> Result<RgbaImage> {
    let file = File::open(path).map_err(|e| Error::not_found(path, e))?;
    let image = ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(|e| Error::not_found(path, e))?
        .decode()
        .map_err(|e| {
            error!(?path, %e, "failed to decode montage input");
            Error::decode(path, e)
        })?;
    debug!(?path, width = image.width(), height = image.height(), "loaded montage input");
    Ok(image.into_rgba8())
}

/// Lay `images` out row-major on the grid, image `i` under "Frame {i+1}".
pub fn render_montage(images: &[RgbaImage], titles: &TitleRenderer) -> RgbaImage {
    assert_eq!(
        images.len(),
        CELL_COUNT as usize,
        "montage needs exactly {CELL_COUNT} images"
    );

    let layout = GridLayout::new();
    let mut canvas = RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND);

    for (n, image) in (1..=CELL_COUNT).zip(images) {
        let (row, col) = cell_position(n);

        titles.draw(&mut canvas, layout.title_rect(row, col), &format!("Frame {n}"));

        if image.width() == 0 || image.height() == 0 {
            continue;
        }
        let rect = layout.image_rect(row, col, image.width(), image.height());
        let scaled = imageops::resize(image, rect.w, rect.h, FilterType::Triangle);
        imageops::overlay(&mut canvas, &scaled, rect.x as i64, rect.y as i64);
        debug!(n, row, col, ?rect, "placed image");
    }

    canvas
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use tracing_test::traced_test;

    use super::*;

    fn color(n: u32) -> Rgba<u8> {
        Rgba([(n * 16) as u8, (255 - n * 16) as u8, ((n * 37) % 256) as u8, 255])
    }

    fn write_inputs(dir: &Path, name: &str) {
        for n in 1..=CELL_COUNT {
            let image = RgbaImage::from_pixel(40, 30, color(n));
            image.save(dir.join(input_file_name(name, n))).unwrap();
        }
    }

    fn config(dir: &TempDir, name: &str) -> MontageConfig {
        MontageConfig {
            image_name: name.to_string(),
            input_dir: dir.path().to_path_buf(),
            output_dir: dir.path().join("out"),
            font_path: None,
        }
    }

    fn assert_close(actual: &Rgba<u8>, expected: Rgba<u8>) {
        for (a, e) in actual.0.iter().zip(expected.0) {
            assert!(a.abs_diff(e) <= 1, "pixel {actual:?} differs from {expected:?}");
        }
    }

    #[test]
    fn file_names_follow_convention() {
        assert_eq!(input_file_name("test", 1), "kalman_test_1.png");
        assert_eq!(input_file_name("test", 15), "kalman_test_15.png");
        assert_eq!(output_file_name("test"), "kalman_test_subplots.png");
    }

    #[test]
    #[traced_test]
    fn assembles_grid_in_row_major_order() {
        let dir = TempDir::new().unwrap();
        write_inputs(dir.path(), "test");
        let config = config(&dir, "test");

        let output = assemble_montage(&config).unwrap();
        assert_eq!(output, config.output_dir.join("kalman_test_subplots.png"));
        assert_eq!(std::fs::read_dir(&config.output_dir).unwrap().count(), 1);

        let montage = image::open(&output).unwrap().into_rgba8();
        assert_eq!(montage.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
        assert_eq!(*montage.get_pixel(0, 0), BACKGROUND);

        let layout = GridLayout::new();
        for n in 1..=CELL_COUNT {
            let (row, col) = cell_position(n);
            let (x, y) = layout.image_rect(row, col, 40, 30).center();
            assert_close(montage.get_pixel(x, y), color(n));
        }

        let (x, y) = layout.image_rect(1, 0, 40, 30).center();
        assert_close(montage.get_pixel(x, y), color(6));
    }

    #[test]
    fn missing_input_fails_before_output() {
        let dir = TempDir::new().unwrap();
        write_inputs(dir.path(), "test");
        std::fs::remove_file(dir.path().join(input_file_name("test", 7))).unwrap();
        let config = config(&dir, "test");

        let err = assemble_montage(&config).unwrap_err();
        match err {
            Error::NotFound { path, .. } => {
                assert!(path.ends_with("kalman_test_7.png"), "wrong path {path:?}")
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(!config.output_dir.join(output_file_name("test")).exists());
    }

    #[test]
    fn undecodable_input_fails_before_output() {
        let dir = TempDir::new().unwrap();
        write_inputs(dir.path(), "test");
        std::fs::write(dir.path().join(input_file_name("test", 15)), b"junk").unwrap();
        let config = config(&dir, "test");

        let err = assemble_montage(&config).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }), "got {err:?}");
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn missing_font_fails_before_output() {
        let dir = TempDir::new().unwrap();
        write_inputs(dir.path(), "test");
        let mut config = config(&dir, "test");
        config.font_path = Some(dir.path().join("nope.ttf"));

        let err = assemble_montage(&config).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn transparent_pixels_show_background() {
        let mut images: Vec<RgbaImage> = (1..=CELL_COUNT)
            .map(|n| RgbaImage::from_pixel(20, 20, color(n)))
            .collect();
        images[0] = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 0]));
        let titles = TitleRenderer::new(None).unwrap();

        let canvas = render_montage(&images, &titles);
        let layout = GridLayout::new();
        let (x, y) = layout.image_rect(0, 0, 20, 20).center();
        assert_eq!(*canvas.get_pixel(x, y), BACKGROUND);
        let (x, y) = layout.image_rect(0, 1, 20, 20).center();
        assert_close(canvas.get_pixel(x, y), color(2));
    }
}
