use image::RgbaImage;

/// A single composited frame of an animated image.
pub struct Frame {
    /// The full-canvas frame image.
    pub image: RgbaImage,
    /// Position of the frame in decode order (0-based).
    pub index: u32,
    /// How long the frame is displayed, in milliseconds.
    pub delay_ms: u32,
}
