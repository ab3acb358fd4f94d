/// A rectangle in absolute pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl PixelRect {
    /// Center point, rounded toward the top-left.
    #[cfg(test)]
    pub(crate) fn center(self) -> (u32, u32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Largest rect with the aspect ratio of `src_w`x`src_h` that fits inside
    /// this one, centered.
    pub fn fit(self, src_w: u32, src_h: u32) -> PixelRect {
        assert!(src_w > 0 && src_h > 0, "source size must be > 0");
        let scale = (self.w as f64 / src_w as f64).min(self.h as f64 / src_h as f64);
        let w = ((src_w as f64 * scale).round() as u32).clamp(1, self.w.max(1));
        let h = ((src_h as f64 * scale).round() as u32).clamp(1, self.h.max(1));
        PixelRect {
            x: self.x + (self.w.saturating_sub(w)) / 2,
            y: self.y + (self.h.saturating_sub(h)) / 2,
            w,
            h,
        }
    }
}
