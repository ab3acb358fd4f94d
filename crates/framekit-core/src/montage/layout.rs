use crate::rect::PixelRect;

/// Rows in the montage grid.
pub const ROWS: u32 = 3;
/// Columns in the montage grid.
pub const COLS: u32 = 5;
/// Number of cells, and of input images.
pub const CELL_COUNT: u32 = ROWS * COLS;

/// Canvas size: a 15x9 inch figure at 100 dpi.
pub const CANVAS_WIDTH: u32 = 1500;
pub const CANVAS_HEIGHT: u32 = 900;

/// Gap between cells and around the edge of the canvas.
const PADDING: u32 = 10;
/// Height of the title band at the top of each cell.
pub const TITLE_HEIGHT: u32 = 30;

/// Grid cell for the 1-based image number `n`, filled row-major.
pub fn cell_position(n: u32) -> (u32, u32) {
    assert!(
        (1..=CELL_COUNT).contains(&n),
        "image number {n} outside 1..={CELL_COUNT}"
    );
    ((n - 1) / COLS, (n - 1) % COLS)
}

/// Fixed 3x5 cell geometry on the montage canvas.
#[derive(Debug, Clone, Copy)]
pub struct GridLayout {
    cell_w: u32,
    cell_h: u32,
}

impl GridLayout {
    pub fn new() -> Self {
        Self {
            cell_w: (CANVAS_WIDTH - PADDING * (COLS + 1)) / COLS,
            cell_h: (CANVAS_HEIGHT - PADDING * (ROWS + 1)) / ROWS,
        }
    }

    /// Whole cell: title band plus image area.
    pub fn cell_rect(&self, row: u32, col: u32) -> PixelRect {
        assert!(row < ROWS && col < COLS, "cell ({row}, {col}) outside grid");
        PixelRect {
            x: PADDING + col * (self.cell_w + PADDING),
            y: PADDING + row * (self.cell_h + PADDING),
            w: self.cell_w,
            h: self.cell_h,
        }
    }

    pub fn title_rect(&self, row: u32, col: u32) -> PixelRect {
        let cell = self.cell_rect(row, col);
        PixelRect { h: TITLE_HEIGHT, ..cell }
    }

    /// Region an image of `src_w`x`src_h` occupies in the cell, aspect preserved.
    pub fn image_rect(&self, row: u32, col: u32, src_w: u32, src_h: u32) -> PixelRect {
        let cell = self.cell_rect(row, col);
        let area = PixelRect {
            x: cell.x,
            y: cell.y + TITLE_HEIGHT,
            w: cell.w,
            h: cell.h - TITLE_HEIGHT,
        };
        area.fit(src_w, src_h)
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_position_is_row_major() {
        assert_eq!(cell_position(1), (0, 0));
        assert_eq!(cell_position(5), (0, 4));
        assert_eq!(cell_position(6), (1, 0));
        assert_eq!(cell_position(12), (2, 1));
        assert_eq!(cell_position(15), (2, 4));
    }

    #[test]
    #[should_panic]
    fn cell_position_rejects_sixteen() {
        cell_position(16);
    }

    #[test]
    fn cells_stay_on_canvas_and_do_not_overlap() {
        let layout = GridLayout::new();
        let rects: Vec<PixelRect> = (1..=CELL_COUNT)
            .map(|n| {
                let (row, col) = cell_position(n);
                layout.cell_rect(row, col)
            })
            .collect();

        for r in &rects {
            assert!(r.x + r.w <= CANVAS_WIDTH);
            assert!(r.y + r.h <= CANVAS_HEIGHT);
        }
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                let disjoint = a.x + a.w <= b.x
                    || b.x + b.w <= a.x
                    || a.y + a.h <= b.y
                    || b.y + b.h <= a.y;
                assert!(disjoint, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn image_sits_below_title() {
        let layout = GridLayout::new();
        let title = layout.title_rect(1, 2);
        let image = layout.image_rect(1, 2, 40, 30);
        assert!(image.y >= title.y + title.h);
        let cell = layout.cell_rect(1, 2);
        assert!(image.x >= cell.x && image.x + image.w <= cell.x + cell.w);
        assert!(image.y + image.h <= cell.y + cell.h);
    }
}
