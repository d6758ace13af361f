use embedded_graphics::prelude::Point;

/// Where the counter label and the rate rows go on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    row_height: u32,
    margin:     u32,
}

impl RowLayout {
    /// `row_height` is clamped to at least one pixel.
    pub fn new(row_height: u32, margin: u32) -> Self {
        Self {
            row_height: row_height.max(1),
            margin,
        }
    }

    #[inline]
    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    /// Rows that fit a surface `height` pixels tall.
    ///
    /// Row `i` (1-based, below the label) is drawn while
    /// `(i + 1) * row_height < height`.
    pub fn visible_rows(&self, height: u32) -> usize {
        (height.saturating_sub(1) / self.row_height).saturating_sub(1) as usize
    }

    /// Top-left of the filtered-packet label.
    pub fn label_origin(&self) -> Point {
        Point::new(self.margin as i32, self.margin as i32)
    }

    /// Top-left of rate row `row` (0-based).
    pub fn row_origin(&self, row: usize) -> Point {
        let i = row as i64 + 1;
        let rh = i64::from(self.row_height);
        let y = i * rh + rh / 2;
        Point::new(self.margin as i32, y.min(i64::from(i32::MAX)) as i32)
    }
}

impl Default for RowLayout {
    fn default() -> Self {
        Self::new(16, 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_fits_28_rows() {
        assert_eq!(RowLayout::default().visible_rows(480), 28);
    }

    #[test]
    fn rows_never_exceed_height_bound() {
        let layout = RowLayout::default();
        for height in 0..2_000u32 {
            let rows = layout.visible_rows(height);
            let bound = (height / 16).saturating_sub(1) as usize;
            assert!(rows <= bound, "height {height}: {rows} rows > {bound}");
            if rows > 0 {
                // (i + 1) * 16 < height for the last row.
                assert!((rows as u32 + 1) * 16 < height);
            }
        }
    }

    #[test]
    fn tiny_surfaces_have_no_rows() {
        let layout = RowLayout::default();
        assert_eq!(layout.visible_rows(0), 0);
        assert_eq!(layout.visible_rows(32), 0);
        assert_eq!(layout.visible_rows(33), 1);
    }

    #[test]
    fn row_origins_follow_row_height() {
        let layout = RowLayout::default();
        assert_eq!(layout.label_origin(), Point::new(8, 8));
        assert_eq!(layout.row_origin(0), Point::new(8, 24));
        assert_eq!(layout.row_origin(1), Point::new(8, 40));
    }

    #[test]
    fn zero_row_height_is_clamped() {
        let layout = RowLayout::new(0, 0);
        assert_eq!(layout.row_height(), 1);
        assert_eq!(layout.visible_rows(10), 8);
    }
}
