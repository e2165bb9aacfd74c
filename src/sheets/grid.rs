//! Grid layout engine
//!
//! Computes where the k-th receipt on a page lands for a fixed page size and
//! N-per-page grid. All coordinates are PDF points with the origin at the
//! bottom-left of the page; cells fill left-to-right, top-to-bottom below the
//! title band. Every function here is a pure function of the geometry and the
//! index, so cells can be computed in any order.

/// Fixed page geometry for receipt sheets
///
/// Defaults to A4 (595.28 x 841.89 pt) with a 3x3 grid, and must stay
/// bit-for-bit stable: generated sheets are diffed across runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub gap: f32,
    pub cols: usize,
    pub rows: usize,
    /// Vertical space reserved at the top of each page for the title line
    pub title_band: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width: 595.28,
            page_height: 841.89,
            margin: 25.0,
            gap: 10.0,
            cols: 3,
            rows: 3,
            title_band: 40.0,
        }
    }
}

impl PageGeometry {
    /// Number of grid cells per page
    pub fn slots_per_page(&self) -> usize {
        self.cols * self.rows
    }

    /// Width of a single cell
    pub fn cell_width(&self) -> f32 {
        (self.page_width - 2.0 * self.margin - self.gap * (self.cols as f32 - 1.0))
            / self.cols as f32
    }

    /// Height of a single cell
    pub fn cell_height(&self) -> f32 {
        (self.page_height - 2.0 * self.margin - self.title_band) / self.rows as f32
    }

    /// Bottom-left origin of the cell for a zero-based index within a page
    ///
    /// `index_in_page` must be `< slots_per_page()`; indices past the end of
    /// a row wrap to the next row.
    pub fn cell_origin(&self, index_in_page: usize) -> (f32, f32) {
        let col = index_in_page % self.cols;
        let row = (index_in_page / self.cols) % self.rows;

        let x = self.margin + col as f32 * (self.cell_width() + self.gap);
        // 35 = margin + 10 pt of clearance under the 40 pt title band
        let y = self.page_height
            - self.margin
            - 35.0
            - (row as f32 + 1.0) * (self.cell_height() + self.gap)
            + self.gap;

        (x, y)
    }

    /// Zero-based page a given placed index lands on
    pub fn page_index(&self, placed_index: usize) -> usize {
        placed_index / self.slots_per_page()
    }

    /// Number of pages needed for a count of placed items
    pub fn pages_for(&self, placed_count: usize) -> usize {
        placed_count.div_ceil(self.slots_per_page())
    }
}
