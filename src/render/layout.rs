use super::Rect;
use crate::weeks::{ROWS, WEEKS_PER_ROW};

// US Letter in points.
pub const LETTER_WIDTH: f32 = 612.0;
pub const LETTER_HEIGHT: f32 = 792.0;

const SIDE_MARGIN: f32 = 36.0;
const TOP_MARGIN: f32 = 54.0;
const BOTTOM_MARGIN: f32 = 54.0;
const BELOW_GRID_SPACE: f32 = 50.0;
// Room for title, subtitle, verse and explanation above the grid.
const HEADER_HEIGHT: f32 = 60.0;
const DECADE_GAP_RATIO: f32 = 0.35;
const ROWS_PER_DECADE: u32 = 10;

/// Page geometry. All values are points with the origin in the lower left
/// corner, as in PDF.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub title_y: f32,
    pub cell: f32,
    pub decade_gap: f32,
    pub grid_left: f32,
    pub grid_top: f32,
    pub grid_bottom_min: f32,
}

impl GridLayout {
    pub fn letter() -> Self {
        GridLayout::for_page(LETTER_WIDTH, LETTER_HEIGHT)
    }

    pub fn for_page(page_width: f32, page_height: f32) -> Self {
        let title_y = page_height - TOP_MARGIN;
        let grid_top_max = title_y - HEADER_HEIGHT;
        let grid_bottom_min = BOTTOM_MARGIN + BELOW_GRID_SPACE;

        let available_height = grid_top_max - grid_bottom_min;
        let available_width = page_width - 2.0 * SIDE_MARGIN;

        let mut cell = (available_width / WEEKS_PER_ROW as f32).min(available_height / ROWS as f32);
        let mut decade_gap = cell * DECADE_GAP_RATIO;

        let needed = Self::height_for(cell, decade_gap);
        if needed > available_height {
            let scale = available_height / needed;
            cell *= scale;
            decade_gap *= scale;
        }

        let grid_top = grid_bottom_min + Self::height_for(cell, decade_gap);
        let grid_left = (page_width - WEEKS_PER_ROW as f32 * cell) / 2.0;

        GridLayout {
            page_width,
            page_height,
            title_y,
            cell,
            decade_gap,
            grid_left,
            grid_top,
            grid_bottom_min,
        }
    }

    fn height_for(cell: f32, decade_gap: f32) -> f32 {
        ROWS as f32 * cell + (ROWS / ROWS_PER_DECADE - 1) as f32 * decade_gap
    }

    pub fn grid_width(&self) -> f32 {
        WEEKS_PER_ROW as f32 * self.cell
    }

    pub fn grid_height(&self) -> f32 {
        Self::height_for(self.cell, self.decade_gap)
    }

    pub fn grid_right(&self) -> f32 {
        self.grid_left + self.grid_width()
    }

    pub fn center_x(&self) -> f32 {
        self.page_width / 2.0
    }

    /// Lower edge of `row`.
    pub fn row_y(&self, row: u32) -> f32 {
        let decades = row / ROWS_PER_DECADE;
        self.grid_top - (row + 1) as f32 * self.cell - decades as f32 * self.decade_gap
    }

    pub fn cell_rect(&self, row: u32, col: u32) -> Rect {
        Rect {
            x: self.grid_left + col as f32 * self.cell,
            y: self.row_y(row),
            width: self.cell,
            height: self.cell,
        }
    }
}
