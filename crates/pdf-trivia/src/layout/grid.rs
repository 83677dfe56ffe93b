//! Grid layout calculation
//!
//! This module handles the geometric layout of the card grid on a page.
//! `GridGeometry::cell_position` is the only place that turns a logical
//! slot into page coordinates; front and back pages both go through it.

use crate::options::LayoutConfig;
use crate::types::{Result, TriviaError};

use super::{GridPosition, Rect};

// =============================================================================
// Grid Creation
// =============================================================================

/// Page and card dimensions for a layout configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub card_width: f32,
    pub card_height: f32,
    pub cols: usize,
    pub rows: usize,
    pub margin: f32,
    pub gutter_x: f32,
    pub gutter_y: f32,
}

/// Compute the grid geometry for a configuration.
///
/// Fails with `TriviaError::Geometry` when margins and gutters leave no
/// positive width or height for the cards.
pub fn grid_geometry(config: &LayoutConfig) -> Result<GridGeometry> {
    if config.cols == 0 || config.rows == 0 {
        return Err(TriviaError::Geometry(format!(
            "Grid must have at least one column and one row (got {}x{})",
            config.cols, config.rows
        )));
    }

    let total_gutter_x = config.gutter_x * (config.cols - 1) as f32;
    let total_gutter_y = config.gutter_y * (config.rows - 1) as f32;

    let usable_width = config.page_width - 2.0 * config.margin - total_gutter_x;
    let usable_height = config.page_height - 2.0 * config.margin - total_gutter_y;

    if usable_width <= 0.0 || usable_height <= 0.0 {
        return Err(TriviaError::Geometry(format!(
            "Margins and gutters consume the whole page (usable area {:.1}x{:.1}pt)",
            usable_width, usable_height
        )));
    }

    Ok(GridGeometry {
        page_width: config.page_width,
        page_height: config.page_height,
        card_width: usable_width / config.cols as f32,
        card_height: usable_height / config.rows as f32,
        cols: config.cols,
        rows: config.rows,
        margin: config.margin,
        gutter_x: config.gutter_x,
        gutter_y: config.gutter_y,
    })
}

// =============================================================================
// Cell Calculations
// =============================================================================

impl GridGeometry {
    /// Lower-left corner of the cell at `pos`.
    ///
    /// Row 0 is the topmost row; y grows upwards from the page bottom.
    pub fn cell_position(&self, pos: GridPosition) -> (f32, f32) {
        let x = self.margin + pos.col as f32 * (self.card_width + self.gutter_x);
        let y = self.page_height
            - self.margin
            - (pos.row + 1) as f32 * self.card_height
            - pos.row as f32 * self.gutter_y;
        (x, y)
    }

    /// Bounds of the cell at `pos`
    pub fn cell_bounds(&self, pos: GridPosition) -> Rect {
        let (x, y) = self.cell_position(pos);
        Rect::new(x, y, self.card_width, self.card_height)
    }

    /// All grid positions in row-major order (row 0 first, left to right)
    pub fn positions(&self) -> impl Iterator<Item = GridPosition> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| GridPosition::new(row, col)))
    }

    /// Total number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }
}

// =============================================================================
// Tests
// =============================================================================
