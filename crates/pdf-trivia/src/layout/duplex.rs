//! Duplex back-page mapping
//!
//! When a sheet is printed on both sides and flipped, a card's back face
//! sits behind a different grid slot than its front face. This module maps
//! each front slot to the back slot (and orientation) that ends up directly
//! behind it after the sheet is flipped and cut.

use crate::types::PrintMode;

use super::{BackSlot, GridPosition};

/// Back-page slot for the card at `pos` on the front page.
///
/// Returns `None` for single-sided printing, which has no back page.
///
/// - Long edge: rows reverse and the card is turned 180° about its center.
/// - Short edge: columns reverse and the card stays upright.
///
/// `pos` must lie inside a non-empty `cols` × `rows` grid.
pub fn back_slot(pos: GridPosition, cols: usize, rows: usize, mode: PrintMode) -> Option<BackSlot> {
    debug_assert!(
        pos.row < rows && pos.col < cols,
        "{:?} outside {}x{} grid",
        pos,
        cols,
        rows
    );
    match mode {
        PrintMode::SingleSided => None,
        PrintMode::DuplexLongEdge => Some(BackSlot {
            grid_pos: GridPosition::new(rows - 1 - pos.row, pos.col),
            rotated: true,
        }),
        PrintMode::DuplexShortEdge => Some(BackSlot {
            grid_pos: GridPosition::new(pos.row, cols - 1 - pos.col),
            rotated: false,
        }),
    }
}
