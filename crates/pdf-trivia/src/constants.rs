//! Shared constants for card layout
//!
//! This module centralizes magic numbers and constants used throughout
//! the layout and rendering process.

use crate::render::Color;
use crate::types::QUESTIONS_PER_CARD;

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Badge Colors
// =============================================================================

/// Badge color for each question slot on a card.
///
/// Colors belong to the slot, not to the subject code: slot 0 is always
/// yellow no matter which subject sits there.
pub const POSITION_COLORS: [Color; QUESTIONS_PER_CARD] = [
    Color::rgb(0xFF, 0xD7, 0x00), // Yellow
    Color::rgb(0x22, 0x8B, 0x22), // Green
    Color::rgb(0xFF, 0x69, 0xB4), // Pink
    Color::rgb(0x8B, 0x45, 0x13), // Brown
    Color::rgb(0x00, 0x66, 0xCC), // Blue
    Color::rgb(0xFF, 0x8C, 0x00), // Orange
];

/// Ink color for borders and body text
pub const INK: Color = Color::rgb(0x00, 0x00, 0x00);

/// Label color inside filled badges
pub const BADGE_LABEL: Color = Color::rgb(0xFF, 0xFF, 0xFF);

// =============================================================================
// Typography
// =============================================================================

/// Line height multiplier for the six-question layout
pub const ROW_LINE_HEIGHT: f32 = 1.2;

/// Line height multiplier for the single-question layout
pub const BODY_LINE_HEIGHT: f32 = 1.25;

/// Maximum wrapped lines per question row
pub const MAX_LINES_PER_ROW: usize = 2;

/// Cap height of the standard sans fonts as a fraction of the font size,
/// used to center text optically on a point
pub const CAP_HEIGHT_RATIO: f32 = 0.718;

/// Suffix appended to the level in the header of an answer face
pub const ANSWER_HEADER_SUFFIX: &str = " - ANSWERS";

// =============================================================================
// Bezier Curve Constants
// =============================================================================

/// Control point factor for approximating circles with Bezier curves.
/// This magic number comes from: 4 * (sqrt(2) - 1) / 3 ≈ 0.552284749831
pub const BEZIER_CIRCLE_FACTOR: f32 = 0.552284749831;
