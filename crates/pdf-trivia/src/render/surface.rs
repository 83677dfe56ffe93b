//! Drawing surface abstraction
//!
//! The renderers only ever talk to a `DocumentSurface`; encoding the
//! drawing into document bytes is the surface's job.

use crate::layout::Rect;
use crate::types::Result;

/// RGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to 0.0..=1.0
    pub fn components(self) -> [f32; 3] {
        [self.r, self.g, self.b].map(|c| c as f32 / 255.0)
    }
}

/// A paginated drawing target with a bottom-up coordinate system in points
pub trait DocumentSurface {
    /// Finalized document produced by `finish`
    type Output;

    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);
    fn set_font(&mut self, name: &str, size: f32) -> Result<()>;

    fn rounded_rect(&mut self, rect: Rect, radius: f32, stroke: bool, fill: bool);
    fn ellipse(&mut self, rect: Rect, stroke: bool, fill: bool);
    /// Draw one line of text with its baseline starting at (x, y)
    fn draw_text(&mut self, x: f32, y: f32, text: &str);

    fn save_state(&mut self);
    fn restore_state(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    /// Rotate counter-clockwise by `degrees`
    fn rotate(&mut self, degrees: f32);

    /// Close the current page and start a new one
    fn show_page(&mut self) -> Result<()>;
    /// Close the document
    fn finish(self) -> Result<Self::Output>
    where
        Self: Sized;
}
