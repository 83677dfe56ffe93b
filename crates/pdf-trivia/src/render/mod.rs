//! Rendering modules for card sheets
//!
//! This module handles everything that draws:
//! - The document surface abstraction and its PDF implementation
//! - Drawing one card face (border, header, question rows)
//! - Batching cards into front/back sheet pages

mod card;
mod pdf;
mod sheet;
mod single;
mod surface;

pub use pdf::PdfSurface;
pub(crate) use pdf::document_bytes;
pub use sheet::SheetRenderer;
pub use single::render_single_cards;
pub use surface::{Color, DocumentSurface};

#[cfg(test)]
pub(crate) use surface::testing;
