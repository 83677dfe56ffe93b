//! Text measurement and fitting
//!
//! - Glyph metrics for the PDF standard fonts
//! - Greedy word wrapping against measured widths
//! - Vertical fit checks that fail instead of truncating

mod metrics;
mod wrap;

pub use metrics::*;
pub use wrap::*;
