//! Layout calculation modules for card sheets
//!
//! This module handles all the geometric calculations for a sheet:
//! - Grid layout (card dimensions, cell positions)
//! - Duplex mapping (where a card's back lands on the answer page)

mod duplex;
mod grid;
mod types;

pub use duplex::*;
pub use grid::*;
pub use types::*;
