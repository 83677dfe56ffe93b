pub mod constants;
mod csv;
pub mod layout;
mod options;
mod pdf;
pub mod records;
pub mod render;
mod stats;
pub mod text;
mod types;

pub use self::csv::{load_from_csv, load_rows_from_csv, parse_csv};
pub use options::*;
pub use pdf::{generate_pdf, generate_single_pdf, render_pdf_bytes, render_single_pdf_bytes};
pub use records::{group_cards, parse_rows, validate_rows};
pub use stats::calculate_statistics;
pub use types::*;
