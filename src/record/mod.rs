//! Record model: one hierarchy entry per CSV row.

pub mod parse;
pub mod row;

pub use parse::parse_file;
pub use row::{Record, Role};
