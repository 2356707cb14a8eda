//! Input errors that stop a run before any record is validated.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The text holds no header row at all (empty or whitespace only).
    #[error("input is empty: expected a header row followed by zero or more records")]
    Empty,
}
