//! Screenplay parser error types.

use thiserror::Error;

pub type ScreenplayResult<T> = Result<T, ScreenplayError>;

#[derive(Debug, Error)]
pub enum ScreenplayError {
    #[error("Failed to read screenplay: {0}")]
    Io(#[from] std::io::Error),
}
