//! Fountain-style screenplay parser.
//!
//! Splits raw screenplay text into scenes and classifies each body line
//! into a typed element (action, character cue, dialogue, ...).

pub mod error;
pub mod parser;
pub mod patterns;

pub use error::{ScreenplayError, ScreenplayResult};
pub use parser::{parse_screenplay, ScreenplayParser};
