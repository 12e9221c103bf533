//! Error types for availability-match operations.
//!
//! Missing overlaps, unknown timezones and malformed windows are not errors;
//! they degrade to "no suggestion". Only profile decoding and the final write
//! can fail.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid availability profiles: {0}")]
    ProfileParse(#[from] serde_json::Error),

    #[error("Failed to read availability profiles: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to store suggestions: {0}")]
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, MatchError>;
