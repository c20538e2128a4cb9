// Error types for the move decision core

use thiserror::Error;

/// Conditions under which the core refuses a snapshot
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecisionError {
    #[error("invalid board dimensions {width}x{height}")]
    InvalidBoard { width: i32, height: i32 },
}

pub type DecisionResult<T> = Result<T, DecisionError>;
