//! Error types for drawer configuration and state requests.

use thiserror::Error;

use crate::direction::Direction;

/// Drawer errors.
///
/// All of these are reported synchronously by the call that caused them.
#[derive(Debug, Error)]
pub enum DrawerError {
    /// A masked value was passed where a single direction is required, or
    /// `NONE` was passed where a direction is mandatory.
    #[error("Invalid direction: {0}")]
    InvalidDirection(Direction),
    /// Assigning a drawer would leave more than one direction that is not
    /// the opposite of the other.
    #[error("Cannot add a drawer in direction {requested}: drawers already set in {existing}")]
    TooManyDrawers {
        requested: Direction,
        existing: Direction,
    },
    #[error("Invalid reveal width: {0}")]
    InvalidRevealWidth(f64),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for drawer operations.
pub type DrawerResult<T> = Result<T, DrawerError>;
