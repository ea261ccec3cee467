//! Error types for the `tickwork-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`].

use tickwork_types::ObjectKey;

/// Errors that can occur while defining resources or mutating the world.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// A "one in N" chance was given `N = 0`.
    #[error("odds must be at least one in one, got one in {0}")]
    InvalidOdds(u32),

    /// A weighted bonus table has no entries or only zero weights.
    #[error("bonus table has no weighted entries")]
    EmptyBonusTable,

    /// A resource node was defined with a zero base time.
    #[error("resource base time must be at least 1 tick")]
    ZeroBaseTime,

    /// No object occupies the given key.
    #[error("no object at {key:?}")]
    ObjectNotFound {
        /// The empty key.
        key: ObjectKey,
    },

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in world calculation")]
    ArithmeticOverflow,
}
