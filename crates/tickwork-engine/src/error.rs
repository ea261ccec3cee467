//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and the tick loop.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: tickwork_core::config::ConfigError,
    },

    /// Tick clock initialization failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: tickwork_core::clock::ClockError,
    },

    /// A tick could not be executed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: tickwork_core::tick::TickError,
    },

    /// A demo event could not be dispatched.
    #[error("event error: {source}")]
    Event {
        /// The underlying event error.
        #[from]
        source: tickwork_core::events::EventError,
    },

    /// Demo players could not be set up.
    #[error("setup error: {message}")]
    Setup {
        /// Description of the setup failure.
        message: String,
    },
}
