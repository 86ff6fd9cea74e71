//! Error types for the engine binary.

/// Top-level error for the engine binary.
///
/// Each variant wraps a subsystem error so `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: paradise_core::ConfigError,
    },

    /// The simulation could not be built.
    #[error("simulation error: {source}")]
    Simulation {
        /// The underlying simulation error.
        #[from]
        source: paradise_core::SimulationError,
    },

    /// The frame loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: paradise_core::runner::RunnerError,
    },

    /// The log filter in the config could not be parsed.
    #[error("invalid log filter {directive:?}: {message}")]
    LogFilter {
        /// The directive as written.
        directive: String,
        /// Parser message.
        message: String,
    },
}
