use thiserror::Error;

use crate::scripting::EngineError;

/// Failures that abort session construction
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("failed to install intrinsic `{name}`: {source}")]
    Intrinsic {
        name: &'static str,
        #[source]
        source: EngineError,
    },

    #[error("bootstrap code failed: {0}")]
    Bootstrap(#[source] EngineError),

    #[error("failed to expose the console binding: {0}")]
    Binding(#[source] EngineError),

    #[error("required entry point `{0}` is not defined")]
    MissingEntrypoint(&'static str),
}
