//! The contract between a console session and the script engine it drives
//!
//! The session never talks to Rhai directly. Everything goes through
//! [`ScriptEngine`], which keeps the session testable against a fake engine
//! and keeps the current-engine discipline in one place.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use super::Binding;

/// Evaluates accumulated console source
pub const EVAL_ENTRYPOINT: &str = "__eval";
/// Produces completions for the live edit text
pub const COMPLETE_ENTRYPOINT: &str = "__complete";
/// Called without arguments after the bound object changed
pub const OBJECT_CHANGED_ENTRYPOINT: &str = "__object_changed";

/// Entrypoints the bootstrap code has to define
pub const REQUIRED_ENTRYPOINTS: [&str; 3] = [
    EVAL_ENTRYPOINT,
    COMPLETE_ENTRYPOINT,
    OBJECT_CHANGED_ENTRYPOINT,
];

/// Process-unique identity of an engine instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineId(u64);

impl EngineId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    Script(String),

    #[error("no function named `{0}`")]
    UnknownFunction(String),

    #[error("cannot register `{name}`: {reason}")]
    Registration { name: String, reason: String },
}

/// A diagnostic delivered by the engine to the installed reporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub message: String,
    pub detail: Option<ReportDetail>,
}

/// Structured part of a report; absent for bare messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDetail {
    pub file: Option<String>,
    pub line: Option<usize>,
    pub warning: bool,
    pub strict: bool,
}

impl Report {
    pub fn plain(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    pub fn error(message: impl Into<String>, file: Option<String>, line: Option<usize>) -> Self {
        Self {
            message: message.into(),
            detail: Some(ReportDetail {
                file,
                line,
                ..ReportDetail::default()
            }),
        }
    }

    pub fn warning(message: impl Into<String>, file: Option<String>, line: Option<usize>) -> Self {
        Self {
            message: message.into(),
            detail: Some(ReportDetail {
                file,
                line,
                warning: true,
                strict: false,
            }),
        }
    }

    pub fn strict_warning(
        message: impl Into<String>,
        file: Option<String>,
        line: Option<usize>,
    ) -> Self {
        Self {
            message: message.into(),
            detail: Some(ReportDetail {
                file,
                line,
                warning: true,
                strict: true,
            }),
        }
    }
}

/// Native callable installed into the engine's global environment.
///
/// Arguments arrive already stringified; `None` marks an argument the engine
/// could not convert.
pub type Intrinsic = Arc<dyn Fn(&[Option<String>]) + Send + Sync>;

/// Observer for engine errors and warnings
pub type Reporter = Arc<dyn Fn(&Report) + Send + Sync>;

/// One embedded engine instance, exclusively owned by a console session.
///
/// Every method that runs engine code must be called with this engine made
/// current (see [`super::CurrentGuard`]).
pub trait ScriptEngine {
    fn id(&self) -> EngineId;

    /// True once `source` forms one complete evaluable unit
    fn is_complete_unit(&self, source: &str) -> bool;

    /// Call a named function defined in the engine's global environment.
    ///
    /// A failed call leaves a pending exception behind.
    fn invoke(&mut self, name: &str, arg: Option<&str>) -> Result<(), EngineError>;

    /// Debug string of the pending exception, clearing it
    fn take_pending_exception(&mut self) -> Option<String>;

    fn install_intrinsic(&mut self, name: &str, intrinsic: Intrinsic) -> Result<(), EngineError>;

    fn set_reporter(&mut self, reporter: Reporter);

    /// Run the engine's bootstrap code, which defines the entrypoints
    fn bootstrap(&mut self) -> Result<(), EngineError>;

    /// Make the console binding reachable from script code
    fn expose_binding(&mut self, binding: Arc<Binding>) -> Result<(), EngineError>;

    fn has_entrypoint(&self, name: &str) -> bool;
}
