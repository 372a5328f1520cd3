//! Scripting module - the Rhai engine behind the console
//!
//! Console code reaches script land only through [`ScriptEngine`]. The
//! production engine exposes the session to scripts under `lark::console`.

mod api;
mod binding;
mod completeness;
mod completion;
mod current;
mod engine;
mod interface;

#[cfg(test)]
pub mod fake;

pub use binding::{Binding, Inspectable, ObjectRef};
pub use current::{CurrentGuard, current, make_current, with_current};
pub use engine::RhaiEngine;
pub use interface::{
    COMPLETE_ENTRYPOINT, EVAL_ENTRYPOINT, EngineError, EngineId, Intrinsic,
    OBJECT_CHANGED_ENTRYPOINT, REQUIRED_ENTRYPOINTS, Report, Reporter, ScriptEngine,
};
