//! The interactive console: input accumulation, history, output capture
//!
//! [`Session`] drives one [`ScriptEngine`](crate::scripting::ScriptEngine)
//! and writes everything visible through the traits in [`surface`].

mod entry;
mod error;
mod history;
mod input;
pub mod output;
mod session;
mod surface;

pub use entry::{CaretMotion, Entry};
pub use error::ConsoleError;
pub use history::{Direction, HISTORY_LENGTH, History};
pub use input::{InputBuffer, Prompt};
pub use session::{Session, TITLE, USE_PICKER};
pub use surface::{Alert, CompletionDisplay, Presentation, TranscriptSink};
