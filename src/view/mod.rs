//! Shared widgets the console writes into and the renderer reads from

mod bell;
mod completion;
mod transcript;

pub use bell::Bell;
pub use completion::CompletionLabel;
pub use transcript::Transcript;
