//! What the console needs from the presentation layer
//!
//! The presentation layer owns the widgets; the session only writes lines,
//! updates the completion display and rings the bell through these traits.

use std::sync::Arc;

/// Append-only visible log
pub trait TranscriptSink: Send + Sync {
    fn append_line(&self, line: &str);
}

pub trait CompletionDisplay: Send + Sync {
    fn show(&self, text: &str);
    fn hide(&self);
    fn error_bell(&self);
}

/// Boundary signal for history navigation
pub trait Alert: Send + Sync {
    fn error_bell(&self);
}

/// The collaborators a session is created with
#[derive(Clone)]
pub struct Presentation {
    pub transcript: Arc<dyn TranscriptSink>,
    pub completion: Arc<dyn CompletionDisplay>,
    pub alert: Arc<dyn Alert>,
}
