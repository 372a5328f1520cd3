//! Turning engine output into transcript lines
//!
//! Both the `print` intrinsic and the error reporter are closures that
//! capture the transcript directly, so the engine never has to find its way
//! back to the session that owns it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::scripting::{Intrinsic, Report, Reporter};

use super::TranscriptSink;

/// Stands in for a `print` argument that could not be converted
pub const INVALID_STRING: &str = "<invalid string>";

/// Join `print` arguments with single spaces
pub fn compose_print(args: &[Option<String>]) -> String {
    args.iter()
        .map(|arg| arg.as_deref().unwrap_or(INVALID_STRING))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Transcript line for a report, or `None` if it is filtered out
pub fn render_report(report: &Report) -> Option<String> {
    let Some(detail) = &report.detail else {
        return Some(report.message.clone());
    };

    // Strict warnings are noise in an interactive console
    if detail.warning && detail.strict {
        return None;
    }

    let mut line = String::new();
    if let Some(file) = &detail.file {
        line.push_str(file);
        line.push(':');
    }
    if let Some(lineno) = detail.line.filter(|&n| n > 0) {
        line.push_str(&lineno.to_string());
        line.push(':');
    }
    if detail.warning {
        line.push_str("warning: ");
    }
    line.push_str(&report.message);
    Some(line)
}

pub fn print_intrinsic(transcript: Arc<dyn TranscriptSink>) -> Intrinsic {
    Arc::new(move |args: &[Option<String>]| {
        transcript.append_line(&compose_print(args));
    })
}

/// Reporter that drops everything while `in_init` is set
pub fn reporter(in_init: Arc<AtomicBool>, transcript: Arc<dyn TranscriptSink>) -> Reporter {
    Arc::new(move |report: &Report| {
        if in_init.load(Ordering::Relaxed) {
            return;
        }
        if let Some(line) = render_report(report) {
            transcript.append_line(&line);
        }
    })
}
