//! The console session: one engine, one transcript, one history
//!
//! All methods run synchronously from UI event callbacks. Every call into
//! the engine is wrapped in a [`CurrentGuard`] so that another session's
//! engine is never left current while ours runs, or the other way round.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::scripting::{
    Binding, COMPLETE_ENTRYPOINT, CurrentGuard, EVAL_ENTRYPOINT, OBJECT_CHANGED_ENTRYPOINT,
    ObjectRef, REQUIRED_ENTRYPOINTS, ScriptEngine, with_current,
};

use super::{
    Alert, CaretMotion, ConsoleError, Direction, Entry, History, InputBuffer, Presentation,
    Prompt, TranscriptSink, output,
};

/// Tab title shown by the embedding
pub const TITLE: &str = "Interactive";

/// Whether the embedding should offer an object picker
pub const USE_PICKER: bool = true;

pub struct Session<E: ScriptEngine> {
    engine: E,
    input: InputBuffer,
    prompt: Prompt,
    history: History,
    entry: Entry,
    binding: Arc<Binding>,
    transcript: Arc<dyn TranscriptSink>,
    alert: Arc<dyn Alert>,
    /// Set while the engine is being bootstrapped; reports are dropped
    in_init: Arc<AtomicBool>,
}

impl<E: ScriptEngine> Session<E> {
    /// Initialize `engine` for console use: reporter, `print`, bootstrap
    /// code, then the binding. Any failure here is a setup defect.
    pub fn new(mut engine: E, presentation: Presentation) -> Result<Self, ConsoleError> {
        let Presentation {
            transcript,
            completion,
            alert,
        } = presentation;

        let in_init = Arc::new(AtomicBool::new(true));
        let binding = Arc::new(Binding::new(completion));

        {
            let _current = CurrentGuard::enter(engine.id());

            engine.set_reporter(output::reporter(
                Arc::clone(&in_init),
                Arc::clone(&transcript),
            ));
            engine
                .install_intrinsic("print", output::print_intrinsic(Arc::clone(&transcript)))
                .map_err(|source| ConsoleError::Intrinsic {
                    name: "print",
                    source,
                })?;
            engine.bootstrap().map_err(ConsoleError::Bootstrap)?;
            engine
                .expose_binding(Arc::clone(&binding))
                .map_err(ConsoleError::Binding)?;

            if let Some(missing) = REQUIRED_ENTRYPOINTS
                .into_iter()
                .find(|name| !engine.has_entrypoint(name))
            {
                return Err(ConsoleError::MissingEntrypoint(missing));
            }
        }

        in_init.store(false, Ordering::Relaxed);
        info!(engine = ?engine.id(), "console session ready");

        Ok(Self {
            engine,
            input: InputBuffer::new(),
            prompt: Prompt::default(),
            history: History::new(),
            entry: Entry::new(),
            binding,
            transcript,
            alert,
            in_init,
        })
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn prompt(&self) -> Prompt {
        self.prompt
    }

    pub fn pending_input(&self) -> &str {
        self.input.pending()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn object(&self) -> Option<ObjectRef> {
        self.binding.object()
    }

    pub fn in_init(&self) -> bool {
        self.in_init.load(Ordering::Relaxed)
    }

    #[cfg(test)]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Call a named entrypoint with this session's engine current.
    ///
    /// Script errors are not fatal: the pending exception is logged and
    /// cleared so it cannot leak into the next call.
    fn call(&mut self, entrypoint: &str, arg: Option<&str>) {
        let _current = CurrentGuard::enter(self.engine.id());
        debug!(entrypoint, "calling into engine");

        if let Err(err) = self.engine.invoke(entrypoint, arg) {
            match self.engine.take_pending_exception() {
                Some(exception) => warn!(entrypoint, %err, "uncaught exception: {exception}"),
                None => warn!(entrypoint, %err, "engine call failed"),
            }
        }
    }

    fn is_complete(&self) -> bool {
        with_current(self.engine.id(), || {
            self.engine.is_complete_unit(self.input.pending())
        })
    }

    /// Submit one line. Lines accumulate until the engine considers them a
    /// complete unit, which is then evaluated once.
    pub fn submit(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }

        self.transcript
            .append_line(&format!("{}{}", self.prompt.marker(), line));

        // Continuation lines are recorded too, each on its own
        self.history.push(line);
        self.input.push_line(line);

        if self.is_complete() {
            let source = self.input.take();
            self.call(EVAL_ENTRYPOINT, Some(&source));
            self.prompt = Prompt::Primary;
        } else {
            self.prompt = Prompt::Continuation;
        }

        self.history.reset_cursor();
        self.entry.clear();
    }

    /// Submit the live edit text
    pub fn activate(&mut self) {
        let line = self.entry.text().to_string();
        self.submit(&line);
    }

    /// Submit a script line by line, as if typed. Blank lines inside an
    /// unfinished unit are kept in it; they stay out of history.
    pub fn submit_script(&mut self, script: &str) {
        for line in script.lines() {
            if line.is_empty() && !self.input.is_empty() {
                self.transcript.append_line(self.prompt.marker());
                self.input.push_line(line);
            } else {
                self.submit(line);
            }
        }
    }

    pub fn move_history(&mut self, direction: Direction) {
        if self.history.navigate(direction, &mut self.entry).is_err() {
            self.alert.error_bell();
        }
    }

    /// Ask the engine for completions of `text`. The engine updates the
    /// completion display itself and may queue text for the caret; history
    /// and pending input are left alone.
    pub fn request_completion(&mut self, text: &str) {
        self.call(COMPLETE_ENTRYPOINT, Some(text));
        if let Some(insertion) = self.binding.take_insertion() {
            self.insert_str(&insertion);
        }
    }

    pub fn complete(&mut self) {
        let text = self.entry.text().to_string();
        self.request_completion(&text);
    }

    /// Bind a new object. The engine is told only when the identity changed.
    pub fn set_object(&mut self, object: Option<ObjectRef>) {
        if self.binding.replace_object(object) {
            self.call(OBJECT_CHANGED_ENTRYPOINT, None);
        }
    }

    /// The caret moved by direct interaction with the entry
    pub fn caret_moved(&mut self) {
        self.history.invalidate_caret();
    }

    pub fn insert_char(&mut self, ch: char) {
        self.entry.insert_char(ch);
        self.caret_moved();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.entry.insert_str(s);
        self.caret_moved();
    }

    pub fn delete_backward(&mut self) {
        if self.entry.delete_backward() {
            self.caret_moved();
        }
    }

    pub fn delete_forward(&mut self) {
        if self.entry.delete_forward() {
            self.caret_moved();
        }
    }

    pub fn move_caret(&mut self, motion: CaretMotion) {
        self.entry.move_caret(motion);
        self.caret_moved();
    }
}
