//! In-memory engine for session tests

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use super::{
    Binding, COMPLETE_ENTRYPOINT, EngineError, EngineId, Intrinsic, REQUIRED_ENTRYPOINTS, Report,
    Reporter, ScriptEngine, current,
};

#[derive(Debug, Clone)]
pub struct Call {
    pub name: String,
    pub arg: Option<String>,
    /// Marker value seen while the call ran
    pub current: Option<EngineId>,
}

pub struct FakeEngine {
    id: EngineId,
    pub calls: Vec<Call>,
    entrypoints: Vec<&'static str>,
    /// Entrypoints the bootstrap leaves undefined
    missing: Vec<&'static str>,
    fail_next: Option<String>,
    fail_bootstrap: bool,
    bootstrap_report: Option<Report>,
    pending: Option<String>,
    reporter: Option<Reporter>,
    intrinsics: HashMap<String, Intrinsic>,
    binding: Option<Arc<Binding>>,
    /// Queued for the caret by every completion request
    completion_insert: Option<String>,
    completeness_checks: RefCell<Vec<Option<EngineId>>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            id: EngineId::next(),
            calls: Vec::new(),
            entrypoints: Vec::new(),
            missing: Vec::new(),
            fail_next: None,
            fail_bootstrap: false,
            bootstrap_report: None,
            pending: None,
            reporter: None,
            intrinsics: HashMap::new(),
            binding: None,
            completion_insert: None,
            completeness_checks: RefCell::new(Vec::new()),
        }
    }

    pub fn without_entrypoint(mut self, name: &'static str) -> Self {
        self.missing.push(name);
        self
    }

    pub fn with_failing_bootstrap(mut self) -> Self {
        self.fail_bootstrap = true;
        self
    }

    /// Report emitted while bootstrapping
    pub fn with_bootstrap_report(mut self, report: Report) -> Self {
        self.bootstrap_report = Some(report);
        self
    }

    /// The next invocation raises `message`
    pub fn fail_next(&mut self, message: &str) {
        self.fail_next = Some(message.to_string());
    }

    pub fn insert_on_complete(&mut self, text: &str) {
        self.completion_insert = Some(text.to_string());
    }

    pub fn calls_to(&self, name: &str) -> Vec<&Call> {
        self.calls.iter().filter(|c| c.name == name).collect()
    }

    pub fn completeness_checks(&self) -> Vec<Option<EngineId>> {
        self.completeness_checks.borrow().clone()
    }

    pub fn has_pending_exception(&self) -> bool {
        self.pending.is_some()
    }

    pub fn binding(&self) -> Option<&Arc<Binding>> {
        self.binding.as_ref()
    }

    /// Deliver a diagnostic as the engine would
    pub fn report(&self, report: &Report) {
        if let Some(reporter) = &self.reporter {
            reporter(report);
        }
    }

    pub fn call_intrinsic(&self, name: &str, args: &[Option<String>]) {
        if let Some(intrinsic) = self.intrinsics.get(name) {
            intrinsic(args);
        }
    }
}

impl ScriptEngine for FakeEngine {
    fn id(&self) -> EngineId {
        self.id
    }

    /// Complete once braces balance
    fn is_complete_unit(&self, source: &str) -> bool {
        self.completeness_checks.borrow_mut().push(current());
        source.matches('{').count() <= source.matches('}').count()
    }

    fn invoke(&mut self, name: &str, arg: Option<&str>) -> Result<(), EngineError> {
        self.calls.push(Call {
            name: name.to_string(),
            arg: arg.map(str::to_string),
            current: current(),
        });

        if !self.has_entrypoint(name) {
            self.pending = Some(format!("ReferenceError: {name} is not defined"));
            return Err(EngineError::UnknownFunction(name.to_string()));
        }

        if let Some(message) = self.fail_next.take() {
            self.report(&Report::error(
                message.clone(),
                Some("<console>".into()),
                Some(1),
            ));
            self.pending = Some(format!("Error {{ message: {message:?} }}"));
            return Err(EngineError::Script(message));
        }

        if name == COMPLETE_ENTRYPOINT {
            if let (Some(binding), Some(text)) = (&self.binding, arg) {
                binding.completion().show(text);
                if let Some(insert) = &self.completion_insert {
                    binding.insert_at_cursor(insert);
                }
            }
        }

        Ok(())
    }

    fn take_pending_exception(&mut self) -> Option<String> {
        self.pending.take()
    }

    fn install_intrinsic(&mut self, name: &str, intrinsic: Intrinsic) -> Result<(), EngineError> {
        self.intrinsics.insert(name.to_string(), intrinsic);
        Ok(())
    }

    fn set_reporter(&mut self, reporter: Reporter) {
        self.reporter = Some(reporter);
    }

    fn bootstrap(&mut self) -> Result<(), EngineError> {
        if let Some(report) = self.bootstrap_report.take() {
            self.report(&report);
        }
        if self.fail_bootstrap {
            return Err(EngineError::Script("SyntaxError: missing ;".into()));
        }
        self.entrypoints = REQUIRED_ENTRYPOINTS
            .into_iter()
            .filter(|name| !self.missing.contains(name))
            .collect();
        Ok(())
    }

    fn expose_binding(&mut self, binding: Arc<Binding>) -> Result<(), EngineError> {
        self.binding = Some(binding);
        Ok(())
    }

    fn has_entrypoint(&self, name: &str) -> bool {
        self.entrypoints.iter().any(|n| *n == name)
    }
}
