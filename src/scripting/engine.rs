//! The Rhai engine behind the console
//!
//! One `rhai::Engine` plus the console state shared with the `lark::console`
//! module: the variable scope and function library that persist between
//! submissions, the installed intrinsics and the reporter.

use std::sync::{Arc, PoisonError, RwLock};

use rhai::{
    AST, Dynamic, Engine, EvalAltResult, ImmutableString, NativeCallContext, ParseErrorType, Scope,
};
use tracing::debug;

use super::completeness;
use super::{
    Binding, EngineError, EngineId, Intrinsic, Report, Reporter, ScriptEngine, api,
};
use crate::config::Settings;
use crate::console::output::compose_print;

const BOOTSTRAP: &str = include_str!("bootstrap.rhai");

/// File label used for diagnostics raised by console input
pub const SOURCE_LABEL: &str = "<console>";

/// State reachable from native functions while scripts run
pub(crate) struct ScriptState {
    pub scope: RwLock<Scope<'static>>,
    /// Functions defined by earlier submissions
    pub library: RwLock<AST>,
    pub intrinsics: RwLock<Vec<String>>,
    reporter: RwLock<Option<Reporter>>,
    print: RwLock<Option<Intrinsic>>,
}

impl ScriptState {
    fn new() -> Self {
        Self {
            scope: RwLock::new(Scope::new()),
            library: RwLock::new(AST::empty()),
            intrinsics: RwLock::new(Vec::new()),
            reporter: RwLock::new(None),
            print: RwLock::new(None),
        }
    }

    fn report(&self, report: &Report) {
        let reporter = self
            .reporter
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(reporter) = reporter {
            reporter(report);
        }
    }
}

pub struct RhaiEngine {
    id: EngineId,
    engine: Engine,
    state: Arc<ScriptState>,
    bootstrap: AST,
    pending: Option<String>,
}

impl RhaiEngine {
    pub fn new(settings: &Settings) -> Self {
        let state = Arc::new(ScriptState::new());
        let mut engine = Engine::new();

        // Safety limits
        engine.set_max_expr_depths(settings.max_expr_depth, settings.max_expr_depth);
        engine.set_max_operations(settings.max_operations);

        // `print` output ends up here after Rhai converted it
        {
            let state = Arc::clone(&state);
            engine.on_print(move |text| {
                let print = state
                    .print
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone();
                match print {
                    Some(print) => print(&[Some(text.to_string())]),
                    None => debug!(target: "rhai", "{text}"),
                }
            });
        }

        {
            let state = Arc::clone(&state);
            engine.on_debug(move |text, source, pos| {
                let file = source.unwrap_or(SOURCE_LABEL).to_string();
                state.report(&Report::warning(text, Some(file), pos.line()));
            });
        }

        Self {
            id: EngineId::next(),
            engine,
            state,
            bootstrap: AST::empty(),
            pending: None,
        }
    }

    /// Report a failed invocation and keep it as the pending exception
    fn fail(&mut self, err: Box<EvalAltResult>) -> EngineError {
        let mut err = innermost(err);
        let debug = format!("{err:?}");
        let pos = err.take_position();
        let message = err.to_string();

        self.state
            .report(&Report::error(message.clone(), Some(SOURCE_LABEL.into()), pos.line()));
        self.pending = Some(debug);
        EngineError::Script(message)
    }
}

/// Strip the wrappers Rhai adds for every script function on the way out
fn innermost(mut err: Box<EvalAltResult>) -> EvalAltResult {
    loop {
        match *err {
            EvalAltResult::ErrorInFunctionCall(_, _, inner, _)
            | EvalAltResult::ErrorInModule(_, inner, _) => err = inner,
            other => return other,
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Stringify one argument with the engine's own `to_string`
fn convert(ctx: &NativeCallContext, value: Dynamic) -> Option<String> {
    if value.is_string() {
        return value.into_immutable_string().ok().map(|s| s.to_string());
    }
    ctx.call_fn::<ImmutableString>("to_string", (value,))
        .ok()
        .map(|s| s.to_string())
}

/// Register `name` for every arity from none up to eight arguments.
/// Arguments reach `call` already stringified.
fn register_variadic(
    engine: &mut Engine,
    name: &str,
    call: Arc<dyn Fn(Vec<Option<String>>) -> Dynamic>,
) {
    macro_rules! arity {
        ($($arg:ident),+) => {{
            let call = Arc::clone(&call);
            engine.register_fn(name, move |ctx: NativeCallContext, $($arg: Dynamic),+| {
                call(vec![$(convert(&ctx, $arg)),+])
            });
        }};
    }

    {
        let call = Arc::clone(&call);
        engine.register_fn(name, move || call(Vec::new()));
    }
    arity!(a);
    arity!(a, b);
    arity!(a, b, c);
    arity!(a, b, c, d);
    arity!(a, b, c, d, e);
    arity!(a, b, c, d, e, f);
    arity!(a, b, c, d, e, f, g);
    arity!(a, b, c, d, e, f, g, h);
}

impl ScriptEngine for RhaiEngine {
    fn id(&self) -> EngineId {
        self.id
    }

    fn is_complete_unit(&self, source: &str) -> bool {
        if completeness::is_open(source) {
            return false;
        }
        match self.engine.compile(source) {
            Ok(_) => true,
            // Anything else is a real syntax error for evaluation to report
            Err(err) => !matches!(err.err_type(), ParseErrorType::UnexpectedEOF),
        }
    }

    fn invoke(&mut self, name: &str, arg: Option<&str>) -> Result<(), EngineError> {
        if !self.has_entrypoint(name) {
            self.pending = Some(format!("ErrorFunctionNotFound({name:?})"));
            return Err(EngineError::UnknownFunction(name.to_string()));
        }

        let mut scope = Scope::new();
        let result = match arg {
            Some(arg) => {
                self.engine
                    .call_fn::<Dynamic>(&mut scope, &self.bootstrap, name, (arg.to_string(),))
            }
            None => self
                .engine
                .call_fn::<Dynamic>(&mut scope, &self.bootstrap, name, ()),
        };

        result.map(|_| ()).map_err(|err| self.fail(err))
    }

    fn take_pending_exception(&mut self) -> Option<String> {
        self.pending.take()
    }

    fn install_intrinsic(&mut self, name: &str, intrinsic: Intrinsic) -> Result<(), EngineError> {
        if !is_identifier(name) {
            return Err(EngineError::Registration {
                name: name.to_string(),
                reason: "not a valid identifier".into(),
            });
        }

        if name == "print" {
            // Rhai hands whatever a `print` function returns to the print
            // hook, so the variadic forms only compose the text
            *self
                .state
                .print
                .write()
                .unwrap_or_else(PoisonError::into_inner) = Some(intrinsic);
            register_variadic(
                &mut self.engine,
                name,
                Arc::new(|args: Vec<Option<String>>| {
                    Dynamic::from(ImmutableString::from(compose_print(&args)))
                }),
            );
        } else {
            register_variadic(
                &mut self.engine,
                name,
                Arc::new(move |args: Vec<Option<String>>| {
                    intrinsic(&args);
                    Dynamic::UNIT
                }),
            );
        }

        self.state
            .intrinsics
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(name.to_string());
        debug!(name, "installed intrinsic");
        Ok(())
    }

    fn set_reporter(&mut self, reporter: Reporter) {
        *self
            .state
            .reporter
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(reporter);
    }

    fn bootstrap(&mut self) -> Result<(), EngineError> {
        let ast = match self.engine.compile(BOOTSTRAP) {
            Ok(ast) => ast,
            Err(err) => {
                self.state.report(&Report::error(
                    err.err_type().to_string(),
                    Some("bootstrap.rhai".into()),
                    err.position().line(),
                ));
                return Err(EngineError::Script(err.to_string()));
            }
        };
        self.bootstrap = ast;
        Ok(())
    }

    fn expose_binding(&mut self, binding: Arc<Binding>) -> Result<(), EngineError> {
        let mut lark_module = rhai::Module::new();
        lark_module.set_sub_module(
            "console",
            api::console::create_module(binding, Arc::clone(&self.state)),
        );
        self.engine.register_static_module("lark", lark_module.into());
        Ok(())
    }

    fn has_entrypoint(&self, name: &str) -> bool {
        self.bootstrap.iter_functions().any(|f| f.name == name)
    }
}
