//! lark::console - The session as seen from script code
//!
//! Usage in Rhai:
//! ```rhai
//! let value = lark::console::run("1 + 1");
//! lark::console::complete("pri");
//! print(lark::console::object_type());
//! ```

use std::sync::{Arc, PoisonError};

use rhai::{Dynamic, EvalAltResult, Map, NativeCallContext};
use tracing::debug;

use crate::console::TITLE;
use crate::scripting::Binding;
use crate::scripting::completion::{self, KEYWORDS, Qualifier, Target};
use crate::scripting::engine::ScriptState;

/// Functions of this module, offered by completion
pub const FUNCTIONS: &[&str] = &[
    "complete",
    "hide_completion",
    "object",
    "object_type",
    "run",
    "title",
];

/// Create the console module bound to one session
pub fn create_module(binding: Arc<Binding>, state: Arc<ScriptState>) -> rhai::Module {
    let mut module = rhai::Module::new();

    // run(source) -> Dynamic
    {
        let state = Arc::clone(&state);
        module.set_native_fn(
            "run",
            move |ctx: NativeCallContext, source: &str| -> Result<Dynamic, Box<EvalAltResult>> {
                // Held for the whole evaluation; a nested run finds it taken
                let Ok(mut scope) = state.scope.try_write() else {
                    return Err("console is busy".into());
                };

                let ast = ctx.engine().compile_with_scope(&scope, source)?;
                let program = {
                    let mut library = state.library.write().unwrap_or_else(PoisonError::into_inner);
                    let merged = library.merge(&ast);
                    *library = merged.clone_functions_only();
                    merged
                };

                ctx.engine().eval_ast_with_scope::<Dynamic>(&mut scope, &program)
            },
        );
    }

    // complete(text)
    {
        let state = Arc::clone(&state);
        let b = Arc::clone(&binding);
        module.set_native_fn(
            "complete",
            move |text: &str| -> Result<(), Box<EvalAltResult>> {
                let target = completion::parse_target(text);
                let matches = completion::filter(target.partial, candidates(&state, &target));

                match matches.as_slice() {
                    [] => {
                        b.completion().hide();
                        b.completion().error_bell();
                    }
                    [only] => {
                        b.insert_at_cursor(rest(only, target.partial));
                        b.completion().hide();
                    }
                    _ => {
                        let prefix = completion::common_prefix(&matches);
                        debug!(count = matches.len(), prefix, "completion candidates");
                        b.completion().show(&matches.join(", "));
                        b.insert_at_cursor(rest(prefix, target.partial));
                    }
                }
                Ok(())
            },
        );
    }

    // hide_completion()
    {
        let b = Arc::clone(&binding);
        module.set_native_fn(
            "hide_completion",
            move || -> Result<(), Box<EvalAltResult>> {
                b.completion().hide();
                Ok(())
            },
        );
    }

    // object() -> Map or ()
    {
        let b = Arc::clone(&binding);
        module.set_native_fn("object", move || -> Result<Dynamic, Box<EvalAltResult>> {
            Ok(b
                .object()
                .map(|object| Dynamic::from(object.properties()))
                .unwrap_or(Dynamic::UNIT))
        });
    }

    // object_type() -> String, empty when nothing is bound
    {
        let b = Arc::clone(&binding);
        module.set_native_fn(
            "object_type",
            move || -> Result<String, Box<EvalAltResult>> {
                Ok(b
                    .object()
                    .map(|object| object.type_name().to_string())
                    .unwrap_or_default())
            },
        );
    }

    module.set_native_fn("title", || -> Result<String, Box<EvalAltResult>> {
        Ok(TITLE.to_string())
    });

    module
}

/// What `name` adds after the typed `partial`
fn rest<'a>(name: &'a str, partial: &str) -> &'a str {
    name.strip_prefix(partial).unwrap_or_default()
}

/// Every name that could complete `target`, before prefix filtering
fn candidates(state: &ScriptState, target: &Target) -> Vec<String> {
    match target.qualifier {
        Qualifier::Namespace("lark") => vec!["console".to_string()],
        Qualifier::Namespace("lark::console") => {
            FUNCTIONS.iter().map(|name| name.to_string()).collect()
        }
        Qualifier::Namespace(_) => Vec::new(),
        Qualifier::Property(owner) => state
            .scope
            .try_read()
            .ok()
            .and_then(|scope| scope.get_value::<Map>(owner))
            .map(|map| map.keys().map(|key| key.to_string()).collect())
            .unwrap_or_default(),
        Qualifier::None => {
            let mut names: Vec<String> = KEYWORDS.iter().map(|k| k.to_string()).collect();
            names.push("lark".to_string());
            names.extend(
                state
                    .intrinsics
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .iter()
                    .cloned(),
            );
            if let Ok(scope) = state.scope.try_read() {
                names.extend(scope.iter().map(|(name, _, _)| name.to_string()));
            }
            if let Ok(library) = state.library.try_read() {
                names.extend(library.iter_functions().map(|f| f.name.to_string()));
            }
            names
        }
    }
}
