use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use rhai::{Engine, Scope};
use thiserror::Error;
use tracing::{debug, info};

use super::Settings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("config error: {0}")]
    Eval(String),
}

/// The Rhai scripting engine for configuration
pub struct ConfigEngine {
    engine: Engine,
    settings: Arc<RwLock<Settings>>,
}

impl ConfigEngine {
    pub fn new() -> Self {
        let settings = Arc::new(RwLock::new(Settings::default()));
        let engine = Self::create_engine(Arc::clone(&settings));

        Self { engine, settings }
    }

    fn create_engine(settings: Arc<RwLock<Settings>>) -> Engine {
        let mut engine = Engine::new();

        // Limit script execution for safety
        engine.set_max_expr_depths(64, 64);
        engine.set_max_operations(100_000);

        // Register settings functions
        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_theme", move |name: &str| {
                if let Ok(mut settings) = s.write() {
                    settings.theme = name.to_string();
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("get_theme", move || -> String {
                s.read().map(|s| s.theme.clone()).unwrap_or_default()
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_max_operations", move |limit: i64| {
                if let Ok(mut settings) = s.write() {
                    settings.max_operations = limit.clamp(1_000, 100_000_000) as u64;
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_max_expr_depth", move |depth: i64| {
                if let Ok(mut settings) = s.write() {
                    settings.max_expr_depth = depth.clamp(8, 256) as usize;
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("set_transcript_limit", move |lines: i64| {
                if let Ok(mut settings) = s.write() {
                    settings.transcript_limit = lines.clamp(100, 1_000_000) as usize;
                }
            });
        }

        {
            let s = Arc::clone(&settings);
            engine.register_fn("bind", move |key: &str, action: &str| {
                if let Ok(mut settings) = s.write() {
                    settings
                        .keybinds
                        .insert(key.to_string(), action.to_string());
                }
            });
        }

        engine.register_fn("list_themes", || -> rhai::Array {
            crate::theme::list_builtin_themes()
                .into_iter()
                .map(|s| rhai::Dynamic::from(s.to_string()))
                .collect()
        });

        // Config scripts have no transcript to print to
        engine.on_print(|msg| debug!(target: "config", "{msg}"));
        engine.on_debug(|msg, _, pos| debug!(target: "config", %pos, "{msg}"));

        engine
    }

    /// Load and execute a config file
    pub fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        self.eval(&content)?;
        info!(path = %path.display(), "loaded config");
        Ok(())
    }

    /// Evaluate a Rhai script string
    pub fn eval(&mut self, script: &str) -> Result<(), ConfigError> {
        let ast = self
            .engine
            .compile(script)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        let mut scope = Scope::new();
        self.engine
            .run_ast_with_scope(&mut scope, &ast)
            .map_err(|e| ConfigError::Eval(e.to_string()))
    }

    /// Get the current settings (cloned)
    pub fn settings(&self) -> Settings {
        self.settings.read().map(|s| s.clone()).unwrap_or_default()
    }

    /// Get the config directory path
    /// Uses ~/.config/lark/ on all platforms for consistency
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("lark"))
    }

    /// Get the default config file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("console.rhai"))
    }

    /// Where logs go unless `--log-file` says otherwise
    pub fn log_file() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("console.log"))
    }

    /// Load the default config file if it exists
    pub fn load_default(&mut self) -> Result<(), ConfigError> {
        if let Some(config_file) = Self::config_file() {
            if config_file.exists() {
                return self.load_file(&config_file);
            }
        }
        Ok(()) // No config file is fine
    }
}

impl Default for ConfigEngine {
    fn default() -> Self {
        Self::new()
    }
}
