use std::collections::HashMap;

use rhai::{Dynamic, Map};

use crate::scripting::Inspectable;

/// Console settings that can be customized via Rhai config
#[derive(Debug, Clone)]
pub struct Settings {
    // Display
    pub theme: String,
    /// Lines kept in the transcript before the oldest are dropped
    pub transcript_limit: usize,

    // Script engine limits
    pub max_operations: u64,
    pub max_expr_depth: usize,

    // Custom keybinds: key notation -> action name
    pub keybinds: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "gruvbox-dark".to_string(),
            transcript_limit: 5_000,

            max_operations: 1_000_000,
            max_expr_depth: 64,

            keybinds: HashMap::new(),
        }
    }
}

impl Inspectable for Settings {
    fn type_name(&self) -> &str {
        "Settings"
    }

    fn properties(&self) -> Map {
        let keybinds: Map = self
            .keybinds
            .iter()
            .map(|(key, action)| (key.as_str().into(), Dynamic::from(action.clone())))
            .collect();

        let mut map = Map::new();
        map.insert("theme".into(), Dynamic::from(self.theme.clone()));
        map.insert(
            "transcript_limit".into(),
            Dynamic::from(self.transcript_limit as i64),
        );
        map.insert(
            "max_operations".into(),
            Dynamic::from(self.max_operations as i64),
        );
        map.insert(
            "max_expr_depth".into(),
            Dynamic::from(self.max_expr_depth as i64),
        );
        map.insert("keybinds".into(), Dynamic::from(keybinds));
        map
    }
}
