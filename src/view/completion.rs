use std::sync::{Arc, PoisonError, RwLock};

use crate::console::CompletionDisplay;

use super::Bell;

/// One-line completion display shown above the prompt
#[derive(Debug, Default)]
pub struct CompletionLabel {
    text: RwLock<Option<String>>,
    bell: Option<Arc<Bell>>,
}

impl CompletionLabel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A label whose error bell rings `bell`
    pub fn with_bell(bell: Arc<Bell>) -> Self {
        Self {
            text: RwLock::new(None),
            bell: Some(bell),
        }
    }

    /// Visible text, `None` while hidden
    pub fn text(&self) -> Option<String> {
        self.text
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_visible(&self) -> bool {
        self.text().is_some()
    }
}

impl CompletionDisplay for CompletionLabel {
    fn show(&self, text: &str) {
        *self.text.write().unwrap_or_else(PoisonError::into_inner) = Some(text.to_string());
    }

    fn hide(&self) {
        *self.text.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn error_bell(&self) {
        if let Some(bell) = &self.bell {
            bell.ring();
        }
    }
}
