//! Everything the event loop and the renderer share

use std::sync::Arc;

use tracing::info;

use crate::config::Settings;
use crate::console::{ConsoleError, Presentation, Session, USE_PICKER};
use crate::input::Keymap;
use crate::scripting::{ObjectRef, RhaiEngine};
use crate::theme::{self, Theme};
use crate::view::{Bell, CompletionLabel, Transcript};

/// Lines moved per scroll step
const SCROLL_STEP: usize = 10;

pub struct App {
    pub session: Session<RhaiEngine>,
    pub transcript: Arc<Transcript>,
    pub completion: Arc<CompletionLabel>,
    pub bell: Arc<Bell>,
    pub keymap: Keymap,
    pub theme: Theme,
    /// Transcript lines hidden below the bottom of the view
    pub scroll: usize,
    pub running: bool,
    /// Objects offered by the picker, cycled in order
    objects: Vec<ObjectRef>,
    picked: Option<usize>,
}

impl App {
    pub fn new(settings: &Settings) -> Result<Self, ConsoleError> {
        let bell = Arc::new(Bell::new());
        let transcript = Arc::new(Transcript::new(settings.transcript_limit));
        let completion = Arc::new(CompletionLabel::with_bell(Arc::clone(&bell)));

        let presentation = Presentation {
            transcript: transcript.clone(),
            completion: completion.clone(),
            alert: bell.clone(),
        };
        let session = Session::new(RhaiEngine::new(settings), presentation)?;

        let theme = theme::resolve(&settings.theme);
        let objects: Vec<ObjectRef> = vec![Arc::new(settings.clone()), Arc::new(theme.clone())];

        Ok(Self {
            session,
            transcript,
            completion,
            bell,
            keymap: Keymap::with_overrides(&settings.keybinds),
            theme,
            scroll: 0,
            running: true,
            objects,
            picked: None,
        })
    }

    /// Bind the next pickable object, or nothing after the last one
    pub fn pick_next_object(&mut self) {
        if !USE_PICKER {
            return;
        }

        self.picked = match self.picked {
            None if !self.objects.is_empty() => Some(0),
            Some(i) if i + 1 < self.objects.len() => Some(i + 1),
            _ => None,
        };
        let object = self.picked.map(|i| Arc::clone(&self.objects[i]));
        if let Some(object) = &object {
            info!(kind = object.type_name(), "picked object");
        }
        self.session.set_object(object);
    }

    pub fn scroll_up(&mut self) {
        self.scroll += SCROLL_STEP;
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_sub(SCROLL_STEP);
    }

    /// Keep the scroll offset inside the transcript for a view of `height`
    pub fn clamp_scroll(&mut self, height: usize) {
        self.scroll = self.scroll.min(self.transcript.max_scroll(height));
    }

    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
        self.scroll = 0;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
