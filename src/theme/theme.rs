use rhai::{Dynamic, Map};

use super::Color;
use crate::scripting::Inspectable;

/// Complete theme definition
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Console chrome
    pub background: Color,
    pub foreground: Color,
    pub title_bar_bg: Color,
    pub title_bar_fg: Color,

    // Transcript
    /// Echoed input lines
    pub echo: Color,
    pub prompt: Color,
    pub completion: Color,

    // Diagnostics
    pub error: Color,
    pub warning: Color,
}

impl Theme {
    /// Gruvbox Dark - warm retro theme
    pub fn gruvbox_dark() -> Self {
        Self {
            name: "gruvbox-dark".to_string(),
            background: Color::hex(0x282828),
            foreground: Color::hex(0xebdbb2),
            title_bar_bg: Color::hex(0x3c3836),
            title_bar_fg: Color::hex(0xebdbb2),

            echo: Color::hex(0xa89984),
            prompt: Color::hex(0xfe8019),
            completion: Color::hex(0x83a598),

            error: Color::hex(0xfb4934),
            warning: Color::hex(0xfabd2f),
        }
    }

    /// Nord - arctic, north-bluish color palette
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            background: Color::hex(0x2e3440),
            foreground: Color::hex(0xd8dee9),
            title_bar_bg: Color::hex(0x3b4252),
            title_bar_fg: Color::hex(0xd8dee9),

            echo: Color::hex(0x4c566a),
            prompt: Color::hex(0x88c0d0),
            completion: Color::hex(0x81a1c1),

            error: Color::hex(0xbf616a),
            warning: Color::hex(0xebcb8b),
        }
    }

    /// Dracula - dark theme with vibrant colors
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            background: Color::hex(0x282a36),
            foreground: Color::hex(0xf8f8f2),
            title_bar_bg: Color::hex(0x44475a),
            title_bar_fg: Color::hex(0xf8f8f2),

            echo: Color::hex(0x6272a4),
            prompt: Color::hex(0xbd93f9),
            completion: Color::hex(0x8be9fd),

            error: Color::hex(0xff5555),
            warning: Color::hex(0xffb86c),
        }
    }

    /// Color for one transcript line, picked from its shape
    pub fn line_color(&self, line: &str) -> Color {
        if line.starts_with("» ") || line.starts_with("… ") {
            self.echo
        } else if line.contains(":warning: ") {
            self.warning
        } else if line.starts_with("<console>:") {
            self.error
        } else {
            self.foreground
        }
    }
}

impl Inspectable for Theme {
    fn type_name(&self) -> &str {
        "Theme"
    }

    fn properties(&self) -> Map {
        let colors = [
            ("background", self.background),
            ("foreground", self.foreground),
            ("title_bar_bg", self.title_bar_bg),
            ("title_bar_fg", self.title_bar_fg),
            ("echo", self.echo),
            ("prompt", self.prompt),
            ("completion", self.completion),
            ("error", self.error),
            ("warning", self.warning),
        ];

        let mut map: Map = colors
            .into_iter()
            .map(|(name, color)| (name.into(), Dynamic::from(color.to_hex())))
            .collect();
        map.insert("name".into(), Dynamic::from(self.name.clone()));
        map
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::gruvbox_dark()
    }
}
