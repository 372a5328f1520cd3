mod colors;
mod theme;

use tracing::warn;

pub use colors::Color;
pub use theme::Theme;

pub fn list_builtin_themes() -> Vec<&'static str> {
    vec!["gruvbox-dark", "nord", "dracula"]
}

pub fn get_builtin_theme(name: &str) -> Option<Theme> {
    match name {
        "gruvbox-dark" => Some(Theme::gruvbox_dark()),
        "nord" => Some(Theme::nord()),
        "dracula" => Some(Theme::dracula()),
        _ => None,
    }
}

/// The named theme, or the default one if there is no such theme
pub fn resolve(name: &str) -> Theme {
    get_builtin_theme(name).unwrap_or_else(|| {
        warn!(theme = name, available = ?list_builtin_themes(), "unknown theme, using default");
        Theme::default()
    })
}
