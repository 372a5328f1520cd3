use std::collections::VecDeque;
use std::sync::{PoisonError, RwLock};

use crate::console::TranscriptSink;

/// Bounded, append-only log of everything the console printed.
/// The oldest lines are dropped once `limit` is exceeded.
#[derive(Debug)]
pub struct Transcript {
    lines: RwLock<VecDeque<String>>,
    limit: usize,
}

impl Transcript {
    pub fn new(limit: usize) -> Self {
        Self {
            lines: RwLock::new(VecDeque::new()),
            limit: limit.max(1),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.read().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn clear(&self) {
        self.lines
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Up to `height` lines ending `scroll` lines above the newest one
    pub fn window(&self, height: usize, scroll: usize) -> Vec<String> {
        let lines = self.read();
        let end = lines.len().saturating_sub(scroll);
        let start = end.saturating_sub(height);
        lines.range(start..end).cloned().collect()
    }

    /// Largest useful scroll offset for a view of `height` lines
    pub fn max_scroll(&self, height: usize) -> usize {
        self.len().saturating_sub(height)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, VecDeque<String>> {
        self.lines.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TranscriptSink for Transcript {
    /// Multi-line text is split so every stored line is one screen row
    fn append_line(&self, line: &str) {
        let mut lines = self.lines.write().unwrap_or_else(PoisonError::into_inner);
        for part in line.split('\n') {
            lines.push_back(part.to_string());
        }
        while lines.len() > self.limit {
            lines.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_line_text_is_split() {
        let transcript = Transcript::new(10);
        transcript.append_line("a\nb");
        transcript.append_line("");
        assert_eq!(transcript.lines(), vec!["a", "b", ""]);
    }

    #[test]
    fn oldest_lines_are_dropped_past_the_limit() {
        let transcript = Transcript::new(3);
        for i in 0..5 {
            transcript.append_line(&i.to_string());
        }
        assert_eq!(transcript.lines(), vec!["2", "3", "4"]);
    }

    #[test]
    fn window_follows_scroll_offset() {
        let transcript = Transcript::new(100);
        for i in 0..10 {
            transcript.append_line(&i.to_string());
        }
        assert_eq!(transcript.window(3, 0), vec!["7", "8", "9"]);
        assert_eq!(transcript.window(3, 2), vec!["5", "6", "7"]);
        assert_eq!(transcript.window(3, 50), Vec::<String>::new());
        assert_eq!(transcript.max_scroll(3), 7);
    }

    #[test]
    fn clear_empties_the_log() {
        let transcript = Transcript::new(10);
        transcript.append_line("x");
        transcript.clear();
        assert_eq!(transcript.len(), 0);
    }
}
