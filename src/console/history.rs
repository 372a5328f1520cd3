//! Bounded submission history with up/down navigation
//!
//! Entries are most-recent-first. The cursor is `None` while the user edits
//! live; browsing saves the live text (the draft) and the caret position so
//! both come back when navigation returns to the live edit.

use std::collections::VecDeque;

use tracing::debug;

use super::Entry;

/// How many submitted lines are kept
pub const HISTORY_LENGTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Navigation hit the end of the log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Up past the oldest entry
    Oldest,
    /// Down past the live edit
    LiveEdit,
}

/// Where to put the caret after navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretSnapshot {
    Column(usize),
    /// The caret was at the end; every entry gets it at its own end
    End,
}

impl CaretSnapshot {
    fn capture(entry: &Entry) -> Self {
        if entry.caret_at_end() {
            CaretSnapshot::End
        } else {
            CaretSnapshot::Column(entry.caret())
        }
    }

    fn apply(self, entry: &mut Entry) {
        match self {
            CaretSnapshot::Column(col) => entry.set_caret(col),
            CaretSnapshot::End => entry.set_caret(entry.len_chars()),
        }
    }
}

#[derive(Debug, Clone)]
struct Draft {
    text: String,
    /// `None` once the caret moved outside navigation
    caret: Option<CaretSnapshot>,
}

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    capacity: usize,
    cursor: Option<usize>,
    draft: Option<Draft>,
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_LENGTH)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
            cursor: None,
            draft: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent first
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Record a submitted line, evicting the oldest past capacity
    pub fn push(&mut self, line: &str) {
        self.entries.push_front(line.to_string());
        self.entries.truncate(self.capacity);
    }

    /// Back to live edit without touching the entry
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
        self.draft = None;
    }

    /// The caret moved through something other than navigation
    pub fn invalidate_caret(&mut self) {
        if let Some(draft) = &mut self.draft {
            draft.caret = None;
        }
    }

    /// Move the cursor and show the result in `entry`
    pub fn navigate(&mut self, direction: Direction, entry: &mut Entry) -> Result<(), Boundary> {
        let target = match direction {
            Direction::Up => {
                let next = self.cursor.map_or(0, |idx| idx + 1);
                if next >= self.entries.len() {
                    debug!(len = self.entries.len(), "history: already at oldest entry");
                    return Err(Boundary::Oldest);
                }
                Some(next)
            }
            Direction::Down => match self.cursor {
                None => {
                    debug!("history: already at live edit");
                    return Err(Boundary::LiveEdit);
                }
                Some(0) => None,
                Some(idx) => Some(idx - 1),
            },
        };

        let draft = self.draft.get_or_insert_with(|| Draft {
            text: entry.text().to_string(),
            caret: None,
        });
        let caret = *draft.caret.get_or_insert_with(|| CaretSnapshot::capture(entry));

        self.cursor = target;
        match target {
            Some(idx) => entry.set_text(&self.entries[idx]),
            None => {
                let text = self.draft.take().map(|draft| draft.text).unwrap_or_default();
                entry.set_text(&text);
            }
        }
        caret.apply(entry);

        Ok(())
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::CaretMotion;

    fn history_of(lines: &[&str]) -> History {
        let mut history = History::new();
        for line in lines {
            history.push(line);
        }
        history
    }

    fn entry_with(text: &str) -> Entry {
        let mut entry = Entry::new();
        entry.set_text(text);
        entry
    }

    #[test]
    fn push_is_most_recent_first() {
        let history = history_of(&["a", "b", "c"]);
        assert_eq!(history.entries().collect::<Vec<_>>(), vec!["c", "b", "a"]);
    }

    #[test]
    fn push_evicts_oldest_past_capacity() {
        let mut history = History::new();
        for i in 0..45 {
            history.push(&i.to_string());
            assert!(history.len() <= HISTORY_LENGTH);
        }
        let kept: Vec<_> = history.entries().collect();
        assert_eq!(kept.len(), HISTORY_LENGTH);
        assert_eq!(kept[0], "44");
        assert_eq!(kept[HISTORY_LENGTH - 1], "15");
    }

    #[test]
    fn duplicates_are_kept() {
        let history = history_of(&["x", "x"]);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn up_walks_from_newest_to_oldest() {
        let mut history = history_of(&["a", "b", "c"]);
        let mut entry = Entry::new();

        let mut seen = Vec::new();
        for _ in 0..3 {
            history.navigate(Direction::Up, &mut entry).unwrap();
            seen.push(entry.text().to_string());
        }
        assert_eq!(seen, vec!["c", "b", "a"]);

        assert_eq!(
            history.navigate(Direction::Up, &mut entry),
            Err(Boundary::Oldest)
        );
        assert_eq!(entry.text(), "a");
        assert_eq!(history.cursor(), Some(2));
    }

    #[test]
    fn up_on_empty_history_is_a_boundary() {
        let mut history = History::new();
        let mut entry = entry_with("draft");
        assert_eq!(
            history.navigate(Direction::Up, &mut entry),
            Err(Boundary::Oldest)
        );
        assert_eq!(entry.text(), "draft");
        assert!(!history.is_browsing());
    }

    #[test]
    fn down_from_live_edit_is_a_boundary() {
        let mut history = history_of(&["a"]);
        let mut entry = entry_with("draft");
        assert_eq!(
            history.navigate(Direction::Down, &mut entry),
            Err(Boundary::LiveEdit)
        );
        assert_eq!(entry.text(), "draft");
    }

    #[test]
    fn down_returns_to_draft_text_and_caret() {
        let mut history = history_of(&["a", "b", "c"]);
        let mut entry = entry_with("let draft");
        entry.set_caret(3);

        for _ in 0..3 {
            history.navigate(Direction::Up, &mut entry).unwrap();
        }

        let mut seen = Vec::new();
        for _ in 0..3 {
            history.navigate(Direction::Down, &mut entry).unwrap();
            seen.push(entry.text().to_string());
        }
        assert_eq!(seen, vec!["b", "c", "let draft"]);
        assert_eq!(entry.caret(), 3);
        assert!(!history.is_browsing());
    }

    #[test]
    fn caret_at_end_follows_each_entry_end() {
        let mut history = history_of(&["short", "a much longer line"]);
        let mut entry = entry_with("xy");

        history.navigate(Direction::Up, &mut entry).unwrap();
        assert!(entry.caret_at_end());
        history.navigate(Direction::Up, &mut entry).unwrap();
        assert_eq!(entry.text(), "short");
        assert!(entry.caret_at_end());
    }

    #[test]
    fn literal_column_is_reused_and_clamped() {
        let mut history = history_of(&["ab", "abcdefgh"]);
        let mut entry = entry_with("0123456789");
        entry.set_caret(4);

        history.navigate(Direction::Up, &mut entry).unwrap();
        assert_eq!(entry.caret(), 4);
        history.navigate(Direction::Up, &mut entry).unwrap();
        assert_eq!(entry.caret(), 2);
    }

    #[test]
    fn moved_caret_is_recaptured_on_next_navigation() {
        let mut history = history_of(&["first line", "second line"]);
        let mut entry = Entry::new();

        history.navigate(Direction::Up, &mut entry).unwrap();
        entry.move_caret(CaretMotion::Home);
        entry.move_caret(CaretMotion::Right);
        history.invalidate_caret();

        history.navigate(Direction::Up, &mut entry).unwrap();
        assert_eq!(entry.text(), "first line");
        assert_eq!(entry.caret(), 1);
    }

    #[test]
    fn draft_is_captured_once_per_browse() {
        let mut history = history_of(&["a", "b"]);
        let mut entry = entry_with("live");

        history.navigate(Direction::Up, &mut entry).unwrap();
        // Editing a recalled entry does not replace the draft
        entry.insert_str("!!");
        history.navigate(Direction::Up, &mut entry).unwrap();
        history.navigate(Direction::Down, &mut entry).unwrap();
        history.navigate(Direction::Down, &mut entry).unwrap();
        assert_eq!(entry.text(), "live");
    }

    #[test]
    fn reset_cursor_drops_draft() {
        let mut history = history_of(&["a"]);
        let mut entry = entry_with("one");
        history.navigate(Direction::Up, &mut entry).unwrap();
        history.reset_cursor();
        assert!(!history.is_browsing());

        entry.set_text("two");
        history.navigate(Direction::Up, &mut entry).unwrap();
        history.navigate(Direction::Down, &mut entry).unwrap();
        assert_eq!(entry.text(), "two");
    }
}
