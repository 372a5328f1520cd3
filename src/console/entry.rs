/// Caret movements the user can make inside the entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretMotion {
    Left,
    Right,
    Home,
    End,
}

/// The single-line live edit field. The caret is a char index.
#[derive(Debug, Clone, Default)]
pub struct Entry {
    text: String,
    caret: usize,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn caret_at_end(&self) -> bool {
        self.caret == self.len_chars()
    }

    /// Replace the text; the caret goes to the end
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.caret = self.len_chars();
    }

    /// Clamped to the text length
    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.len_chars());
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.caret = 0;
    }

    fn byte_index(&self, caret: usize) -> usize {
        self.text
            .char_indices()
            .nth(caret)
            .map_or(self.text.len(), |(i, _)| i)
    }

    pub fn insert_char(&mut self, ch: char) {
        let idx = self.byte_index(self.caret);
        self.text.insert(idx, ch);
        self.caret += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        let idx = self.byte_index(self.caret);
        self.text.insert_str(idx, s);
        self.caret += s.chars().count();
    }

    /// Delete the character before the caret (backspace)
    pub fn delete_backward(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        self.caret -= 1;
        let idx = self.byte_index(self.caret);
        self.text.remove(idx);
        true
    }

    /// Delete the character under the caret
    pub fn delete_forward(&mut self) -> bool {
        if self.caret_at_end() {
            return false;
        }
        let idx = self.byte_index(self.caret);
        self.text.remove(idx);
        true
    }

    pub fn move_caret(&mut self, motion: CaretMotion) {
        match motion {
            CaretMotion::Left => self.caret = self.caret.saturating_sub(1),
            CaretMotion::Right => self.set_caret(self.caret + 1),
            CaretMotion::Home => self.caret = 0,
            CaretMotion::End => self.caret = self.len_chars(),
        }
    }
}
