/// Prompt indicator in front of the entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Prompt {
    #[default]
    Primary,
    /// Accumulated input is not a complete unit yet
    Continuation,
}

impl Prompt {
    pub fn marker(&self) -> &'static str {
        match self {
            Prompt::Primary => "» ",
            Prompt::Continuation => "… ",
        }
    }
}

/// Lines submitted since the last complete unit
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    pending: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn push_line(&mut self, line: &str) {
        if !self.pending.is_empty() {
            self.pending.push('\n');
        }
        self.pending.push_str(line);
    }

    /// Hand out the accumulated text, leaving the buffer empty
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.pending)
    }
}
