use std::sync::atomic::{AtomicUsize, Ordering};

use crate::console::Alert;

/// Pending error-bell signals, rung by the renderer
#[derive(Debug, Default)]
pub struct Bell {
    pending: AtomicUsize,
}

impl Bell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ring(&self) {
        self.pending.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of signals since the last call
    pub fn take_pending(&self) -> usize {
        self.pending.swap(0, Ordering::Relaxed)
    }
}

impl Alert for Bell {
    fn error_bell(&self) {
        self.ring();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_resets_the_count() {
        let bell = Bell::new();
        bell.error_bell();
        bell.error_bell();
        assert_eq!(bell.take_pending(), 2);
        assert_eq!(bell.take_pending(), 0);
    }
}
