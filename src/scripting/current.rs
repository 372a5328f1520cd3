//! The process-wide "current engine" marker
//!
//! Only one engine may be executing at a time. Sessions do not lock the
//! marker, they swap it in and restore it around each call with
//! [`CurrentGuard`]. Calls are strictly nested on one thread, so the marker
//! lives in a thread local.

use std::cell::Cell;

use super::EngineId;

thread_local! {
    static CURRENT: Cell<Option<EngineId>> = const { Cell::new(None) };
}

/// The engine currently allowed to execute, if any
pub fn current() -> Option<EngineId> {
    CURRENT.with(Cell::get)
}

/// Replace the marker. A new engine may only be made current after the
/// marker was cleared.
pub fn make_current(id: Option<EngineId>) {
    CURRENT.with(|cell| {
        debug_assert!(
            id.is_none() || cell.get().is_none(),
            "engine made current while another one still is"
        );
        cell.set(id);
    });
}

/// Makes one engine current for its lifetime and restores whatever was
/// current before, on every exit path.
#[must_use = "the previous engine is restored when the guard is dropped"]
pub struct CurrentGuard {
    previous: Option<EngineId>,
    swapped: bool,
}

impl CurrentGuard {
    pub fn enter(id: EngineId) -> Self {
        let previous = current();
        // Reentry from the same engine keeps the marker as is
        let swapped = previous != Some(id);
        if swapped {
            make_current(None);
            make_current(Some(id));
        }
        Self { previous, swapped }
    }
}

impl Drop for CurrentGuard {
    fn drop(&mut self) {
        if self.swapped {
            make_current(None);
            make_current(self.previous);
        }
    }
}

/// Run `f` with `id` as the current engine
pub fn with_current<R>(id: EngineId, f: impl FnOnce() -> R) -> R {
    let _guard = CurrentGuard::enter(id);
    f()
}
