//! The handle a session exposes to script code
//!
//! Script code reads the bound object, drives the completion display and
//! queues text for the entry through this handle instead of receiving them
//! as arguments.

use std::sync::{Arc, PoisonError, RwLock};

use rhai::Map;

use crate::console::CompletionDisplay;

/// Something the console can be bound to and inspect
pub trait Inspectable: Send + Sync {
    fn type_name(&self) -> &str;

    /// Snapshot of the object's properties as a script map
    fn properties(&self) -> Map;
}

/// Shared, reference-counted handle to an inspected object
pub type ObjectRef = Arc<dyn Inspectable>;

/// Identity comparison, ignoring the vtable half of the fat pointer
pub fn same_object(a: Option<&ObjectRef>, b: Option<&ObjectRef>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
        (None, None) => true,
        _ => false,
    }
}

pub struct Binding {
    object: RwLock<Option<ObjectRef>>,
    completion: Arc<dyn CompletionDisplay>,
    /// Text for the session to insert at the caret once the call returns
    insertion: RwLock<String>,
}

impl Binding {
    pub fn new(completion: Arc<dyn CompletionDisplay>) -> Self {
        Self {
            object: RwLock::new(None),
            completion,
            insertion: RwLock::new(String::new()),
        }
    }

    pub fn object(&self) -> Option<ObjectRef> {
        self.object
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Store `object`, returning true if its identity differs from the one
    /// held before. The previous reference is released either way.
    pub fn replace_object(&self, object: Option<ObjectRef>) -> bool {
        let mut slot = self.object.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *slot, object);
        !same_object(previous.as_ref(), slot.as_ref())
    }

    pub fn completion(&self) -> &dyn CompletionDisplay {
        self.completion.as_ref()
    }

    pub fn insert_at_cursor(&self, text: &str) {
        self.insertion
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push_str(text);
    }

    /// Queued insertion text, if any, leaving the queue empty
    pub fn take_insertion(&self) -> Option<String> {
        let mut insertion = self.insertion.write().unwrap_or_else(PoisonError::into_inner);
        (!insertion.is_empty()).then(|| std::mem::take(&mut *insertion))
    }
}
