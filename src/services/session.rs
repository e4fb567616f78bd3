use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generation counter tied to the active feed view
///
/// Each view instance takes a ticket when it starts loading. Dismissing the view,
/// or starting a new one, makes every outstanding ticket stale so late results
/// are discarded instead of applied.
#[derive(Debug, Clone, Default)]
pub struct ViewGuard {
    generation: Arc<AtomicU64>,
}

impl ViewGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new view instance, invalidating older tickets
    pub fn begin(&self) -> ViewTicket {
        let issued = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        ViewTicket {
            generation: self.generation.clone(),
            issued,
        }
    }

    /// The view went away; nothing in flight may apply its result
    pub fn dismiss(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
pub struct ViewTicket {
    generation: Arc<AtomicU64>,
    issued: u64,
}

impl ViewTicket {
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.issued
    }
}
