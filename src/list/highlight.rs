use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tokio::task::JoinHandle;

pub const HIGHLIGHT_DURATION: Duration = Duration::from_secs(2);

/// One highlight slot. Marking a new id cancels the pending timer of the old
/// one, so only the most recent highlight is ever cleared on schedule.
#[derive(Clone, Debug)]
pub struct Highlight {
    slot: Arc<Mutex<Slot>>,
    duration: Duration,
}

#[derive(Debug, Default)]
struct Slot {
    id: Option<i32>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl Default for Highlight {
    fn default() -> Self {
        Self::with_duration(HIGHLIGHT_DURATION)
    }
}

impl Highlight {
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            slot: Arc::default(),
            duration,
        }
    }

    fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
        slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current(&self) -> Option<i32> {
        Self::lock(&self.slot).id
    }

    /// Must be called from within a tokio runtime.
    pub fn mark(&self, id: i32) {
        let mut slot = Self::lock(&self.slot);
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }

        slot.generation += 1;
        slot.id = Some(id);

        let generation = slot.generation;
        let shared = Arc::clone(&self.slot);
        let duration = self.duration;
        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;

            let mut slot = Self::lock(&shared);
            // an aborted timer can still get here if it woke before the abort
            if slot.generation == generation {
                slot.id = None;
                slot.timer = None;
            }
        }));
    }

    pub fn clear(&self) {
        let mut slot = Self::lock(&self.slot);
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
        slot.generation += 1;
        slot.id = None;
    }
}
