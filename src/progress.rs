// src/progress.rs
/// Lightweight progress reporting used by long-running stages (fetch/publish).
/// Frontends implement this to surface status; the library never prints.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one logical unit completes (e.g., a player's history was fetched).
    fn item_done(&mut self, _id: i64) {}

    /// Called when one unit failed and was skipped.
    fn item_failed(&mut self, _id: i64, _cause: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Forwards progress to `tracing`. Per-item successes are `debug` so a
/// normal run logs one line per stage, not one per player.
#[derive(Default)]
pub struct LogProgress {
    total: usize,
    done: usize,
    failed: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        *self = Self { total, ..Self::default() };
    }

    fn log(&mut self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn item_done(&mut self, id: i64) {
        self.done += 1;
        tracing::debug!(entity_id = id, done = self.done, total = self.total, "item done");
    }

    fn item_failed(&mut self, id: i64, cause: &str) {
        self.failed += 1;
        tracing::warn!(entity_id = id, cause, "item failed, skipping");
    }

    fn finish(&mut self) {
        if self.total > 0 {
            tracing::info!(done = self.done, failed = self.failed, total = self.total, "batch finished");
        }
    }
}
