use anyhow::{Result, anyhow};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub mod store;

pub use store::{Store, StoreError};

/// Raw persistence boundary: one serialized document under one key,
/// last-writer-wins. The browser frontend implements this over
/// `localStorage`; tests and native callers use [`MemoryBackend`].
pub trait StateBackend {
    fn read(&self) -> Result<Option<String>>;
    fn write(&self, raw: &str) -> Result<()>;
}

/// In-memory backend. Clones share the same slot, which lets tests model
/// two tabs writing through one storage area.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    raw: Arc<Mutex<Option<String>>>,
}

impl StateBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>> {
        let guard = self.raw.lock().map_err(|_| anyhow!("state slot poisoned"))?;
        Ok(guard.clone())
    }

    fn write(&self, raw: &str) -> Result<()> {
        let mut guard = self.raw.lock().map_err(|_| anyhow!("state slot poisoned"))?;
        *guard = Some(raw.to_owned());
        Ok(())
    }
}

pub trait Clock {
    fn now_epoch_ms(&self) -> u128;
}

#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0)
    }
}

/// Collision-resistant record id with a human-readable prefix
/// (`U-…`, `ORD-…`, `TX-…`).
pub fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}
