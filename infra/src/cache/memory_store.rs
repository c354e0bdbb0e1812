//! Sharded in-memory passcode store
//!
//! Phone numbers hash onto a fixed set of shards, each guarded by its own
//! mutex. Every store operation holds exactly one shard lock and never
//! awaits while holding it.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use uuid::Uuid;

use pv_core::domain::OtpRecord;
use pv_core::services::OtpStoreTrait;

/// Default number of lock shards
pub const DEFAULT_SHARDS: usize = 16;

type Shard = Mutex<HashMap<String, OtpRecord>>;

/// Thread-safe passcode table keyed by phone number
pub struct MemoryOtpStore {
    shards: Vec<Shard>,
}

impl MemoryOtpStore {
    /// Create a store with [`DEFAULT_SHARDS`] shards
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARDS)
    }

    /// Create a store with `shards` lock shards (at least one)
    pub fn with_shards(shards: usize) -> Self {
        let shards = (0..shards.max(1))
            .map(|_| Mutex::new(HashMap::new()))
            .collect();
        Self { shards }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard_for(&self, phone: &str) -> MutexGuard<'_, HashMap<String, OtpRecord>> {
        let mut hasher = DefaultHasher::new();
        phone.hash(&mut hasher);
        let index = (hasher.finish() % self.shards.len() as u64) as usize;
        lock(&self.shards[index])
    }

    /// Spawn a task that purges records older than `expiry` every `interval`
    ///
    /// The task runs until the returned handle is aborted or the runtime
    /// shuts down.
    pub fn spawn_sweeper(self: &Arc<Self>, expiry: Duration, interval: Duration) -> JoinHandle<()> {
        let store = Arc::clone(self);
        info!(
            interval_seconds = interval.as_secs(),
            expiry_seconds = expiry.as_secs(),
            "Starting passcode sweeper"
        );

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let removed = store.purge_expired(expiry);
                if removed > 0 {
                    debug!(removed = removed, remaining = store.len(), "Purged expired passcodes");
                }
            }
        })
    }
}

impl Default for MemoryOtpStore {
    fn default() -> Self {
        Self::new()
    }
}

// A poisoned shard still holds consistent records: every mutation is a
// single insert, remove, or counter bump.
fn lock(shard: &Shard) -> MutexGuard<'_, HashMap<String, OtpRecord>> {
    shard.lock().unwrap_or_else(PoisonError::into_inner)
}

impl OtpStoreTrait for MemoryOtpStore {
    fn set(&self, phone: &str, code: u16) -> OtpRecord {
        let record = OtpRecord::new(phone, code);
        self.shard_for(phone)
            .insert(phone.to_string(), record.clone());
        record
    }

    fn get(&self, phone: &str) -> Option<OtpRecord> {
        self.shard_for(phone).get(phone).cloned()
    }

    fn remove(&self, phone: &str) {
        self.shard_for(phone).remove(phone);
    }

    fn increment_attempts(&self, phone: &str, session_id: Uuid, max_attempts: u32) -> Option<u32> {
        let mut shard = self.shard_for(phone);
        let record = shard
            .get_mut(phone)
            .filter(|record| record.session_id == session_id)?;

        record.attempts += 1;
        let attempts = record.attempts;
        if attempts >= max_attempts {
            shard.remove(phone);
        }
        Some(attempts)
    }

    fn take_if_current(&self, phone: &str, session_id: Uuid) -> bool {
        let mut shard = self.shard_for(phone);
        let current = shard
            .get(phone)
            .is_some_and(|record| record.session_id == session_id);
        if current {
            shard.remove(phone);
        }
        current
    }

    fn purge_expired(&self, window: Duration) -> usize {
        self.shards
            .iter()
            .map(|shard| {
                let mut records = lock(shard);
                let before = records.len();
                records.retain(|_, record| !record.is_expired(window));
                before - records.len()
            })
            .sum()
    }

    fn len(&self) -> usize {
        self.shards.iter().map(|shard| lock(shard).len()).sum()
    }
}
