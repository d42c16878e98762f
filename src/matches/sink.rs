//! Persistence seam behind the match store.
//!
//! The store calls `persist` with the post-change snapshot before it
//! commits. An error aborts the transaction, so durable state and live
//! state never disagree.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::state::MatchSnapshot;
use crate::core::entity::MatchId;
use crate::core::error::StorageError;

pub trait SnapshotSink: Send + Sync {
    /// Durably record the snapshot of a match.
    fn persist(&self, snapshot: &MatchSnapshot) -> Result<(), StorageError>;

    /// Forget a deleted match.
    fn discard(&self, match_id: MatchId) -> Result<(), StorageError>;
}

/// Sink that stores nothing. The live store is the only copy.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn persist(&self, _snapshot: &MatchSnapshot) -> Result<(), StorageError> {
        Ok(())
    }

    fn discard(&self, _match_id: MatchId) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Keeps the latest bincode-encoded snapshot of every match in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    blobs: Mutex<FxHashMap<MatchId, Vec<u8>>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the latest snapshot stored for a match.
    pub fn load(&self, match_id: MatchId) -> Result<Option<MatchSnapshot>, StorageError> {
        let blobs = self.blobs.lock();
        blobs
            .get(&match_id)
            .map(|bytes| MatchSnapshot::decode(bytes))
            .transpose()
            .map_err(StorageError::from)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotSink for MemorySink {
    fn persist(&self, snapshot: &MatchSnapshot) -> Result<(), StorageError> {
        let bytes = snapshot.encode()?;
        self.blobs.lock().insert(snapshot.aggregate.id, bytes);
        Ok(())
    }

    fn discard(&self, match_id: MatchId) -> Result<(), StorageError> {
        self.blobs.lock().remove(&match_id);
        Ok(())
    }
}
