//! Concurrent store of live matches.
//!
//! Each match sits behind its own mutex inside a `DashMap`, so
//! transitions on one match are serialized while different matches never
//! contend. A transaction works on a clone of the match state and only
//! swaps it in after the closure and the snapshot sink both succeed.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, info};

use super::aggregate::MatchAggregate;
use super::sink::{NullSink, SnapshotSink};
use super::state::{MatchSnapshot, MatchState};
use crate::core::entity::MatchId;
use crate::core::error::{TableError, TableResult};
use crate::notify::event::{Applied, ChangeReason, MatchChanged};

#[derive(Debug)]
struct MatchSlot {
    state: MatchState,
    /// Set once the match is deleted; late transactions must not commit.
    retired: bool,
}

type SlotHandle = Arc<Mutex<MatchSlot>>;

pub struct MatchStore {
    matches: DashMap<MatchId, SlotHandle>,
    sink: Arc<dyn SnapshotSink>,
}

impl Default for MatchStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MatchStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchStore")
            .field("matches", &self.matches.len())
            .finish_non_exhaustive()
    }
}

impl MatchStore {
    /// Create a store with no persistence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(Arc::new(NullSink))
    }

    #[must_use]
    pub fn with_sink(sink: Arc<dyn SnapshotSink>) -> Self {
        Self {
            matches: DashMap::new(),
            sink,
        }
    }

    /// Register a new match. Fails if the id is already taken.
    pub fn insert(&self, state: MatchState) -> TableResult<MatchAggregate> {
        let id = state.id();
        match self.matches.entry(id) {
            Entry::Occupied(_) => Err(TableError::invalid(format!("match {id} already exists"))),
            Entry::Vacant(slot) => {
                self.sink.persist(&state.snapshot())?;
                let aggregate = state.aggregate.clone();
                slot.insert(Arc::new(Mutex::new(MatchSlot {
                    state,
                    retired: false,
                })));
                info!(match_id = %id, "match registered");
                Ok(aggregate)
            }
        }
    }

    /// Delete a match. Returns whether it existed.
    pub fn remove(&self, id: MatchId) -> TableResult<bool> {
        let Some(handle) = self.handle(id) else {
            return Ok(false);
        };
        let mut slot = handle.lock();
        if slot.retired {
            return Ok(false);
        }
        self.sink.discard(id)?;
        slot.retired = true;
        self.matches.remove(&id);
        info!(match_id = %id, "match deleted");
        Ok(true)
    }

    #[must_use]
    pub fn contains(&self, id: MatchId) -> bool {
        self.matches.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Aggregates of every live match, in no particular order.
    #[must_use]
    pub fn aggregates(&self) -> Vec<MatchAggregate> {
        // Collect handles first so no map shard is held while locking a match.
        let handles: Vec<SlotHandle> = self.matches.iter().map(|e| Arc::clone(e.value())).collect();
        handles
            .iter()
            .filter_map(|handle| {
                let slot = handle.lock();
                (!slot.retired).then(|| slot.state.aggregate.clone())
            })
            .collect()
    }

    /// Run a read-only query against a match.
    pub fn read<T>(&self, id: MatchId, f: impl FnOnce(&MatchState) -> TableResult<T>) -> TableResult<T> {
        let handle = self.handle(id).ok_or(TableError::MatchNotFound(id))?;
        let slot = handle.lock();
        if slot.retired {
            return Err(TableError::MatchNotFound(id));
        }
        f(&slot.state)
    }

    /// Apply a mutation atomically and bump the match version.
    pub fn transact<T>(
        &self,
        id: MatchId,
        reason: ChangeReason,
        f: impl FnOnce(&mut MatchState) -> TableResult<T>,
    ) -> TableResult<Applied<T>> {
        self.transact_if(id, reason, |state| f(state).map(Some))?
            .ok_or_else(|| TableError::invalid("transaction produced no value"))
    }

    /// Like `transact`, but a closure returning `Ok(None)` commits nothing
    /// and produces no change signal.
    pub fn transact_if<T>(
        &self,
        id: MatchId,
        reason: ChangeReason,
        f: impl FnOnce(&mut MatchState) -> TableResult<Option<T>>,
    ) -> TableResult<Option<Applied<T>>> {
        let handle = self.handle(id).ok_or(TableError::MatchNotFound(id))?;
        let mut slot = handle.lock();
        if slot.retired {
            return Err(TableError::MatchNotFound(id));
        }

        let mut working = slot.state.clone();
        let value = match f(&mut working) {
            Ok(Some(value)) => value,
            Ok(None) => return Ok(None),
            Err(e) => {
                debug!(match_id = %id, ?reason, error = %e, "transition rejected");
                return Err(e);
            }
        };

        let version = working.aggregate.bump();
        self.sink.persist(&working.snapshot())?;
        slot.state = working;

        debug!(match_id = %id, ?reason, version, "transition committed");
        Ok(Some(Applied {
            value,
            change: MatchChanged {
                match_id: id,
                version,
                reason,
            },
        }))
    }

    /// Re-register a match from a snapshot, e.g. after a process restart.
    pub fn restore(&self, snapshot: MatchSnapshot) -> TableResult<MatchAggregate> {
        self.insert(MatchState::from_snapshot(snapshot))
    }

    fn handle(&self, id: MatchId) -> Option<SlotHandle> {
        self.matches.get(&id).map(|entry| Arc::clone(entry.value()))
    }
}
