//! Error taxonomy for table operations.
//!
//! Every engine call either applies fully or returns one of these.
//! `EmptyPile` is an expected outcome rather than a fault; `draw` and
//! `peek` normally report it as `Ok(None)` and only the `*_or_err`
//! helpers surface it as an error.

use thiserror::Error;

use super::entity::{InstanceId, MatchId};
use super::player::Side;
use crate::cards::CatalogueId;
use crate::zones::DeckKind;

/// Failures of the persistence layer behind the match store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] bincode::Error),
    #[error("snapshot sink rejected write: {0}")]
    Sink(String),
}

#[derive(Error, Debug)]
pub enum TableError {
    #[error("match {0} not found")]
    MatchNotFound(MatchId),
    #[error("{instance} not found in match {match_id}")]
    InstanceNotFound {
        match_id: MatchId,
        instance: InstanceId,
    },
    #[error("catalogue entry {0} not found")]
    CardNotFound(CatalogueId),
    #[error("no cards left in {side} {deck}")]
    EmptyPile { side: Side, deck: DeckKind },
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl TableError {
    /// Unknown match, instance or catalogue entry.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TableError::MatchNotFound(_)
                | TableError::InstanceNotFound { .. }
                | TableError::CardNotFound(_)
        )
    }

    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, TableError::Storage(_))
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        TableError::InvalidTransition(message.into())
    }
}

pub type TableResult<T> = Result<T, TableError>;
