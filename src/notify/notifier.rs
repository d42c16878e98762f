//! Delivery seam for change signals.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

use super::event::{MatchChanged, PeekNotice};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("notification transport failed: {0}")]
    Transport(String),
}

/// Receives change signals after successful commits.
///
/// Implementations deliver them to other viewers however they like.
/// Errors are reported back but never undo the change.
pub trait ChangeNotifier: Send + Sync {
    fn match_changed(&self, change: &MatchChanged) -> Result<(), NotifyError>;

    /// A player looked at cards from one of their decks.
    fn player_peeked(&self, _notice: &PeekNotice) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Discards every signal.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifier;

impl ChangeNotifier for NoopNotifier {
    fn match_changed(&self, _change: &MatchChanged) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Keeps every signal in memory. Can be switched to fail on demand.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    changes: Mutex<Vec<MatchChanged>>,
    peeks: Mutex<Vec<PeekNotice>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later delivery fail (after recording it).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    #[must_use]
    pub fn changes(&self) -> Vec<MatchChanged> {
        self.changes.lock().clone()
    }

    #[must_use]
    pub fn peeks(&self) -> Vec<PeekNotice> {
        self.peeks.lock().clone()
    }

    pub fn clear(&self) {
        self.changes.lock().clear();
        self.peeks.lock().clear();
    }

    fn outcome(&self) -> Result<(), NotifyError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(NotifyError::Transport("recording notifier set to fail".into()))
        } else {
            Ok(())
        }
    }
}

impl ChangeNotifier for RecordingNotifier {
    fn match_changed(&self, change: &MatchChanged) -> Result<(), NotifyError> {
        self.changes.lock().push(*change);
        self.outcome()
    }

    fn player_peeked(&self, notice: &PeekNotice) -> Result<(), NotifyError> {
        self.peeks.lock().push(*notice);
        self.outcome()
    }
}

impl<N: ChangeNotifier + ?Sized> ChangeNotifier for std::sync::Arc<N> {
    fn match_changed(&self, change: &MatchChanged) -> Result<(), NotifyError> {
        (**self).match_changed(change)
    }

    fn player_peeked(&self, notice: &PeekNotice) -> Result<(), NotifyError> {
        (**self).player_peeked(notice)
    }
}
