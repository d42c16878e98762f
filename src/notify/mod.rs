//! Change signals and their delivery.
//!
//! ## Key Types
//!
//! - `MatchChanged`: Signal emitted by every committed mutation
//! - `Applied<T>`: A mutation's result plus its signal
//! - `ChangeNotifier`: Transport seam, implemented by the host
//! - `TableService`: Engine façade that publishes each signal once

pub mod event;
pub mod notifier;
pub mod service;

pub use event::{Applied, ChangeReason, MatchChanged, PeekNotice};
pub use notifier::{ChangeNotifier, NoopNotifier, NotifyError, RecordingNotifier};
pub use service::TableService;
