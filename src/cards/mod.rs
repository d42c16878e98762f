//! Card system: catalogue entries, instances and catalogue lookup.
//!
//! ## Key Types
//!
//! - `CatalogueId`: Identifier of a printed card
//! - `CardKind`: Printed card kind (unit, rune, battlefield, ...)
//! - `CardDefinition`: Immutable catalogue metadata
//! - `CardInstance`: One token on the table (zone, position, orientation)
//! - `CardCatalogue`: Lookup seam consumed by the engine
//! - `CardRegistry`: In-memory catalogue

pub mod attributes;
pub mod definition;
pub mod instance;
pub mod registry;

pub use attributes::{AttributeKey, AttributeValue, Attributes};
pub use definition::{CardDefinition, CardKind, CatalogueId};
pub use instance::CardInstance;
pub use registry::{CardCatalogue, CardRegistry};
