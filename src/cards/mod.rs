//! Card system: definitions, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `PowerProfile`: Four directional power values
//! - `CardDefinition`: Static card data owned by the catalog
//! - `InGameCard`: A card on the board (owner, enhancements, effects)
//! - `CardCatalog` / `CardRegistry`: Definition lookup

pub mod definition;
pub mod instance;
pub mod power;
pub mod registry;

pub use definition::{CardDefinition, CardId};
pub use instance::{InGameCard, TemporaryEffect};
pub use power::PowerProfile;
pub use registry::{CardCatalog, CardRegistry, CatalogError, CatalogFile};
