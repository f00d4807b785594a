//! Quote lifecycle engine.
//!
//! `Marketplace` owns every collection; the operations are split by concern
//! across the submodules as `impl Marketplace` blocks.

pub mod clock;
pub mod denunciations;
pub mod directory;
pub mod error;
pub mod marketplace;
pub mod notifications;
pub mod payments;
pub mod pricing;
pub mod quotes;
pub mod reviews;
pub mod state_machine;
pub mod support;

pub use clock::{Clock, FixedClock, SystemClock};
pub use directory::DirectoryEntry;
pub use error::{EngineError, EngineResult};
pub use marketplace::{Marketplace, MarketplaceConfig, SharedMarketplace};
