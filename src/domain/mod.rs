//! Domain types and DTOs
//!
//! Plain data for the marketplace: users, quotes, denunciations, support
//! tickets and notifications. Behaviour lives in `crate::services`.

pub mod denunciations;
pub mod notifications;
pub mod quotes;
pub mod support;
pub mod users;

// Re-export commonly used types
pub use denunciations::*;
pub use notifications::*;
pub use quotes::*;
pub use support::*;
pub use users::*;
