//! verda-core
//!
//! Business logic and services for verda. Depends on verda-domain.
//! No CLI, no terminal I/O, no storage implementations beyond the in-memory
//! reference backend.

pub mod aggregation_service;
pub mod auth;
pub mod bill_service;
pub mod classifier_service;
pub mod error;
pub mod extraction;
pub mod public_api;
pub mod random;
pub mod reward_service;
pub mod storage;
pub mod suggestion_service;
pub mod threshold_service;
pub mod time;
pub mod trend_service;

pub use error::CoreError;

pub use aggregation_service::*;
pub use auth::*;
pub use bill_service::*;
pub use classifier_service::*;
pub use extraction::*;
pub use public_api::*;
pub use random::*;
pub use reward_service::*;
pub use storage::*;
pub use suggestion_service::*;
pub use threshold_service::*;
pub use time::*;
pub use trend_service::*;

#[cfg(test)]
mod tests;
