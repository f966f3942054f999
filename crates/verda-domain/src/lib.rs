//! verda-domain
//!
//! Pure domain models (EmissionRecord, Category, status labels, bill
//! analysis results). No I/O, no services, no storage. Only data types
//! and core enums.

pub mod bill;
pub mod common;
pub mod record;
pub mod status;

pub use bill::*;
pub use common::*;
pub use record::*;
pub use status::*;
