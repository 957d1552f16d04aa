//! billfinder-core
//!
//! Pure domain types, demographic vocabulary tables, classification parsing,
//! and document key conventions. No AWS SDK or HTTP dependency; this is the
//! shared vocabulary of the Bill Finder system.

pub mod category;
pub mod classification;
pub mod error;
pub mod keys;
pub mod models;
pub mod vocabulary;
