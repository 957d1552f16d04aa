//! billfinder-ingest
//!
//! Pulls recently updated bills from Congress.gov, classifies the
//! populations each one affects and writes the results to the `bills`
//! collection. Also hosts the environment settings shared by the binaries.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod preview;
