//! billfinder-storage
//!
//! Document storage. A [`store::DocumentStore`] trait with an S3-backed
//! implementation (thin wrapper around the AWS S3 SDK) and an in-memory
//! implementation for tests and local runs.

pub mod client;
pub mod error;
pub mod memory;
pub mod objects;
pub mod s3;
pub mod store;
