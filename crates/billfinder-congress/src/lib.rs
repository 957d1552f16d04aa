//! billfinder-congress
//!
//! Read-only access to the Congress.gov v3 API: the recently updated bill
//! listing, per-bill summaries and text versions, and plain-text extraction
//! from fetched bill documents.

pub mod client;
pub mod error;
pub mod markup;
pub mod scripted;
pub mod source;
pub mod types;

pub use client::CongressClient;
pub use error::CongressError;
pub use source::BillSource;
