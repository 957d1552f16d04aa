//! billfinder-query
//!
//! Read path over the `bills` collection: demographic matching, the
//! unfiltered newest list, single-bill lookup and the debug report.

pub mod bills;
pub mod diagnostics;
pub mod error;
pub mod filter;
