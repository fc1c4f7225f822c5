//! Parallel directory size aggregation
//!
//! This module measures a directory tree bottom-up, one scoped thread per
//! subdirectory, and gathers every file and directory at or above a size
//! threshold.
//!
//! # Architecture
//!
//! ```text
//!                     ┌─────────────────────────┐
//!                     │        Scanner          │
//!                     │  - threshold, excludes  │
//!                     │  - ResultCollection     │
//!                     └───────────┬─────────────┘
//!                                 │ aggregate(root)
//!       ┌─────────────────────────┼─────────────────────────┐
//!       │                         │                         │
//! ┌─────▼─────┐             ┌─────▼─────┐             ┌─────▼─────┐
//! │ subdir 1  │             │ subdir 2  │             │ subdir N  │
//! │ own thread│             │ own thread│             │ own thread│
//! └─────┬─────┘             └─────┬─────┘             └─────┬─────┘
//!       └──────── join, sum ──────┴──────── join, sum ──────┘
//! ```

pub mod aggregate;
pub mod results;

pub use aggregate::{ScanReport, ScanStats, Scanner};
pub use results::{Entry, EntryKind, ResultCollection};
