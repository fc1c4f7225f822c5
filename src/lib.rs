//! spacehogs - Find the files and directories eating your disk space
//!
//! Given a root directory and a minimum size, spacehogs measures the
//! cumulative size of every file and directory beneath it and lists the ones
//! at or above the threshold, directories first, largest first.
//!
//! # Features
//!
//! - **Parallel Aggregation**: Every subdirectory is measured on its own
//!   scoped thread and joined back into its parent's total.
//!
//! - **Name Exclusions**: Bare names such as `proc` or `node_modules` are
//!   pruned at any depth and contribute nothing to their ancestors.
//!
//! - **Graceful Degradation**: Unreadable directories and files are logged
//!   and counted as zero bytes; the rest of the tree is still reported.
//!
//! # Example
//!
//! ```no_run
//! use spacehogs::config::{ExcludeSet, ScanConfig};
//! use spacehogs::walker::Scanner;
//!
//! let config = ScanConfig::new("/var", 100 * 1024 * 1024, ExcludeSet::parse("proc,dev,sys"));
//! let report = Scanner::new(&config).run()?;
//! for entry in &report.entries {
//!     println!("{} {}", entry.size, entry.path.display());
//! }
//! # Ok::<(), spacehogs::SpacehogsError>(())
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod size;
pub mod walker;

pub use config::{CliArgs, ExcludeSet, ScanConfig};
pub use error::{Result, SpacehogsError};
pub use walker::{Entry, EntryKind, ScanReport, Scanner};
