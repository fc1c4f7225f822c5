//! Configuration types for spacehogs
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - The exclusion set of bare names
//! - Runtime configuration with validation

use crate::error::ConfigError;
use crate::size::parse_size;
use clap::Parser;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Names excluded when `--exclude` is not given
pub const DEFAULT_EXCLUDES: &str = "proc,dev,sys";

/// Find the files and directories eating your disk space
#[derive(Parser, Debug, Clone)]
#[command(
    name = "spacehogs",
    version,
    about = "Find files and directories at or above a minimum size",
    long_about = "Recursively measures every file and directory under DIRECTORY and lists \
                  those whose total size is at least MIN_SIZE.\n\n\
                  Directories are listed first, then files, largest first.",
    after_help = "SIZE FORMAT:\n    \
        number[unit], e.g. 100M, 1.5G, 512\n    \
        Units: B, K, M, G, T, P (binary multiples, case-insensitive, optional trailing B)\n\n\
        EXAMPLES:\n    \
        spacehogs /var 100M\n    \
        spacehogs --exclude=node_modules,.git ~/src 10M\n    \
        spacehogs --exclude= / 1G"
)]
pub struct CliArgs {
    /// Comma-separated list of file or directory names to skip
    #[arg(long, default_value = DEFAULT_EXCLUDES, value_name = "NAMES")]
    pub exclude: String,

    /// Verbose output (debug logging on stderr)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Directory to scan
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Minimum size to report
    #[arg(value_name = "MIN_SIZE")]
    pub min_size: String,
}

impl CliArgs {
    /// Cleaned root path, if its own bare name is in the exclusion list
    ///
    /// Checked before the size argument is parsed, so an excluded root is
    /// skipped whatever MIN_SIZE says.
    pub fn excluded_root(&self) -> Option<PathBuf> {
        let root = clean_path(&self.directory);
        let exclude = ExcludeSet::parse(&self.exclude);
        if root.file_name().is_some_and(|name| exclude.contains(name)) {
            Some(root)
        } else {
            None
        }
    }
}

/// Bare file or directory names pruned at any depth
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeSet {
    names: BTreeSet<String>,
}

impl ExcludeSet {
    /// Build from a comma-separated list
    ///
    /// Items are trimmed and empty items are dropped, so an empty string
    /// yields an empty set.
    pub fn parse(list: &str) -> Self {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Check if a bare name is excluded
    pub fn contains(&self, name: &OsStr) -> bool {
        // Names that are not valid UTF-8 can never match a configured name
        name.to_str().is_some_and(|n| self.names.contains(n))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

impl<S: Into<String>> FromIterator<S> for ExcludeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ExcludeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        write!(f, "{}", names.join(","))
    }
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root directory, lexically cleaned
    pub root: PathBuf,

    /// Minimum size in bytes (inclusive)
    pub threshold: u64,

    /// Names to skip
    pub exclude: ExcludeSet,

    /// Exclusion list as it was given, for display
    pub exclude_list: String,
}

impl ScanConfig {
    /// Create configuration from CLI arguments
    ///
    /// Only validates the arguments themselves. The root path is checked
    /// separately by [`ScanConfig::validate_root`], and an excluded root is
    /// caught earlier by [`CliArgs::excluded_root`].
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let threshold = parse_size(&args.min_size)?;

        Ok(Self {
            root: clean_path(&args.directory),
            threshold,
            exclude: ExcludeSet::parse(&args.exclude),
            exclude_list: args.exclude,
        })
    }

    /// Build a configuration directly, for library callers
    pub fn new(root: impl AsRef<Path>, threshold: u64, exclude: ExcludeSet) -> Self {
        Self {
            root: clean_path(root.as_ref()),
            threshold,
            exclude_list: exclude.to_string(),
            exclude,
        }
    }

    /// Check that the root exists and is a directory
    pub fn validate_root(&self) -> Result<(), ConfigError> {
        let metadata =
            std::fs::metadata(&self.root).map_err(|reason| ConfigError::PathInaccessible {
                path: self.root.clone(),
                reason,
            })?;

        if !metadata.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.root.clone(),
            });
        }

        Ok(())
    }
}

/// Lexically normalize a path
///
/// Drops trailing and repeated separators and `.` components, and resolves
/// `..` against the preceding name. A `..` directly under the root is
/// dropped; leading `..` in a relative path is kept. Symlinks are not
/// consulted.
fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last().copied() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }

    let cleaned: PathBuf = parts.into_iter().collect();
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}
