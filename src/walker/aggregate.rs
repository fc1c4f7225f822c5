//! Parallel post-order size aggregation
//!
//! Every subdirectory is measured on its own scoped thread. A directory's
//! scope only closes once all of its child threads have returned, so its total
//! is known before it is compared against the threshold:
//!
//! ```text
//! aggregate(/root)
//! │
//! ├── file1.txt          measured inline, recorded if >= threshold
//! ├── spawn → aggregate(/root/a) ─┐
//! ├── spawn → aggregate(/root/b) ─┤   each records itself if >= threshold
//! │                               │
//! └── join ◄──────────────────────┘   total = files + Σ subdirs
//! ```
//!
//! Recorded entries go into the run's [`ResultCollection`]. Per-node I/O
//! failures are logged and the node counts as zero bytes.

use crate::config::ScanConfig;
use crate::error::{Result, ScanError};
use crate::walker::results::{Entry, ResultCollection};
use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, Scope, ScopedJoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// Stack size for traversal threads; each one only holds a single level
const SCAN_THREAD_STACK_SIZE: usize = 256 * 1024;

/// Name given to traversal threads
const SCAN_THREAD_NAME: &str = "spacehogs-scan";

/// Counters for a finished scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub dirs: u64,
    pub files: u64,
    pub bytes: u64,
    pub errors: u64,
    pub duration: Duration,
}

/// Outcome of a scan
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Total size of the root directory
    pub total_size: u64,

    /// Qualifying entries, sorted for display
    pub entries: Vec<Entry>,

    pub stats: ScanStats,
}

/// State for one scan run
///
/// Owns the result collection, so every run starts empty and nothing is
/// shared between runs.
pub struct Scanner {
    config: ScanConfig,
    results: ResultCollection,
    dirs_count: AtomicU64,
    files_count: AtomicU64,
    errors_count: AtomicU64,
}

/// A classified directory entry
enum Child {
    Dir(PathBuf),
    File { path: PathBuf, size: u64 },
}

/// A child directory that is either running on its own thread or was
/// measured inline because no thread could be spawned
enum Subtree<'scope> {
    Spawned(ScopedJoinHandle<'scope, u64>),
    Inline(u64),
}

impl Subtree<'_> {
    fn join(self) -> u64 {
        match self {
            Subtree::Spawned(handle) => match handle.join() {
                Ok(size) => size,
                Err(panic) => std::panic::resume_unwind(panic),
            },
            Subtree::Inline(size) => size,
        }
    }
}

impl Scanner {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            config: config.clone(),
            results: ResultCollection::new(),
            dirs_count: AtomicU64::new(0),
            files_count: AtomicU64::new(0),
            errors_count: AtomicU64::new(0),
        }
    }

    /// Validate the root, then scan it
    pub fn run(self) -> Result<ScanReport> {
        self.config.validate_root()?;
        Ok(self.scan())
    }

    /// Scan the root without validating it first
    ///
    /// An unreadable root is reported like any other directory and yields an
    /// empty result with a total of zero.
    pub fn scan(self) -> ScanReport {
        let start = Instant::now();
        info!(
            root = %self.config.root.display(),
            threshold = self.config.threshold,
            "Starting scan"
        );

        let root = &self.config.root;
        let total_size = self.aggregate(root);
        if total_size >= self.config.threshold {
            self.results.push(Entry::directory(root.clone(), total_size));
        }

        let stats = ScanStats {
            dirs: self.dirs_count.load(Ordering::Relaxed),
            files: self.files_count.load(Ordering::Relaxed),
            bytes: total_size,
            errors: self.errors_count.load(Ordering::Relaxed),
            duration: start.elapsed(),
        };

        info!(
            dirs = stats.dirs,
            files = stats.files,
            bytes = stats.bytes,
            errors = stats.errors,
            elapsed_ms = stats.duration.as_millis() as u64,
            "Scan complete"
        );

        ScanReport {
            total_size,
            entries: self.results.into_sorted(),
            stats,
        }
    }

    /// Compute the total size of `path`, recording qualifying descendants
    ///
    /// `path` itself is not recorded; that is up to the caller once the
    /// returned total is known.
    pub fn aggregate(&self, path: &Path) -> u64 {
        let children = match self.list_dir(path) {
            Some(children) => children,
            None => return 0,
        };
        self.dirs_count.fetch_add(1, Ordering::Relaxed);

        let mut total: u64 = 0;

        thread::scope(|scope| {
            let mut subtrees = Vec::new();

            for child in children {
                match child {
                    Child::Dir(child_path) => {
                        subtrees.push(self.spawn_subtree(scope, child_path));
                    }
                    Child::File { path, size } => {
                        if size >= self.config.threshold {
                            self.results.push(Entry::file(path, size));
                        }
                        total += size;
                    }
                }
            }

            for subtree in subtrees {
                total += subtree.join();
            }
        });

        debug!(path = %path.display(), size = total, "Directory measured");
        total
    }

    /// List and classify the non-excluded children of a directory
    ///
    /// Files are measured here. The listing is fully consumed before
    /// returning so the directory handle is closed before any child thread
    /// starts.
    fn list_dir(&self, path: &Path) -> Option<Vec<Child>> {
        let reader = match fs::read_dir(path) {
            Ok(reader) => reader,
            Err(source) => {
                self.report(ScanError::ReadDirFailed {
                    path: path.to_path_buf(),
                    source,
                });
                return None;
            }
        };

        let mut children = Vec::new();
        for entry in reader {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    self.report(ScanError::ReadEntryFailed {
                        path: path.to_path_buf(),
                        source,
                    });
                    continue;
                }
            };

            if self.config.exclude.contains(&entry.file_name()) {
                trace!(path = %entry.path().display(), "Excluded");
                continue;
            }

            if let Some(child) = self.classify(&entry) {
                children.push(child);
            }
        }
        Some(children)
    }

    /// file_type() and metadata() do not follow symlinks, so a link to a
    /// directory is measured as a leaf
    fn classify(&self, entry: &DirEntry) -> Option<Child> {
        let path = entry.path();
        let is_dir = entry.file_type().map(|ft| ft.is_dir());

        match is_dir {
            Ok(true) => Some(Child::Dir(path)),
            Ok(false) => match entry.metadata() {
                Ok(metadata) => {
                    self.files_count.fetch_add(1, Ordering::Relaxed);
                    Some(Child::File {
                        path,
                        size: metadata.len(),
                    })
                }
                Err(source) => {
                    self.report(ScanError::StatFailed { path, source });
                    None
                }
            },
            Err(source) => {
                self.report(ScanError::StatFailed { path, source });
                None
            }
        }
    }

    fn spawn_subtree<'scope, 'env>(
        &'env self,
        scope: &'scope Scope<'scope, 'env>,
        path: PathBuf,
    ) -> Subtree<'scope> {
        // The closure is dropped if the spawn fails, so keep a copy for the fallback
        let thread_path = path.clone();

        let spawned = thread::Builder::new()
            .name(SCAN_THREAD_NAME.to_string())
            .stack_size(SCAN_THREAD_STACK_SIZE)
            .spawn_scoped(scope, move || self.measure_dir(&thread_path));

        match spawned {
            Ok(handle) => Subtree::Spawned(handle),
            Err(e) => {
                debug!(
                    path = %path.display(),
                    error = %e,
                    "Could not spawn scan thread, measuring inline"
                );
                Subtree::Inline(self.measure_dir(&path))
            }
        }
    }

    /// Aggregate a subdirectory and record it if it qualifies
    fn measure_dir(&self, path: &Path) -> u64 {
        let size = self.aggregate(path);
        if size >= self.config.threshold {
            self.results.push(Entry::directory(path.to_path_buf(), size));
        }
        size
    }

    fn report(&self, err: ScanError) {
        self.errors_count.fetch_add(1, Ordering::Relaxed);
        if err.is_permission_denied() {
            warn!("Permission denied: {}, skipping", err.path().display());
        } else {
            warn!("{}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExcludeSet;
    use std::fs;
    use tempfile::tempdir;

    fn write(path: &Path, contents: &[u8]) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn scanner(root: &Path, threshold: u64, exclude: &str) -> Scanner {
        Scanner::new(&ScanConfig::new(root, threshold, ExcludeSet::parse(exclude)))
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempdir().unwrap();
        let report = scanner(dir.path(), 0, "").scan();

        assert_eq!(report.total_size, 0);
        assert_eq!(report.entries.len(), 1);
        assert!(report.entries[0].kind.is_dir());
        assert_eq!(report.stats.dirs, 1);
        assert_eq!(report.stats.files, 0);
    }

    #[test]
    fn test_aggregate_does_not_record_its_own_path() {
        let dir = tempdir().unwrap();
        write(&dir.path().join("a.bin"), &[0u8; 10]);

        let scanner = scanner(dir.path(), 0, "");
        assert_eq!(scanner.aggregate(dir.path()), 10);
        let recorded = scanner.results.into_sorted();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].path, dir.path().join("a.bin"));
    }

    #[test]
    fn test_nested_totals() {
        let dir = tempdir().unwrap();
        write(&dir.path().join("a/b/c/deep.bin"), &[0u8; 100]);
        write(&dir.path().join("a/b/mid.bin"), &[0u8; 20]);
        write(&dir.path().join("a/top.bin"), &[0u8; 3]);

        let report = scanner(dir.path(), 0, "").scan();
        let size_of = |rel: &str| {
            let path = dir.path().join(rel);
            report
                .entries
                .iter()
                .find(|e| e.path == path)
                .map(|e| e.size)
        };

        assert_eq!(size_of("a/b/c"), Some(100));
        assert_eq!(size_of("a/b"), Some(120));
        assert_eq!(size_of("a"), Some(123));
        assert_eq!(report.total_size, 123);
        assert_eq!(report.stats.dirs, 4);
        assert_eq!(report.stats.files, 3);
    }

    #[test]
    fn test_excluded_file_name() {
        let dir = tempdir().unwrap();
        write(&dir.path().join("keep.txt"), b"12345");
        write(&dir.path().join("sub/skip.log"), b"1234567890");

        let report = scanner(dir.path(), 0, "skip.log").scan();
        assert_eq!(report.total_size, 5);
        assert!(report
            .entries
            .iter()
            .all(|e| !e.path.ends_with("skip.log")));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let dir = tempdir().unwrap();
        write(&dir.path().join("exact.bin"), &[0u8; 64]);
        write(&dir.path().join("under.bin"), &[0u8; 63]);

        let report = scanner(dir.path(), 64, "").scan();
        let files: Vec<_> = report
            .entries
            .iter()
            .filter(|e| !e.kind.is_dir())
            .collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("exact.bin"));
    }

    #[test]
    fn test_unreadable_root_scan_is_empty() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");

        let report = scanner(&missing, 1, "").scan();
        assert_eq!(report.total_size, 0);
        assert!(report.entries.is_empty());
        assert_eq!(report.stats.errors, 1);
    }

    #[test]
    fn test_run_rejects_missing_root() {
        let dir = tempdir().unwrap();
        let result = scanner(&dir.path().join("missing"), 1, "").run();
        assert!(result.is_err());
    }
}
