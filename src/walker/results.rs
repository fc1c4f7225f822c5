//! Qualifying entries and the collection they are gathered into

use parking_lot::Mutex;
use std::cmp::Ordering;
use std::path::PathBuf;

/// Kind of a recorded entry
///
/// Variant order matters: directories sort before files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    pub fn is_dir(&self) -> bool {
        *self == EntryKind::Directory
    }

    /// Fixed-width tag used in the report
    pub fn tag(&self) -> &'static str {
        match self {
            EntryKind::Directory => "[DIR] ",
            EntryKind::File => "[FILE]",
        }
    }
}

/// A file or directory at or above the threshold
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    pub path: PathBuf,
    pub size: u64,
    pub kind: EntryKind,
}

impl Entry {
    pub fn file(path: PathBuf, size: u64) -> Self {
        Self {
            path,
            size,
            kind: EntryKind::File,
        }
    }

    pub fn directory(path: PathBuf, size: u64) -> Self {
        Self {
            path,
            size,
            kind: EntryKind::Directory,
        }
    }
}

impl Ord for Entry {
    /// Directories first, then larger sizes first, then paths byte-wise
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| other.size.cmp(&self.size))
            .then_with(|| self.path.as_os_str().cmp(other.path.as_os_str()))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Append-only collection shared by all traversal threads of one run
#[derive(Debug, Default)]
pub struct ResultCollection {
    entries: Mutex<Vec<Entry>>,
}

impl ResultCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: Entry) {
        self.entries.lock().push(entry);
    }

    /// Consume the collection into report order
    pub fn into_sorted(self) -> Vec<Entry> {
        let mut entries = self.entries.into_inner();
        entries.sort();
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_sort_order() {
        let results = ResultCollection::new();
        results.push(Entry::file("/a/small".into(), 10));
        results.push(Entry::directory("/a".into(), 100));
        results.push(Entry::file("/a/big".into(), 90));
        results.push(Entry::directory("/a/sub-b".into(), 50));
        results.push(Entry::directory("/a/sub-a".into(), 50));
        results.push(Entry::file("/a/also-small".into(), 10));

        let sorted = results.into_sorted();
        let order: Vec<_> = sorted
            .iter()
            .map(|e| e.path.to_str().unwrap())
            .collect();
        assert_eq!(
            order,
            vec!["/a", "/a/sub-a", "/a/sub-b", "/a/big", "/a/also-small", "/a/small"]
        );
    }

    #[test]
    fn test_small_dir_before_large_file() {
        let results = ResultCollection::new();
        results.push(Entry::file("/big.iso".into(), 1 << 30));
        results.push(Entry::directory("/empty".into(), 0));

        let sorted = results.into_sorted();
        assert!(sorted[0].kind.is_dir());
        assert_eq!(sorted[1].path, PathBuf::from("/big.iso"));
    }

    #[test]
    fn test_path_tie_break_is_bytewise() {
        // '-' (0x2d) sorts before '/' (0x2f)
        let a = Entry::file("x/y".into(), 1);
        let b = Entry::file("x-y".into(), 1);
        assert!(b < a);
    }

    #[test]
    fn test_concurrent_push() {
        let results = Arc::new(ResultCollection::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let results = Arc::clone(&results);
                thread::spawn(move || {
                    for i in 0..250 {
                        results.push(Entry::file(format!("/t{}/f{}", t, i).into(), i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let results = Arc::try_unwrap(results).unwrap();
        assert_eq!(results.into_sorted().len(), 2000);
    }

    #[test]
    fn test_tags() {
        assert_eq!(EntryKind::Directory.tag(), "[DIR] ");
        assert_eq!(EntryKind::File.tag(), "[FILE]");
    }
}
