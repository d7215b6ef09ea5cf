//! Corpus loading.
//!
//! A corpus is one flat directory of sample files. Entries whose name starts
//! with `.` are skipped, as are subdirectories. Symlinks are followed, so a
//! corpus can be a directory of links into a shared dataset; links to
//! directories and dangling links are skipped. Every remaining file is read
//! fully into memory before any measurement starts.
//!
//! Entries come back in whatever order the filesystem lists them; callers
//! that compare listings should sort first.

use std::fs;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::CorpusError;

/// One sample file, loaded once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    name: String,
    data: Vec<u8>,
}

impl CorpusEntry {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        CorpusEntry { name: name.into(), data }
    }

    /// File name, without directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Read every visible regular file directly inside `dir`.
///
/// # Errors
/// - [`CorpusError::List`] if the directory cannot be listed.
/// - [`CorpusError::Read`] if any file cannot be read.
/// - [`CorpusError::Empty`] if nothing is left after filtering.
pub fn load_corpus(dir: &Path) -> Result<Vec<CorpusEntry>, CorpusError> {
    let mut entries = Vec::new();

    // min_depth(1) leaves the root itself out; max_depth(1) keeps the walk flat.
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            // Errors below the root come from resolving a dangling link.
            Err(e) if e.depth() > 0 => {
                debug!(path = ?e.path(), error = %e, "skipping unresolvable corpus entry");
                continue;
            }
            Err(e) => {
                return Err(CorpusError::List {
                    dir: dir.to_path_buf(),
                    source: e.into(),
                })
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        if is_hidden(&name) {
            debug!(file = %name, "skipping hidden corpus entry");
            continue;
        }
        if !entry.file_type().is_file() {
            debug!(file = %name, "skipping non-file corpus entry");
            continue;
        }

        let data = fs::read(entry.path()).map_err(|source| CorpusError::Read {
            path: entry.path().to_path_buf(),
            source,
        })?;
        debug!(file = %name, bytes = data.len(), "loaded corpus entry");
        entries.push(CorpusEntry::new(name, data));
    }

    if entries.is_empty() {
        return Err(CorpusError::Empty { dir: dir.to_path_buf() });
    }
    Ok(entries)
}
