//! Local caches of the bug corpus and commit history
//!
//! The pipeline reads both corpora lazily through the [`BugSource`] and
//! [`CommitSource`] seams. The shipped implementations stream
//! newline-delimited JSON dumps from disk; `refresh` is the
//! download/refresh contract and a failure there aborts the whole run
//! before any output is written.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Bug, Commit};

/// Errors raised by corpus access
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("database unavailable: {}: {source}", path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt record in {} at line {line}: {source}", path.display())]
    CorruptRecord {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for corpus operations
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Lazy sequence of bug records
pub trait BugSource {
    /// Ensure the local cache is current; fatal on failure
    fn refresh(&mut self) -> Result<()>;

    /// Stream the bug corpus in storage order
    fn bugs(&self) -> Result<Box<dyn Iterator<Item = Result<Bug>> + '_>>;
}

/// Lazy sequence of commit records
pub trait CommitSource {
    /// Ensure the local cache is current; fatal on failure
    fn refresh(&mut self) -> Result<()>;

    /// Stream the commit history in storage order
    fn commits(&self) -> Result<Box<dyn Iterator<Item = Result<Commit>> + '_>>;
}

/// Streaming reader over one NDJSON dump file
struct NdjsonIter<T> {
    path: PathBuf,
    lines: std::io::Lines<BufReader<File>>,
    line_no: usize,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> NdjsonIter<T> {
    fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| CorpusError::DataUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
            line_no: 0,
            _marker: PhantomData,
        })
    }
}

impl<T: DeserializeOwned> Iterator for NdjsonIter<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(source) => {
                    return Some(Err(CorpusError::DataUnavailable {
                        path: self.path.clone(),
                        source,
                    }))
                }
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            return Some(serde_json::from_str(&line).map_err(|source| {
                CorpusError::CorruptRecord {
                    path: self.path.clone(),
                    line: self.line_no,
                    source,
                }
            }));
        }
    }
}

/// Bug corpus backed by an NDJSON dump on disk
#[derive(Debug)]
pub struct FileBugSource {
    path: PathBuf,
}

impl FileBugSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl BugSource for FileBugSource {
    fn refresh(&mut self) -> Result<()> {
        probe(&self.path)
    }

    fn bugs(&self) -> Result<Box<dyn Iterator<Item = Result<Bug>> + '_>> {
        Ok(Box::new(NdjsonIter::open(&self.path)?))
    }
}

/// Commit history backed by an NDJSON dump on disk
#[derive(Debug)]
pub struct FileCommitSource {
    path: PathBuf,
}

impl FileCommitSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CommitSource for FileCommitSource {
    fn refresh(&mut self) -> Result<()> {
        probe(&self.path)
    }

    fn commits(&self) -> Result<Box<dyn Iterator<Item = Result<Commit>> + '_>> {
        Ok(Box::new(NdjsonIter::open(&self.path)?))
    }
}

/// Check that a cache file exists and is readable
fn probe(path: &Path) -> Result<()> {
    File::open(path)
        .map(|_| ())
        .map_err(|source| CorpusError::DataUnavailable {
            path: path.to_path_buf(),
            source,
        })
}
