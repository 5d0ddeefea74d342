//! Path interning for output records.
//!
//! Many output records reference the same small set of output-root
//! directories. Interning stores each distinct path once in a shared byte
//! trie and hands out compact [`PathId`] handles, so records carry a `u32`
//! instead of a copy of the string.
//!
//! The interner is session-scoped: the workflow creates one per compilation
//! pass and drops it with the pass. It is not a cache with external
//! validity.

mod error;
mod trie;

pub use error::{InternError, InternResult};

use crate::types::PathId;
use parking_lot::RwLock;
use trie::ByteTrie;

/// Thread-safe deduplicating store for path strings.
///
/// Insertions are serialized behind a write lock; resolves take the read
/// lock and run concurrently with each other. Already-interned strings are
/// recognized on the read path without blocking writers.
#[derive(Debug)]
pub struct PathInterner {
    trie: RwLock<ByteTrie>,
}

impl PathInterner {
    /// Create an empty interner.
    pub fn new() -> Self {
        Self {
            trie: RwLock::new(ByteTrie::new()),
        }
    }

    /// Intern a path, returning a handle that resolves back to exactly
    /// `path`.
    ///
    /// Repeated calls with an equal string return an equal handle. The
    /// empty string is a valid input. The only failure is
    /// [`InternError::ResourceExhausted`] when the id space runs out,
    /// which is fatal for the session and must propagate.
    pub fn intern(&self, path: &str) -> InternResult<PathId> {
        if let Some(id) = self.trie.read().lookup(path) {
            return Ok(id);
        }
        // insert() re-walks under the write lock, so losing the race to
        // another writer still yields the handle that writer assigned.
        self.trie.write().insert(path)
    }

    /// Reconstruct the string a handle was issued for.
    ///
    /// Fails with [`InternError::InvalidHandle`] for a handle this
    /// instance never issued.
    pub fn resolve(&self, id: PathId) -> InternResult<String> {
        self.trie.read().resolve(id)
    }

    /// Number of distinct interned paths.
    pub fn len(&self) -> usize {
        self.trie.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PathInterner {
    fn default() -> Self {
        Self::new()
    }
}
