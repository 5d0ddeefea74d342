//! Filesystem refresh capability.
//!
//! After a batch completes, the host is told about every produced artifact
//! so its view of the output tree stays current. Outside an IDE that is a
//! plain durability sync, or nothing at all.

use std::fs::File;
use std::path::PathBuf;
use tracing::warn;

/// Notified once per batch with every produced artifact path.
pub trait FileRefresh: Send + Sync {
    fn refresh(&self, artifacts: &[PathBuf]);
}

/// Refresh for non-IDE contexts: does nothing.
#[derive(Debug, Default)]
pub struct NoopRefresh;

impl FileRefresh for NoopRefresh {
    fn refresh(&self, _artifacts: &[PathBuf]) {}
}

/// Opens each artifact and syncs it to disk. Failures are logged, never
/// fatal: the artifact was already written.
#[derive(Debug, Default)]
pub struct SyncRefresh;

impl FileRefresh for SyncRefresh {
    fn refresh(&self, artifacts: &[PathBuf]) {
        for path in artifacts {
            if let Err(e) = File::open(path).and_then(|file| file.sync_all()) {
                warn!("failed to sync artifact {}: {e}", path.display());
            }
        }
        crate::debug_event!("refresh", "synced", "{} artifacts", artifacts.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sync_refresh_tolerates_missing_artifacts() {
        let temp = TempDir::new().unwrap();
        let present = temp.path().join("Foo.java");
        std::fs::write(&present, "hello").unwrap();

        // One real file, one gone: neither may panic or error out.
        SyncRefresh.refresh(&[present, temp.path().join("Gone.java")]);
    }
}
