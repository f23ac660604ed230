//! Engine lifecycle: open, transactions, close
//!
//! One `Engine` instance exists per process. It is opened once at start-up
//! (fatal on failure) and closed once at shutdown; `close` is idempotent and
//! never fails, because it typically runs while the process is going down.

use std::fs;
use std::path::{Path, PathBuf};

use redb::{Database, ReadableDatabase, TableDefinition};

use crate::observability::Logger;

use super::errors::{EngineError, EngineResult};
use super::txn::{Snapshot, WriteBatch};

/// The single documents table: id string -> encoded document bytes.
///
/// redb orders `&str` keys by UTF-8 byte comparison, which is exactly the
/// case-sensitive lexicographic order the listing contract promises. The
/// ordering is fixed by this key type, not by a runtime comparator.
pub(super) const DOCUMENTS: TableDefinition<&str, &[u8]> = TableDefinition::new("documents");

const DB_FILE: &str = "sofadb.redb";

/// Owner of the ordered key-value engine instance.
pub struct Engine {
    db: Option<Database>,
    path: PathBuf,
}

impl Engine {
    /// Open the engine inside `dir`, creating the directory if absent.
    ///
    /// Fails if the directory cannot be created or the engine cannot acquire
    /// exclusive access to its file; callers treat that as fatal.
    pub fn open(dir: &Path) -> EngineResult<Self> {
        fs::create_dir_all(dir)
            .map_err(|e| EngineError::Open(format!("{}: {}", dir.display(), e)))?;
        let path = dir.join(DB_FILE);
        let db = Database::create(&path)
            .map_err(|e| EngineError::Open(format!("{}: {}", path.display(), e)))?;
        Logger::info("ENGINE_OPEN", &[("path", &path.display().to_string())]);
        Ok(Self { db: Some(db), path })
    }

    /// Filesystem path of the engine file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stand-alone point read of the latest committed value for `id`.
    pub fn get(&self, id: &str) -> EngineResult<Option<Vec<u8>>> {
        self.begin_read()?.get(id)
    }

    /// Begin a write transaction. Writers are serialized by the engine.
    pub fn begin_write(&self) -> EngineResult<WriteBatch> {
        let txn = self.db()?.begin_write().map_err(redb::Error::from)?;
        Ok(WriteBatch::new(txn))
    }

    /// Begin a read transaction over a consistent snapshot of the store.
    pub fn begin_read(&self) -> EngineResult<Snapshot> {
        let txn = self.db()?.begin_read().map_err(redb::Error::from)?;
        Ok(Snapshot::new(txn))
    }

    /// Close the engine, compacting its log first on a best-effort basis.
    ///
    /// Idempotent and tolerant of a never-opened instance. Compaction
    /// failures are logged, never returned: close runs during shutdown and
    /// has nobody left to report to.
    pub fn close(&mut self) {
        let Some(mut db) = self.db.take() else {
            return;
        };
        if let Err(e) = db.compact() {
            Logger::warn(
                "ENGINE_COMPACT_FAILED",
                &[("path", &self.path.display().to_string()), ("error", &e.to_string())],
            );
        }
        Logger::info("ENGINE_CLOSE", &[("path", &self.path.display().to_string())]);
    }

    fn db(&self) -> EngineResult<&Database> {
        self.db.as_ref().ok_or(EngineError::Closed)
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.close();
    }
}
