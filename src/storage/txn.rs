//! Transactions and cursors
//!
//! `WriteBatch` scopes one Put/Delete request; everything inside it commits
//! or aborts together. `Snapshot` scopes one List request and hands out
//! forward cursors over the key order. Dropping either without committing
//! aborts it, so error paths need no explicit cleanup.

use redb::{ReadTransaction, ReadableTable, TableError, WriteTransaction};

use super::engine::DOCUMENTS;
use super::errors::{EngineError, EngineResult};

/// One write transaction over the documents table.
pub struct WriteBatch {
    txn: WriteTransaction,
}

impl WriteBatch {
    pub(super) fn new(txn: WriteTransaction) -> Self {
        Self { txn }
    }

    /// Read `id` through this transaction's own view (uncommitted writes
    /// included). Used for occupancy checks during id generation.
    pub fn get(&self, id: &str) -> EngineResult<Option<Vec<u8>>> {
        let table = self.txn.open_table(DOCUMENTS).map_err(redb::Error::from)?;
        let guard = table.get(id).map_err(redb::Error::from)?;
        Ok(guard.map(|g| g.value().to_vec()))
    }

    /// Unconditional upsert: any existing record for `id` is replaced.
    pub fn put(&self, id: &str, value: &[u8]) -> EngineResult<()> {
        let mut table = self.txn.open_table(DOCUMENTS).map_err(redb::Error::from)?;
        table.insert(id, value).map_err(redb::Error::from)?;
        Ok(())
    }

    /// Insert that requires `id` to be vacant. An occupied key means an
    /// occupancy check went stale; the caller must fail the request, which
    /// aborts this transaction and undoes the overwrite.
    pub fn insert(&self, id: &str, value: &[u8]) -> EngineResult<()> {
        let mut table = self.txn.open_table(DOCUMENTS).map_err(redb::Error::from)?;
        let previous = table.insert(id, value).map_err(redb::Error::from)?;
        if previous.is_some() {
            return Err(EngineError::DuplicateId { id: id.to_string() });
        }
        Ok(())
    }

    /// Remove `id`, reporting whether a record existed.
    pub fn delete(&self, id: &str) -> EngineResult<bool> {
        let mut table = self.txn.open_table(DOCUMENTS).map_err(redb::Error::from)?;
        let previous = table.remove(id).map_err(redb::Error::from)?;
        Ok(previous.is_some())
    }

    /// Commit everything written through this batch.
    pub fn commit(self) -> EngineResult<()> {
        self.txn.commit().map_err(redb::Error::from)?;
        Ok(())
    }

    /// Abort the batch. Best-effort: abort runs on failure paths that
    /// already have an error to report.
    pub fn abort(self) {
        let _ = self.txn.abort();
    }
}

/// A consistent read-only view of the documents table.
pub struct Snapshot {
    txn: ReadTransaction,
}

impl Snapshot {
    pub(super) fn new(txn: ReadTransaction) -> Self {
        Self { txn }
    }

    /// Point read within this snapshot.
    pub fn get(&self, id: &str) -> EngineResult<Option<Vec<u8>>> {
        let table = match self.txn.open_table(DOCUMENTS) {
            Ok(table) => table,
            // Never written to: reads as empty, not as an error.
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(redb::Error::from(e).into()),
        };
        let guard = table.get(id).map_err(redb::Error::from)?;
        Ok(guard.map(|g| g.value().to_vec()))
    }

    /// Cursor positioned at the first key overall.
    pub fn cursor(&self) -> EngineResult<Cursor> {
        self.range_from(None)
    }

    /// Cursor positioned at the first key greater than or equal to `start`.
    pub fn cursor_from(&self, start: &str) -> EngineResult<Cursor> {
        self.range_from(Some(start))
    }

    /// Finish the snapshot. Dropping has the same effect; this exists so
    /// the normal completion path is explicit in the service.
    pub fn close(self) {
        let _ = self.txn.close();
    }

    fn range_from(&self, start: Option<&str>) -> EngineResult<Cursor> {
        let table = match self.txn.open_table(DOCUMENTS) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(Cursor { inner: None }),
            Err(e) => return Err(redb::Error::from(e).into()),
        };
        let range = match start {
            Some(key) => table.range(key..),
            None => table.range::<&str>(..),
        }
        .map_err(redb::Error::from)?;
        Ok(Cursor { inner: Some(range) })
    }
}

/// Forward cursor over `(id, value)` pairs in ascending key order.
pub struct Cursor {
    inner: Option<redb::Range<'static, &'static str, &'static [u8]>>,
}

impl Cursor {
    /// Advance to the next record, or `None` once exhausted.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> EngineResult<Option<(String, Vec<u8>)>> {
        let Some(range) = self.inner.as_mut() else {
            return Ok(None);
        };
        match range.next() {
            None => Ok(None),
            Some(Ok((key, value))) => Ok(Some((key.value().to_string(), value.value().to_vec()))),
            Some(Err(e)) => Err(redb::Error::from(e).into()),
        }
    }
}
