//! The document store operations

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use serde_json::{Map, Value};

use crate::codec;
use crate::storage::{Engine, Snapshot, WriteBatch};

use super::errors::{StoreError, StoreResult};

/// The storage-key field every persisted document carries.
pub const ID_FIELD: &str = "id";

/// Server write time in integer milliseconds, stamped on every write and
/// overwriting any value the caller supplied.
pub const TIMESTAMP_FIELD: &str = "_timestamp";

/// Cap on random id candidates per generated insert. Exhaustion means the
/// id space is effectively full and the request fails instead of spinning.
const MAX_ID_ATTEMPTS: u32 = 100;

/// Range and pagination parameters for List.
///
/// `start_key` and `end_key` are both inclusive bounds on the id range;
/// `start` is a zero-based offset into the matched set and `limit` caps how
/// many documents are emitted after the offset.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub start_key: Option<String>,
    pub end_key: Option<String>,
    pub limit: Option<usize>,
    pub start: usize,
}

/// CRUD/query service over the engine and the codec.
pub struct DocumentStore {
    engine: Arc<Engine>,
}

impl DocumentStore {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }

    /// Range-paginated listing in ascending lexicographic id order.
    ///
    /// Every key reached counts toward the offset, whether or not it is
    /// emitted. A record that fails to decode fails the whole scan.
    pub fn list(&self, query: &ListQuery) -> StoreResult<Vec<Value>> {
        let snapshot = self.engine.begin_read()?;
        let documents = Self::scan(&snapshot, query)?;
        snapshot.close();
        Ok(documents)
    }

    fn scan(snapshot: &Snapshot, query: &ListQuery) -> StoreResult<Vec<Value>> {
        let mut cursor = match &query.start_key {
            Some(key) => snapshot.cursor_from(key)?,
            None => snapshot.cursor()?,
        };
        let mut found = 0usize;
        let mut documents = Vec::new();
        loop {
            if query.limit.is_some_and(|limit| documents.len() >= limit) {
                break;
            }
            let Some((id, bytes)) = cursor.next()? else {
                break;
            };
            if let Some(end) = &query.end_key {
                // endkey is inclusive: equal keys are emitted.
                if id.as_str() > end.as_str() {
                    break;
                }
            }
            found += 1;
            if found <= query.start {
                continue;
            }
            let document =
                codec::decode(&bytes).map_err(|source| StoreError::Corrupt { id, source })?;
            documents.push(document);
        }
        Ok(documents)
    }

    /// Point lookup by id. An absent key is not an error.
    pub fn get(&self, id: &str) -> StoreResult<Option<Value>> {
        match self.engine.get(id)? {
            None => Ok(None),
            Some(bytes) => codec::decode(&bytes).map(Some).map_err(|source| {
                StoreError::Corrupt {
                    id: id.to_string(),
                    source,
                }
            }),
        }
    }

    /// Upsert one document or a batch of documents.
    ///
    /// Documents with an id are overwritten unconditionally; documents
    /// without one get a generated id, checked for vacancy inside the same
    /// transaction. Returns the ids written, ascending and deduplicated.
    /// Any failure aborts the whole batch.
    pub fn put(&self, body: Value) -> StoreResult<Vec<String>> {
        let documents = Self::put_batch(body)?;
        let batch = self.engine.begin_write()?;
        match Self::apply_put(&batch, documents) {
            Ok(ids) => {
                batch.commit()?;
                Ok(ids)
            }
            Err(e) => {
                batch.abort();
                Err(e)
            }
        }
    }

    /// Delete by id string, by object carrying an `id`, or by an array
    /// mixing both. Absent ids are omitted from the result, not errors.
    /// Returns the ids actually removed, ascending and deduplicated.
    pub fn delete(&self, body: Value) -> StoreResult<Vec<String>> {
        let entries = Self::delete_batch(body)?;
        let batch = self.engine.begin_write()?;
        match Self::apply_delete(&batch, entries) {
            Ok(ids) => {
                batch.commit()?;
                Ok(ids)
            }
            Err(e) => {
                batch.abort();
                Err(e)
            }
        }
    }

    fn put_batch(body: Value) -> StoreResult<Vec<Value>> {
        match body {
            Value::Null => Err(StoreError::validation("nil object")),
            Value::Array(elements) => Ok(elements),
            Value::Object(_) => Ok(vec![body]),
            _ => Err(StoreError::validation("not an array or an object")),
        }
    }

    fn delete_batch(body: Value) -> StoreResult<Vec<Value>> {
        match body {
            Value::Null => Err(StoreError::validation("nil object")),
            Value::Array(elements) => Ok(elements),
            Value::String(_) | Value::Object(_) => Ok(vec![body]),
            _ => Err(StoreError::validation("not an array or an object")),
        }
    }

    fn apply_put(batch: &WriteBatch, documents: Vec<Value>) -> StoreResult<Vec<String>> {
        let now = Utc::now().timestamp_millis();
        let mut ids = BTreeSet::new();
        for document in documents {
            let Value::Object(mut members) = document else {
                return Err(StoreError::validation("not a json object"));
            };
            members.insert(TIMESTAMP_FIELD.to_string(), Value::from(now));
            match Self::supplied_id(&members)? {
                Some(id) => {
                    let encoded = codec::encode(&Value::Object(members));
                    batch.put(&id, &encoded)?;
                    ids.insert(id);
                }
                None => {
                    ids.insert(Self::insert_with_generated_id(batch, members)?);
                }
            }
        }
        Ok(ids.into_iter().collect())
    }

    /// The document's own id, validated: present and a non-empty string,
    /// or absent entirely (which asks for a generated id).
    fn supplied_id(members: &Map<String, Value>) -> StoreResult<Option<String>> {
        match members.get(ID_FIELD) {
            None => Ok(None),
            Some(Value::Null) => Err(StoreError::validation("nil id")),
            Some(Value::String(id)) if id.is_empty() => Err(StoreError::validation("empty id")),
            Some(Value::String(id)) => Ok(Some(id.clone())),
            Some(other) => Err(StoreError::validation(format!(
                "id is not a string: {other}"
            ))),
        }
    }

    fn insert_with_generated_id(
        batch: &WriteBatch,
        mut members: Map<String, Value>,
    ) -> StoreResult<String> {
        let mut rng = rand::thread_rng();
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = format!("id{}", rng.gen::<u32>());
            if batch.get(&candidate)?.is_some() {
                continue;
            }
            members.insert(ID_FIELD.to_string(), Value::String(candidate.clone()));
            // The vacancy check above reads this transaction's own view, so
            // the insert can only fail on a stale check; that failure aborts
            // the batch rather than overwriting silently.
            let encoded = codec::encode(&Value::Object(members));
            batch.insert(&candidate, &encoded)?;
            return Ok(candidate);
        }
        Err(StoreError::IdSpaceExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    fn apply_delete(batch: &WriteBatch, entries: Vec<Value>) -> StoreResult<Vec<String>> {
        let mut ids = BTreeSet::new();
        for entry in entries {
            let id = Self::entry_id(entry)?;
            if batch.delete(&id)? {
                ids.insert(id);
            }
        }
        Ok(ids.into_iter().collect())
    }

    /// Resolve one Delete entry to an id string.
    fn entry_id(entry: Value) -> StoreResult<String> {
        match entry {
            Value::Null => Err(StoreError::validation("nil object")),
            Value::String(id) if id.is_empty() => Err(StoreError::validation("empty id")),
            Value::String(id) => Ok(id),
            Value::Object(members) => match members.get(ID_FIELD) {
                None => Err(StoreError::validation("id missing")),
                Some(Value::Null) => Err(StoreError::validation("nil id")),
                Some(Value::String(id)) if id.is_empty() => {
                    Err(StoreError::validation("empty id"))
                }
                Some(Value::String(id)) => Ok(id.clone()),
                Some(other) => Err(StoreError::validation(format!(
                    "id is not a string: {other}"
                ))),
            },
            other => Err(StoreError::validation(format!(
                "not an object or a string: {other}"
            ))),
        }
    }
}
