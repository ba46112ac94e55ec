use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::{NoContext, Timestamp, Uuid};

use crate::error::{DbError, DbResult};

/// Identifier of a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a fresh, time-ordered identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v7(Timestamp::now(NoContext)).to_string())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A value that can live in a [`Collection`].
pub trait Document: Clone + Send + Sync + 'static {
    fn id(&self) -> &DocumentId;
}

struct Slots<D> {
    docs: Vec<D>,
    positions: HashMap<DocumentId, usize>,
}

/// Named, insertion-ordered set of documents.
///
/// Cloning a collection yields another handle to the same documents.
pub struct Collection<D> {
    name: Arc<str>,
    slots: Arc<RwLock<Slots<D>>>,
}

impl<D> Clone for Collection<D> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            slots: Arc::clone(&self.slots),
        }
    }
}

impl<D: Document> Collection<D> {
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            slots: Arc::new(RwLock::new(Slots {
                docs: Vec::new(),
                positions: HashMap::new(),
            })),
        }
    }

    pub async fn find_by_id(&self, id: &DocumentId) -> Option<D> {
        let slots = self.slots.read().await;
        slots.positions.get(id).map(|&pos| slots.docs[pos].clone())
    }

    pub async fn insert(&self, doc: D) -> DbResult<D> {
        let mut slots = self.slots.write().await;
        if slots.positions.contains_key(doc.id()) {
            return Err(DbError::Duplicate {
                collection: self.name.to_string(),
                id: doc.id().to_string(),
            });
        }
        let pos = slots.docs.len();
        slots.positions.insert(doc.id().clone(), pos);
        slots.docs.push(doc.clone());
        tracing::debug!(collection = %self.name, id = %doc.id(), "document inserted");
        Ok(doc)
    }

    /// Overwrite an existing document with the same id.
    pub async fn replace(&self, doc: D) -> DbResult<D> {
        let mut slots = self.slots.write().await;
        let Some(&pos) = slots.positions.get(doc.id()) else {
            return Err(DbError::Missing {
                collection: self.name.to_string(),
                id: doc.id().to_string(),
            });
        };
        slots.docs[pos] = doc.clone();
        Ok(doc)
    }

    /// Read-modify-write a single document under the collection's write lock.
    ///
    /// `apply` edits a copy of the document; the copy is stored only when
    /// `apply` returns `Ok`. Returns `None` when no document has this id.
    pub async fn update<R, E, F>(&self, id: &DocumentId, apply: F) -> Option<Result<R, E>>
    where
        F: FnOnce(&mut D) -> Result<R, E>,
    {
        let mut slots = self.slots.write().await;
        let pos = *slots.positions.get(id)?;
        let mut draft = slots.docs[pos].clone();
        let outcome = apply(&mut draft);
        if outcome.is_ok() {
            slots.docs[pos] = draft;
        }
        Some(outcome)
    }

    /// Snapshot of every document in insertion order.
    pub async fn all(&self) -> Vec<D> {
        self.slots.read().await.docs.clone()
    }
}
