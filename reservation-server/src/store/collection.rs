//! A single document collection.
//!
//! Documents live in memory behind a `RwLock`, keyed by identifier. A
//! collection opened on a directory also mirrors its contents to
//! `<dir>/<name>.json` after every mutation, so the data survives restarts.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::domain::{RecordId, Reservation, TrainSchedule};

use super::error::StoreError;

/// A type that can be stored in a [`Collection`].
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync {
    /// The key the document is stored under.
    fn id(&self) -> &RecordId;
}

impl Document for Reservation {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Document for TrainSchedule {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

type Documents<T> = BTreeMap<RecordId, T>;

/// A keyed set of documents with optional file persistence.
pub struct Collection<T> {
    name: &'static str,
    docs: RwLock<Documents<T>>,
    path: Option<PathBuf>,
}

impl<T: Document> Collection<T> {
    /// Create an empty collection that is never written to disk.
    pub fn in_memory(name: &'static str) -> Self {
        Self {
            name,
            docs: RwLock::new(BTreeMap::new()),
            path: None,
        }
    }

    /// Open a collection backed by `<dir>/<name>.json`.
    ///
    /// A missing file is treated as an empty collection. The directory is
    /// created if it doesn't exist.
    pub async fn open(name: &'static str, dir: &Path) -> Result<Self, StoreError> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;

        let path = dir.join(format!("{name}.json"));
        let docs = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let list: Vec<T> = serde_json::from_slice(&bytes).map_err(|source| {
                    StoreError::Serialize {
                        collection: name,
                        source,
                    }
                })?;
                list.into_iter().map(|d| (d.id().clone(), d)).collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        tracing::debug!(
            collection = name,
            path = %path.display(),
            count = docs.len(),
            "opened collection"
        );

        Ok(Self {
            name,
            docs: RwLock::new(docs),
            path: Some(path),
        })
    }

    /// Look up a document by identifier.
    pub async fn get(&self, id: &RecordId) -> Option<T> {
        self.docs.read().await.get(id).cloned()
    }

    /// All documents, in identifier order.
    pub async fn all(&self) -> Vec<T> {
        self.docs.read().await.values().cloned().collect()
    }

    /// Documents matching a predicate, in identifier order.
    pub async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.docs
            .read()
            .await
            .values()
            .filter(|d| predicate(d))
            .cloned()
            .collect()
    }

    /// Insert a new document. Fails if the identifier is taken.
    pub async fn insert(&self, doc: T) -> Result<(), StoreError> {
        let name = self.name;
        self.write(move |docs| {
            if docs.contains_key(doc.id()) {
                return Err(StoreError::Duplicate {
                    collection: name,
                    id: doc.id().clone(),
                });
            }
            docs.insert(doc.id().clone(), doc);
            Ok(())
        })
        .await
    }

    /// Replace an existing document. Returns `false` if none matched.
    pub async fn replace(&self, doc: T) -> Result<bool, StoreError> {
        self.write(move |docs| match docs.get_mut(doc.id()) {
            Some(existing) => {
                *existing = doc;
                Ok(true)
            }
            None => Ok(false),
        })
        .await
    }

    /// Modify a document in place under the write lock.
    ///
    /// Returns the document as written, or `None` if none matched.
    pub async fn modify<F>(&self, id: &RecordId, change: F) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut T),
    {
        self.write(|docs| {
            Ok(docs.get_mut(id).map(|doc| {
                change(doc);
                doc.clone()
            }))
        })
        .await
    }

    /// Remove a document. Returns `false` if none matched.
    pub async fn remove(&self, id: &RecordId) -> Result<bool, StoreError> {
        self.write(|docs| Ok(docs.remove(id).is_some())).await
    }

    /// Apply a mutation under the write lock.
    ///
    /// For file-backed collections the mutation is applied to a copy, which
    /// only replaces the live documents once it has been written out.
    async fn write<F, R>(&self, mutate: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut Documents<T>) -> Result<R, StoreError>,
    {
        let mut guard = self.docs.write().await;

        let Some(path) = &self.path else {
            return mutate(&mut guard);
        };

        let mut next = guard.clone();
        let out = mutate(&mut next)?;
        self.persist(path, &next).await?;
        *guard = next;
        Ok(out)
    }

    /// Write the documents to `path` via a temporary file and rename.
    async fn persist(&self, path: &Path, docs: &Documents<T>) -> Result<(), StoreError> {
        let list: Vec<&T> = docs.values().collect();
        let json = serde_json::to_vec_pretty(&list).map_err(|source| StoreError::Serialize {
            collection: self.name,
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|source| StoreError::Io {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(())
    }
}
