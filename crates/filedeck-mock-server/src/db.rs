//! JSON document backing the mock `/files` collection.
//!
//! Layout matches json-server's `db.json`:
//!
//! ```json
//! { "files": [ { "id": "3f2a", "name": "a.txt", "size": 12 } ] }
//! ```
//!
//! Top-level keys other than `files` are kept and written back.

use std::path::{Path, PathBuf};

use filedeck_core::error::{FileDeckError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    files: Vec<Value>,
    #[serde(flatten)]
    other: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum InsertError {
    #[error("duplicate id '{0}'")]
    DuplicateId(String),
    #[error("no free id left")]
    IdsExhausted,
    #[error(transparent)]
    Storage(#[from] FileDeckError),
}

/// The collection, cached in memory and flushed to disk on every mutation.
#[derive(Debug)]
pub struct JsonDb {
    path: PathBuf,
    doc: Mutex<Document>,
}

impl JsonDb {
    /// Opens `path`, creating an empty collection when the file is missing.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let doc = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Document::default(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("[MockDb] {} not found, starting empty", path.display());
                let doc = Document::default();
                write_document(&path, &doc).await?;
                doc
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            doc: Mutex::new(doc),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn list(&self) -> Vec<Value> {
        self.doc.lock().await.files.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Value> {
        let doc = self.doc.lock().await;
        doc.files.iter().find(|f| id_matches(f, id)).cloned()
    }

    /// Appends `record`, assigning a fresh hex id unless it carries one.
    /// Nothing changes in memory when the write fails.
    pub async fn insert(&self, mut record: Map<String, Value>) -> std::result::Result<Value, InsertError> {
        let mut doc = self.doc.lock().await;

        let id = match record.get("id").and_then(id_string) {
            Some(id) => {
                if doc.files.iter().any(|f| id_matches(f, &id)) {
                    return Err(InsertError::DuplicateId(id));
                }
                id
            }
            None => {
                let id = fresh_id(&doc.files).ok_or(InsertError::IdsExhausted)?;
                record.insert("id".to_string(), Value::String(id.clone()));
                id
            }
        };

        let value = Value::Object(record);
        doc.files.push(value.clone());
        if let Err(e) = write_document(&self.path, &doc).await {
            doc.files.pop();
            return Err(e.into());
        }
        tracing::debug!("[MockDb] inserted {}", id);
        Ok(value)
    }

    /// Removes the record with `id`. Returns false when there is none.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let mut doc = self.doc.lock().await;
        let Some(index) = doc.files.iter().position(|f| id_matches(f, id)) else {
            return Ok(false);
        };

        let removed = doc.files.remove(index);
        if let Err(e) = write_document(&self.path, &doc).await {
            doc.files.insert(index, removed);
            return Err(e);
        }
        tracing::debug!("[MockDb] removed {}", id);
        Ok(true)
    }
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn id_matches(record: &Value, id: &str) -> bool {
    record
        .get("id")
        .and_then(id_string)
        .is_some_and(|existing| existing == id)
}

/// Draws per id width before giving up on it.
const ID_ATTEMPTS: usize = 64;

/// A random id not used in `files`: 4 hex digits, 8 once those keep colliding.
fn fresh_id(files: &[Value]) -> Option<String> {
    let mut rng = rand::thread_rng();
    let taken = |candidate: &String| files.iter().any(|f| id_matches(f, candidate));

    let short = (0..ID_ATTEMPTS)
        .map(|_| format!("{:04x}", rng.r#gen::<u16>()))
        .find(|candidate| !taken(candidate));
    if short.is_some() {
        return short;
    }
    (0..ID_ATTEMPTS)
        .map(|_| format!("{:08x}", rng.r#gen::<u32>()))
        .find(|candidate| !taken(candidate))
}

async fn write_document(path: &Path, doc: &Document) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(doc)?;
    let file_name = path
        .file_name()
        .ok_or_else(|| FileDeckError::io("db path has no file name"))?;
    let tmp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn test_open_missing_creates_empty_collection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");

        let db = JsonDb::open(&path).await.unwrap();
        assert!(db.list().await.is_empty());

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, json!({ "files": [] }));
    }

    #[tokio::test]
    async fn test_insert_assigns_hex_id_and_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        let db = JsonDb::open(&path).await.unwrap();

        let created = db
            .insert(object(json!({ "name": "a.txt", "size": 3 })))
            .await
            .unwrap();
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(id.len(), 4);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

        let reopened = JsonDb::open(&path).await.unwrap();
        assert_eq!(reopened.get(&id).await, Some(created));
    }

    #[tokio::test]
    async fn test_insert_keeps_supplied_id_and_rejects_duplicates() {
        let dir = TempDir::new().unwrap();
        let db = JsonDb::open(dir.path().join("db.json")).await.unwrap();

        let created = db
            .insert(object(json!({ "id": 7, "name": "a", "size": 1 })))
            .await
            .unwrap();
        assert_eq!(created["id"], json!(7));
        assert!(db.get("7").await.is_some());

        let err = db
            .insert(object(json!({ "id": "7", "name": "b", "size": 1 })))
            .await
            .unwrap_err();
        assert!(matches!(err, InsertError::DuplicateId(id) if id == "7"));
    }

    #[tokio::test]
    async fn test_remove() {
        let dir = TempDir::new().unwrap();
        let db = JsonDb::open(dir.path().join("db.json")).await.unwrap();
        db.insert(object(json!({ "id": "a", "name": "a", "size": 1 })))
            .await
            .unwrap();

        assert!(db.remove("a").await.unwrap());
        assert!(!db.remove("a").await.unwrap());
        assert!(db.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_other_top_level_keys_survive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, r#"{"files":[],"profile":{"name":"x"}}"#).unwrap();

        let db = JsonDb::open(&path).await.unwrap();
        db.insert(object(json!({ "name": "a", "size": 1 })))
            .await
            .unwrap();

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["profile"], json!({ "name": "x" }));
        assert_eq!(written["files"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_insert_leaves_collection_unchanged() {
        let dir = TempDir::new().unwrap();
        let db = JsonDb::open(dir.path().join("db.json")).await.unwrap();
        let blocker = dir.path().join(".db.json.tmp");
        std::fs::create_dir(&blocker).unwrap();

        let err = db
            .insert(object(json!({ "id": "x", "name": "a", "size": 1 })))
            .await
            .unwrap_err();
        assert!(matches!(err, InsertError::Storage(_)));
        assert!(db.list().await.is_empty());

        std::fs::remove_dir(&blocker).unwrap();
        let created = db
            .insert(object(json!({ "id": "x", "name": "a", "size": 1 })))
            .await
            .unwrap();
        assert_eq!(created["id"], json!("x"));
        assert_eq!(db.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_remove_keeps_record_in_place() {
        let dir = TempDir::new().unwrap();
        let db = JsonDb::open(dir.path().join("db.json")).await.unwrap();
        for id in ["a", "b", "c"] {
            db.insert(object(json!({ "id": id, "name": id, "size": 1 })))
                .await
                .unwrap();
        }
        let blocker = dir.path().join(".db.json.tmp");
        std::fs::create_dir(&blocker).unwrap();

        assert!(db.remove("b").await.is_err());
        let ids: Vec<Value> = db.list().await.iter().map(|f| f["id"].clone()).collect();
        assert_eq!(ids, vec![json!("a"), json!("b"), json!("c")]);

        std::fs::remove_dir(&blocker).unwrap();
        assert!(db.remove("b").await.unwrap());
        assert!(db.get("b").await.is_none());
    }

    #[test]
    fn test_fresh_id_widens_when_short_ids_are_taken() {
        let files: Vec<Value> = (0..=u16::MAX)
            .map(|n| json!({ "id": format!("{:04x}", n) }))
            .collect();

        let id = fresh_id(&files).unwrap();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
