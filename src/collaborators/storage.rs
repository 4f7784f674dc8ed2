// ==========================================
// PIAR Portal - object storage
// ==========================================
// Generated documents and uploaded files are stored under
// `students/{student_id}/{file}`; the returned URL goes on the Document.
// ==========================================

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::collaborators::error::{CollaboratorError, CollaboratorResult};

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` at `path` and return its public URL.
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> CollaboratorResult<String>;

    fn public_url(&self, path: &str) -> String;
}

/// Object path for one document of a student. The document id keeps two
/// files with the same name apart; the file name is reduced to a safe
/// subset of characters.
pub fn student_object_path(student_id: &str, document_id: &str, file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("students/{}/{}-{}", student_id, document_id, safe)
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

// ==========================================
// InMemoryObjectStorage
// ==========================================
pub struct InMemoryObjectStorage {
    base_url: String,
    objects: Mutex<HashMap<String, (String, Vec<u8>)>>,
}

impl InMemoryObjectStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    /// Stored bytes and content type at `path`, if any.
    pub fn get(&self, path: &str) -> Option<(String, Vec<u8>)> {
        self.objects.lock().ok()?.get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> CollaboratorResult<String> {
        if path.trim().is_empty() {
            return Err(CollaboratorError::InvalidRequest("empty object path".to_string()));
        }
        self.objects
            .lock()
            .map_err(|e| CollaboratorError::Internal(e.to_string()))?
            .insert(path.to_string(), (content_type.to_string(), bytes));
        Ok(self.public_url(path))
    }

    fn public_url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

// ==========================================
// LocalObjectStorage - files under a root directory
// ==========================================
pub struct LocalObjectStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    /// Resolve `path` under the root, refusing anything that escapes it.
    fn resolve(&self, path: &str) -> CollaboratorResult<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if path.trim().is_empty() || escapes {
            return Err(CollaboratorError::InvalidRequest(format!("invalid object path: {}", path)));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn upload(&self, path: &str, bytes: Vec<u8>, _content_type: &str) -> CollaboratorResult<String> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;
        tracing::debug!(path = %target.display(), "object stored");
        Ok(self.public_url(path))
    }

    fn public_url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}
