//! File-backed entity store
//!
//! The persistence collaborator for all commands: typed load/save over
//! the workspace's entity directories. Queries are in-memory filters over
//! full loads; nothing here caches across calls, so every read re-derives
//! from the files on disk.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::workspace::Workspace;

/// Typed access to the entities in a workspace
pub struct Store<'a> {
    workspace: &'a Workspace,
}

impl<'a> Store<'a> {
    /// Create a store over a workspace
    pub fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    fn prefix_for<T: Entity>() -> Result<EntityPrefix, StoreError> {
        T::PREFIX
            .parse()
            .map_err(|_| StoreError::UnknownPrefix(T::PREFIX.to_string()))
    }

    /// Write an entity to its canonical path, creating directories as needed
    pub fn save<T: Entity>(&self, entity: &T) -> Result<PathBuf, StoreError> {
        let prefix = Self::prefix_for::<T>()?;
        let path = self.workspace.entity_path(prefix, entity.id());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let yaml =
            serde_yml::to_string(entity).map_err(|e| StoreError::Serialize(e.to_string()))?;
        fs::write(&path, yaml).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(path)
    }

    /// Load all entities of a type. Files that fail to parse are skipped.
    pub fn load_all<T: Entity + 'static>(&self) -> Result<Vec<T>, StoreError> {
        let prefix = Self::prefix_for::<T>()?;
        let mut entities = Vec::new();

        for path in self.workspace.iter_entity_files(prefix) {
            if let Ok(content) = fs::read_to_string(&path) {
                if let Ok(entity) = serde_yml::from_str::<T>(&content) {
                    entities.push(entity);
                }
            }
        }

        Ok(entities)
    }

    /// Load a single entity by full or partial ID
    pub fn load<T: Entity + 'static>(&self, id: &str) -> Result<T, StoreError> {
        let prefix = Self::prefix_for::<T>()?;

        for path in self.workspace.iter_entity_files(prefix) {
            let stem = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if stem.starts_with(id) || stem.contains(id) {
                let content =
                    fs::read_to_string(&path).map_err(|e| StoreError::Io(e.to_string()))?;
                return serde_yml::from_str(&content)
                    .map_err(|e| StoreError::Deserialize(path.display().to_string(), e.to_string()));
            }
        }

        Err(StoreError::NotFound(format!("{} {}", T::PREFIX, id)))
    }

    /// Build a case-insensitive name → id lookup for an entity type.
    ///
    /// One full load; intended for parent-reference resolution during
    /// batch import. Duplicate names keep the first id seen.
    pub fn name_index<T: Entity + 'static>(&self) -> Result<HashMap<String, EntityId>, StoreError> {
        let mut index = HashMap::new();
        for entity in self.load_all::<T>()? {
            index
                .entry(entity.name().to_lowercase())
                .or_insert_with(|| entity.id().clone());
        }
        Ok(index)
    }
}

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("failed to serialize entity: {0}")]
    Serialize(String),

    #[error("failed to parse {0}: {1}")]
    Deserialize(String, String),

    #[error("unknown entity prefix: {0}")]
    UnknownPrefix(String),

    #[error("not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Project, Task};
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_all() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        let store = Store::new(&ws);

        let proj = Project::new("Maple St".to_string(), "test".to_string());
        let path = store.save(&proj).unwrap();
        assert!(path.exists());

        let all: Vec<Project> = store.load_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Maple St");
    }

    #[test]
    fn test_load_by_partial_id() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        let store = Store::new(&ws);

        let proj = Project::new("Maple St".to_string(), "test".to_string());
        store.save(&proj).unwrap();

        let loaded: Project = store.load(&proj.id.to_string()).unwrap();
        assert_eq!(loaded.id, proj.id);

        let err = store.load::<Task>("TASK-missing").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_name_index_is_case_insensitive() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        let store = Store::new(&ws);

        let proj = Project::new("Maple St Remodel".to_string(), "test".to_string());
        store.save(&proj).unwrap();

        let index = store.name_index::<Project>().unwrap();
        assert_eq!(index.get("maple st remodel"), Some(&proj.id));
        assert!(index.get("Maple St Remodel").is_none());
    }
}
