//! Workspace discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::identity::{EntityId, EntityPrefix};

/// Represents a SiteDeck workspace
#[derive(Debug)]
pub struct Workspace {
    /// Root directory of the workspace (parent of .sitedeck/)
    root: PathBuf,
}

impl Workspace {
    /// Find workspace root by walking up from the current directory
    pub fn discover() -> Result<Self, WorkspaceError> {
        let current =
            std::env::current_dir().map_err(|e| WorkspaceError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find workspace root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, WorkspaceError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        loop {
            let deck_dir = current.join(".sitedeck");
            if deck_dir.is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(WorkspaceError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Open a workspace at an explicit root, falling back to discovery
    pub fn open(explicit: Option<&Path>) -> Result<Self, WorkspaceError> {
        match explicit {
            Some(path) => Self::discover_from(path),
            None => Self::discover(),
        }
    }

    /// Create a new workspace structure at the given path
    pub fn init(path: &Path) -> Result<Self, WorkspaceError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let deck_dir = root.join(".sitedeck");
        if deck_dir.exists() {
            return Err(WorkspaceError::AlreadyExists(root.clone()));
        }

        std::fs::create_dir_all(&deck_dir)
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        let config_path = deck_dir.join("config.yaml");
        std::fs::write(&config_path, Self::default_config())
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        Self::create_entity_dirs(&root)?;

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# SiteDeck Workspace Configuration

# Default author for new records (can be overridden by global config)
# author: ""

# Editor to use for `sitedeck edit` commands (default: $EDITOR)
# editor: ""
"#
    }

    fn create_entity_dirs(root: &Path) -> Result<(), WorkspaceError> {
        let dirs = [
            "projects",
            "tasks",
            "quotes",
            "vendors",
            "trades",
            "budget/areas",
            "budget/items",
            "logs",
        ];

        for dir in dirs {
            std::fs::create_dir_all(root.join(dir))
                .map_err(|e| WorkspaceError::IoError(e.to_string()))?;
        }

        Ok(())
    }

    /// Get the workspace root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .sitedeck configuration directory
    pub fn deck_dir(&self) -> PathBuf {
        self.root.join(".sitedeck")
    }

    /// Get the append-only change log file
    pub fn changelog_path(&self) -> PathBuf {
        self.root.join("logs/changelog.jsonl")
    }

    /// Get the path for a new entity file
    pub fn entity_path(&self, prefix: EntityPrefix, id: &EntityId) -> PathBuf {
        self.root
            .join(Self::entity_directory(prefix))
            .join(format!("{}.deck.yaml", id))
    }

    /// Get the directory for a given entity prefix
    pub fn entity_directory(prefix: EntityPrefix) -> &'static str {
        match prefix {
            EntityPrefix::Proj => "projects",
            EntityPrefix::Task => "tasks",
            EntityPrefix::Quot => "quotes",
            EntityPrefix::Vend => "vendors",
            EntityPrefix::Trade => "trades",
            EntityPrefix::Area => "budget/areas",
            EntityPrefix::Item => "budget/items",
            EntityPrefix::Chg => "logs",
        }
    }

    /// Iterate all entity files of a given prefix type
    pub fn iter_entity_files(&self, prefix: EntityPrefix) -> impl Iterator<Item = PathBuf> {
        let dir = self.root.join(Self::entity_directory(prefix));
        walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().to_string_lossy().ends_with(".deck.yaml"))
            .map(|e| e.path().to_path_buf())
    }
}

/// Errors that can occur during workspace operations
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("not a SiteDeck workspace (searched from {searched_from:?}). Run 'sitedeck init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("SiteDeck workspace already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}
