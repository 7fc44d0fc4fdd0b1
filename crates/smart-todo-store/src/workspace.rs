use crate::blob::FileBlobStore;
use crate::config::Config;
use crate::error::StoreError;
use crate::task_store::TaskStore;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const WORKSPACE_DIR: &str = ".smart-todo";
const CONFIG_FILE: &str = "config.json";

/// A `.smart-todo/` directory holding the config and the task blob.
pub struct Workspace {
    root: PathBuf,
    pub config: Config,
}

impl Workspace {
    /// Create a new workspace at `path` with the given config.
    pub fn init(path: impl AsRef<Path>, mut config: Config) -> Result<Self, StoreError> {
        let root = path.as_ref().to_path_buf();
        let dir = root.join(WORKSPACE_DIR);

        if dir.exists() {
            return Err(StoreError::WorkspaceExists(dir.display().to_string()));
        }

        fs::create_dir_all(&dir)?;
        config.created_at.get_or_insert_with(Utc::now);
        config.save(&dir.join(CONFIG_FILE))?;
        debug!(path = %dir.display(), "initialized workspace");

        Ok(Self { root, config })
    }

    /// Open the workspace rooted exactly at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = path.as_ref().to_path_buf();
        let dir = root.join(WORKSPACE_DIR);

        if !dir.is_dir() {
            return Err(StoreError::WorkspaceNotFound(root.display().to_string()));
        }

        let config = Config::load(&dir.join(CONFIG_FILE))?;
        Ok(Self { root, config })
    }

    /// Search upward from `start` for a `.smart-todo/` directory.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut current = start.as_ref().to_path_buf();
        loop {
            if current.join(WORKSPACE_DIR).is_dir() {
                return Self::open(&current);
            }
            if !current.pop() {
                return Err(StoreError::WorkspaceNotFound(
                    start.as_ref().display().to_string(),
                ));
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `.smart-todo/` directory itself.
    pub fn dir(&self) -> PathBuf {
        self.root.join(WORKSPACE_DIR)
    }

    /// Load the task collection stored in this workspace.
    pub fn task_store(&self) -> TaskStore<FileBlobStore> {
        TaskStore::open(FileBlobStore::new(self.dir()))
    }
}
