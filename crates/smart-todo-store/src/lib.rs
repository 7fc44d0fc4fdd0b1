//! Persistence for the task collection: blob backends, the owned task
//! store and the on-disk workspace.

pub mod blob;
pub mod config;
pub mod error;
pub mod task_store;
pub mod workspace;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore, TASKS_KEY};
pub use config::Config;
pub use error::StoreError;
pub use task_store::TaskStore;
pub use workspace::Workspace;
