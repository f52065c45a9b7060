//! Core module - fundamental types and utilities

pub mod changelog;
pub mod config;
pub mod entity;
pub mod identity;
pub mod store;
pub mod workspace;

pub use changelog::{ChangeEntry, ChangeLog, ChangeLogError, RecordType};
pub use config::Config;
pub use entity::Entity;
pub use identity::{EntityId, EntityPrefix, IdParseError};
pub use store::{Store, StoreError};
pub use workspace::{Workspace, WorkspaceError};
