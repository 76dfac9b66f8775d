//! Dual-mode persistence for EventSphere.
//!
//! All reads and writes go through the [`Store`] capability. The
//! [`selector`] picks the implementation once at startup: the SQLite-backed
//! [`RelationalStore`] when the database opens, otherwise the JSON-file
//! [`FileStore`].

pub mod catalog;
pub mod error;
pub mod file;
pub mod relational;
pub mod selector;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use relational::RelationalStore;
pub use selector::{ModePreference, Storage, StorageConfig, StorageMode};
pub use store::Store;
