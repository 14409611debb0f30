/*!
 * Storage Module
 * File storage collaborator interface plus the locked filesystem context
 */

mod context;
mod local;
mod memory;
mod traits;

pub use context::FsContext;
pub use local::LocalStorage;
pub use memory::MemStorage;
pub use traits::{FileStorage, StorageFile};
