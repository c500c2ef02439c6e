//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod storage;
mod browser;
#[cfg(not(target_arch = "wasm32"))]
mod file;
mod id;
mod payload;
mod item_repo;


pub use traits::{ItemStore, Repository};
pub use storage::{KeyValueStorage, MemoryStorage, StorageError};
pub use browser::BrowserStorage;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
pub use id::IdAllocator;
pub use payload::{decode, encode, Decoded, PayloadFormat};
pub use item_repo::ItemRepository;
