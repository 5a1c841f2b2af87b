//! Storage layer - a string key-value store holding serialized collections.
//!
//! The task store keeps its whole collection under one well-known key and
//! rewrites it after every mutation. Backends only need get/set/remove.

mod file;
mod memory;
mod traits;

pub use file::FileKvStore;
pub use memory::MemoryKvStore;
pub use traits::KeyValueStore;
