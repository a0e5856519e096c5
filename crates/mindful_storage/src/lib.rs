//! Durable journal state for Mindful.
//!
//! State is partitioned into independent slices (entries, tasks, posts,
//! generation config, friends), each saved as one JSON document under a
//! fixed key. A [`KeyValueStore`] backend holds the documents and a
//! [`JournalRepository`] gives typed access to them.
//!
//! # Backends
//!
//! - [`FileSystemStore`]: one `{key}.json` file per slice, written atomically
//! - [`MemoryStore`]: process-local, for tests and dry runs

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod memory;
mod repository;
mod slice;
mod store;

pub use filesystem::FileSystemStore;
pub use memory::MemoryStore;
pub use repository::JournalRepository;
pub use slice::StateSlice;
pub use store::KeyValueStore;
