//! Shared document store

mod memory;

pub use memory::{MemoryStore, SharedStore};
