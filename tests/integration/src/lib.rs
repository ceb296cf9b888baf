//! Integration test utilities for Zerely
//!
//! Provides a test application wired over the in-memory document store and
//! request fixtures shaped like the web client's JSON bodies.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
