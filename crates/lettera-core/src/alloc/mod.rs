//! Allocation and collection types shared by the Lettera crates.
//!
//! - AHash-backed map and set aliases
//! - [`SparseSet`](sparse_set::SparseSet), generational dense storage used
//!   for components and assets

pub mod sparse_set;

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
