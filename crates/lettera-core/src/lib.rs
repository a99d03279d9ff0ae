//! Lettera Core
//!
//! Shared building blocks for the Lettera crates: collections, math,
//! container geometry, logging, profiling and configuration.

pub mod alloc;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
