//! Storage adapters the codec reads from and writes to.
//!
//! The codec only talks to the [`repository`] traits. [`local`] and [`movies`] are the filesystem
//! implementations used by the CLI; [`memory`] holds everything in maps.

/// Filesystem user library.
pub mod local;
/// In-memory stores for tests and debugging.
pub mod memory;
/// Saved-movie folder and movie metadata.
pub mod movies;
/// Repository traits and asset records.
pub mod repository;
