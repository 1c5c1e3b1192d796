//! Movie archive assembly and import.
//!
//! `pack` walks a movie document and gathers every asset it references into a [`MovieArchive`];
//! `unpack` reads such an archive back and imports its user assets.
//!
//! [`MovieArchive`]: container::MovieArchive

/// Ordered archive member container and ZIP encoding.
pub mod container;
/// UGC manifest fragment and per-record manifest entries.
pub mod manifest;
pub(crate) mod pack;
/// Theme set collection, aliasing and theme list output.
pub mod themes;
pub(crate) mod unpack;
