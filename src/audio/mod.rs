//! Audio playback instructions derived from a movie document.

/// Top-level `sound` element extraction.
pub mod timeline;
