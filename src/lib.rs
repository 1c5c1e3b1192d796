//! Moviepack converts animated-movie scene documents to and from self-contained archives.
//!
//! - [`MovieCodec::pack`] gathers every theme and user asset a movie references into one ZIP,
//!   eliding elements whose assets cannot be found.
//! - [`MovieCodec::unpack`] imports an archive's user assets into the local stores and returns the
//!   movie document and thumbnail.
//! - [`MovieCodec::extract_audio_times`] lists the movie's sound clips with timing and fades.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Archive containers, manifests and theme sets.
pub mod archive;
/// Audio timeline extraction.
pub mod audio;
mod codec;
/// Movie document model.
pub mod document;
mod foundation;
/// Storage adapters.
pub mod storage;

pub use crate::foundation::config::{CodecConfig, DEFAULT_XML_HEADER};
pub use crate::foundation::error::{MoviepackError, MoviepackResult};

pub use crate::archive::container::{
    MOVIE_MEMBER, MovieArchive, THEMELIST_MEMBER, THUMBNAIL_MEMBER, UGC_MEMBER,
};
pub use crate::archive::themes::{ThemeSet, parse_theme_list};
pub use crate::archive::unpack::MISSING_THUMBNAIL;
pub use crate::audio::timeline::{AudioTimelineEntry, Fade, extract_audio_times};
pub use crate::codec::MovieCodec;
pub use crate::document::reference::{AssetCategory, AssetReference};
pub use crate::document::xml::{PLACEHOLDER_TAG, XmlElement, XmlNode};
pub use crate::storage::local::LocalLibrary;
pub use crate::storage::memory::{InMemoryAssets, InMemoryCharacters};
pub use crate::storage::movies::{MovieFolder, MovieMeta, movie_meta};
pub use crate::storage::repository::{
    AssetKind, AssetMeta, AssetRepository, CharacterRepository, PropPlacement, char_theme_id,
};
