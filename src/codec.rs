use crate::{
    archive::{container::MovieArchive, pack::pack_document, unpack::unpack_archive},
    audio::timeline::{AudioTimelineEntry, extract_audio_times},
    foundation::{config::CodecConfig, error::MoviepackResult},
    storage::repository::{AssetRepository, CharacterRepository},
};

/// Bidirectional movie codec bound to one configuration and one pair of user stores.
///
/// Packing only reads from the stores; unpacking writes every user asset the archive brings
/// that the stores do not already know.
pub struct MovieCodec<A, C> {
    config: CodecConfig,
    assets: A,
    chars: C,
}

impl<A, C> MovieCodec<A, C>
where
    A: AssetRepository,
    C: CharacterRepository,
{
    /// Bind a codec to its stores.
    pub fn new(config: CodecConfig, assets: A, chars: C) -> Self {
        Self {
            config,
            assets,
            chars,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Asset store.
    pub fn assets(&self) -> &A {
        &self.assets
    }

    /// Character store.
    pub fn characters(&self) -> &C {
        &self.chars
    }

    /// Release the stores.
    pub fn into_parts(self) -> (CodecConfig, A, C) {
        (self.config, self.assets, self.chars)
    }

    /// Build the in-memory archive for `document`.
    ///
    /// Unresolvable asset elements are replaced with placeholders in the archived `movie.xml`;
    /// the caller's bytes are never touched.
    pub fn pack_archive(
        &self,
        document: &[u8],
        thumbnail: Option<&[u8]>,
    ) -> MoviepackResult<MovieArchive> {
        pack_document(&self.config, &self.assets, &self.chars, document, thumbnail)
    }

    /// Build and encode the archive for `document` as ZIP bytes.
    #[tracing::instrument(skip_all)]
    pub fn pack(&self, document: &[u8], thumbnail: Option<&[u8]>) -> MoviepackResult<Vec<u8>> {
        let archive = self.pack_archive(document, thumbnail)?;
        tracing::debug!(members = archive.len(), "archive assembled");
        archive.to_zip()
    }

    /// Import an archive's user assets and return `(movie document, thumbnail)`.
    pub fn unpack(&mut self, archive: &[u8]) -> MoviepackResult<(Vec<u8>, Vec<u8>)> {
        unpack_archive(&mut self.assets, &mut self.chars, archive)
    }

    /// Playback instructions for the document's top-level sounds.
    pub fn extract_audio_times(&self, document: &[u8]) -> MoviepackResult<Vec<AudioTimelineEntry>> {
        extract_audio_times(&self.config, &self.assets, document)
    }
}
