use std::path::{Path, PathBuf};

use anyhow::Context;
use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::{
    audio::timeline::AudioTimelineEntry,
    codec::MovieCodec,
    document::xml::XmlElement,
    foundation::error::{MoviepackError, MoviepackResult},
    storage::repository::{AssetRepository, CharacterRepository},
};

/// Length of generated movie ids.
const MOVIE_ID_LEN: usize = 7;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Summary of a saved movie document.
pub struct MovieMeta {
    /// Text of the first `title` element.
    pub title: String,
    /// Root `duration` attribute in seconds.
    pub duration: f64,
    /// `duration` as `mm:ss`.
    pub duration_string: String,
    /// Number of top-level scenes.
    pub scene_count: usize,
    /// Last modification of the saved document, in seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<u64>,
}

/// Read title, duration and scene count from a movie document.
pub fn movie_meta(xml: &[u8]) -> MoviepackResult<MovieMeta> {
    let film = XmlElement::parse(xml)?;
    let title = film
        .find("title")
        .map(|t| t.text().trim().to_string())
        .unwrap_or_default();
    let duration = film
        .attr("duration")
        .and_then(|d| d.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .unwrap_or(0.0);
    let scene_count = film.elements().filter(|e| e.name == "scene").count();

    Ok(MovieMeta {
        title,
        duration,
        duration_string: duration_string(duration),
        scene_count,
        date: None,
    })
}

fn duration_string(seconds: f64) -> String {
    let whole = seconds.trunc() as u64;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

/// Directory of saved movies, each stored as `<id>.xml` plus an optional `<id>.png` thumbnail.
#[derive(Clone, Debug)]
pub struct MovieFolder {
    root: PathBuf,
}

impl MovieFolder {
    /// Open (and create if needed) the folder at `root`.
    pub fn open(root: impl Into<PathBuf>) -> MoviepackResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("create movie folder '{}'", root.display()))?;
        Ok(Self { root })
    }

    /// Folder root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether a movie with `id` is saved.
    pub fn exists(&self, id: &str) -> bool {
        self.xml_path(id).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Store a movie and its thumbnail, returning its id.
    ///
    /// With `id` set the existing movie is overwritten and must already exist; otherwise a fresh id
    /// is generated.
    pub fn save(&self, xml: &[u8], thumbnail: Option<&[u8]>, id: Option<&str>) -> MoviepackResult<String> {
        let id = match id {
            Some(id) if self.exists(id) => id.to_string(),
            Some(id) => return Err(MoviepackError::missing_asset(format!("movie #{id}"))),
            None => self.fresh_id(xml),
        };

        if let Some(thumbnail) = thumbnail {
            let path = self.thumb_path(&id)?;
            std::fs::write(&path, thumbnail)
                .with_context(|| format!("write thumbnail '{}'", path.display()))?;
        }
        let path = self.xml_path(&id)?;
        std::fs::write(&path, xml).with_context(|| format!("write movie '{}'", path.display()))?;
        tracing::info!(%id, "movie saved");
        Ok(id)
    }

    /// Pack a saved movie into archive bytes.
    pub fn pack_movie<A, C>(&self, codec: &MovieCodec<A, C>, id: &str) -> MoviepackResult<Vec<u8>>
    where
        A: AssetRepository,
        C: CharacterRepository,
    {
        let xml = self.read_xml(id)?;
        let thumb_path = self.thumb_path(id)?;
        let thumbnail = match std::fs::read(&thumb_path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::debug!(%id, error = %e, "movie has no thumbnail");
                None
            }
        };
        codec.pack(&xml, thumbnail.as_deref())
    }

    /// Import an archive's assets and save its movie under a fresh id.
    pub fn upload<A, C>(&self, codec: &mut MovieCodec<A, C>, archive: &[u8]) -> MoviepackResult<String>
    where
        A: AssetRepository,
        C: CharacterRepository,
    {
        let (xml, thumbnail) = codec.unpack(archive)?;
        self.save(&xml, Some(&thumbnail), None)
    }

    /// Audio timeline of a saved movie.
    pub fn extract_audio_times<A, C>(
        &self,
        codec: &MovieCodec<A, C>,
        id: &str,
    ) -> MoviepackResult<Vec<AudioTimelineEntry>>
    where
        A: AssetRepository,
        C: CharacterRepository,
    {
        let xml = self.read_xml(id)?;
        codec.extract_audio_times(&xml)
    }

    /// Remove a saved movie and its thumbnail.
    pub fn delete(&self, id: &str) -> MoviepackResult<()> {
        if !self.exists(id) {
            return Err(MoviepackError::missing_asset(format!("movie #{id}")));
        }
        let xml = self.xml_path(id)?;
        std::fs::remove_file(&xml).with_context(|| format!("remove '{}'", xml.display()))?;
        let thumb = self.thumb_path(id)?;
        if thumb.is_file() {
            std::fs::remove_file(&thumb).with_context(|| format!("remove '{}'", thumb.display()))?;
        }
        tracing::info!(%id, "movie deleted");
        Ok(())
    }

    /// Metadata of a saved movie, dated by the document's modification time.
    pub fn extract_meta(&self, id: &str) -> MoviepackResult<MovieMeta> {
        let mut meta = movie_meta(&self.read_xml(id)?)?;
        let path = self.xml_path(id)?;
        let modified = std::fs::metadata(&path)
            .and_then(|m| m.modified())
            .with_context(|| format!("stat movie '{}'", path.display()))?;
        meta.date = modified
            .duration_since(std::time::UNIX_EPOCH)
            .ok()
            .map(|d| d.as_secs());
        Ok(meta)
    }

    fn read_xml(&self, id: &str) -> MoviepackResult<Vec<u8>> {
        if !self.exists(id) {
            return Err(MoviepackError::missing_asset(format!("movie #{id}")));
        }
        let path = self.xml_path(id)?;
        Ok(std::fs::read(&path).with_context(|| format!("read movie '{}'", path.display()))?)
    }

    fn xml_path(&self, id: &str) -> MoviepackResult<PathBuf> {
        validate_id(id)?;
        Ok(self.root.join(format!("{id}.xml")))
    }

    fn thumb_path(&self, id: &str) -> MoviepackResult<PathBuf> {
        validate_id(id)?;
        Ok(self.root.join(format!("{id}.png")))
    }

    fn fresh_id(&self, xml: &[u8]) -> String {
        let mut seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        loop {
            let id = short_id(xxh3_64_with_seed(xml, seed));
            if !self.exists(&id) {
                return id;
            }
            seed = seed.wrapping_add(1);
        }
    }
}

fn short_id(hash: u64) -> String {
    let hex = format!("{hash:016x}");
    hex[..MOVIE_ID_LEN].to_string()
}

fn validate_id(id: &str) -> MoviepackResult<()> {
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(MoviepackError::missing_asset(format!("movie #{id}")));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/storage/movies.rs"]
mod tests;
