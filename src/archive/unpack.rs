use crate::{
    archive::container::{MOVIE_MEMBER, MovieArchive, THUMBNAIL_MEMBER, UGC_MEMBER},
    document::{reference::video_thumbnail_id, xml::XmlElement},
    foundation::error::{MoviepackError, MoviepackResult},
    storage::repository::{
        AssetKind, AssetMeta, AssetRepository, CharacterRepository, PropPlacement,
    },
};

/// Thumbnail returned when the archive carries none.
pub const MISSING_THUMBNAIL: &[u8] = &[0x00];

/// Sound subtypes imported from an archive; others are ignored.
const IMPORTED_SOUND_SUBTYPES: &[&str] = &["bgmusic", "soundeffect", "voiceover", "tts"];

/// Import the archive's user assets and return `(movie document, thumbnail)`.
#[tracing::instrument(skip_all, fields(archive_len = archive.len()))]
pub(crate) fn unpack_archive<A, C>(
    assets: &mut A,
    chars: &mut C,
    archive: &[u8],
) -> MoviepackResult<(Vec<u8>, Vec<u8>)>
where
    A: AssetRepository,
    C: CharacterRepository,
{
    let archive = MovieArchive::from_zip(archive)?;
    let manifest = XmlElement::parse(archive.require(UGC_MEMBER)?)?;

    let mut importer = Importer {
        archive: &archive,
        assets,
        chars,
    };
    for entry in manifest.elements() {
        importer.import(entry)?;
    }

    let document = archive.require(MOVIE_MEMBER)?.to_vec();
    let thumbnail = archive
        .get(THUMBNAIL_MEMBER)
        .unwrap_or(MISSING_THUMBNAIL)
        .to_vec();
    Ok((document, thumbnail))
}

struct Importer<'a, A, C> {
    archive: &'a MovieArchive,
    assets: &'a mut A,
    chars: &'a mut C,
}

impl<A, C> Importer<'_, A, C>
where
    A: AssetRepository,
    C: CharacterRepository,
{
    fn import(&mut self, entry: &XmlElement) -> MoviepackResult<()> {
        let id = entry.attr("id").ok_or_else(|| {
            MoviepackError::corrupt_archive(format!("manifest entry <{}> has no id", entry.name))
        })?;
        let title = entry.attr("name").unwrap_or_default();

        match entry.name.as_str() {
            "background" => {
                if self.known_asset(id) {
                    return Ok(());
                }
                let bytes = self.archive.require(&format!("ugc.bg.{id}"))?;
                let meta = AssetMeta::new(id, AssetKind::Bg)
                    .with_subtype("0")
                    .with_title(title);
                self.assets.save(bytes, id, meta)?;
            }
            "prop" => {
                if self.known_asset(id) {
                    return Ok(());
                }
                let bytes = self.archive.require(&format!("ugc.prop.{id}"))?;
                if entry.attr("subtype") == Some("video") {
                    let mut meta = AssetMeta::new(id, AssetKind::Prop)
                        .with_subtype("video")
                        .with_title(title);
                    meta.width = number_attr(entry, "width").map(|w| w as u32);
                    meta.height = number_attr(entry, "height").map(|h| h as u32);
                    self.assets.save(bytes, id, meta)?;

                    // packed best-effort, so absence is not corruption
                    let thumb_id = video_thumbnail_id(id);
                    match self.archive.get(&format!("ugc.prop.{thumb_id}")) {
                        Some(thumb) => self.assets.save_sidecar(&thumb_id, thumb)?,
                        None => tracing::debug!(%id, %thumb_id, "video thumbnail not archived"),
                    }
                } else {
                    let mut meta = AssetMeta::new(id, AssetKind::Prop)
                        .with_subtype("0")
                        .with_title(title);
                    meta.ptype = Some(placement(entry));
                    self.assets.save(bytes, id, meta)?;
                }
            }
            "char" => {
                if self.chars.exists(id) {
                    tracing::debug!(%id, "character already stored");
                    return Ok(());
                }
                let xml = self.archive.require(&format!("ugc.char.{id}.xml"))?;
                let mut meta = AssetMeta::new(id, AssetKind::Char)
                    .with_subtype("0")
                    .with_title(title);
                meta.theme_id = Some(self.chars.theme_id(xml));
                self.chars.save(xml, meta)?;
            }
            "sound" => {
                let subtype = entry.attr("subtype").unwrap_or_default();
                if !IMPORTED_SOUND_SUBTYPES.contains(&subtype) {
                    tracing::debug!(%id, %subtype, "sound subtype is not imported");
                    return Ok(());
                }
                if self.known_asset(id) {
                    return Ok(());
                }
                let bytes = self.archive.require(&format!("ugc.sound.{id}"))?;
                let mut meta = AssetMeta::new(id, AssetKind::Sound)
                    .with_subtype(subtype)
                    .with_title(title);
                meta.duration = number_attr(entry, "duration");
                self.assets.save(bytes, id, meta)?;
            }
            other => {
                tracing::debug!(%id, kind = %other, "unknown manifest entry");
                return Ok(());
            }
        }

        tracing::info!(%id, kind = %entry.name, "imported user asset");
        Ok(())
    }

    fn known_asset(&self, id: &str) -> bool {
        let known = self.assets.exists(id);
        if known {
            tracing::debug!(%id, "asset already stored");
        }
        known
    }
}

fn placement(entry: &XmlElement) -> PropPlacement {
    if entry.attr("wearable") == Some("1") {
        PropPlacement::Wearable
    } else if entry.attr("holdable") == Some("1") {
        PropPlacement::Holdable
    } else {
        PropPlacement::Placeable
    }
}

fn number_attr(entry: &XmlElement, key: &str) -> Option<f64> {
    entry
        .attr(key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
#[path = "../../tests/unit/archive/unpack.rs"]
mod tests;
