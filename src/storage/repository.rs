use std::path::PathBuf;

use crate::{
    archive::manifest::manifest_entry,
    document::xml::XmlElement,
    foundation::error::MoviepackResult,
};

/// Theme assumed for character definitions that do not declare one.
pub const DEFAULT_CHAR_THEME: &str = "family";

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Kind of a stored user asset.
pub enum AssetKind {
    /// Background.
    Bg,
    /// Prop (placeable, holdable, wearable or video).
    Prop,
    /// Character.
    Char,
    /// Sound clip.
    Sound,
    /// Starter movie.
    Movie,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// How a non-video prop can be attached in a scene.
pub enum PropPlacement {
    /// Free-standing.
    Placeable,
    /// Held in a character's hand.
    Holdable,
    /// Worn on a character's head.
    Wearable,
}

impl PropPlacement {
    /// Manifest attribute name carrying the `"1"` flag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Placeable => "placeable",
            Self::Holdable => "holdable",
            Self::Wearable => "wearable",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Metadata record kept for every user asset.
pub struct AssetMeta {
    /// Asset id, usually including the file extension.
    pub id: String,
    /// Asset kind.
    #[serde(rename = "type")]
    pub kind: AssetKind,
    /// Kind-specific subtype (`"0"`, `"video"`, `"bgmusic"`, ...).
    #[serde(default)]
    pub subtype: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Prop placement, for non-video props.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ptype: Option<PropPlacement>,
    /// Pixel width, for video props.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Pixel height, for video props.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Duration in milliseconds, for sounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Theme of a character definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<String>,
}

impl AssetMeta {
    /// Record with only id and kind set.
    pub fn new(id: impl Into<String>, kind: AssetKind) -> Self {
        Self {
            id: id.into(),
            kind,
            subtype: String::new(),
            title: String::new(),
            ptype: None,
            width: None,
            height: None,
            duration: None,
            theme_id: None,
        }
    }

    /// Builder-style subtype setter.
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = subtype.into();
        self
    }

    /// Builder-style title setter.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Per-user asset store consumed by the codec.
///
/// Implementations own the storage layout; the codec only reads payloads and records while
/// packing and writes new ones while unpacking.
pub trait AssetRepository {
    /// Read an asset payload.
    fn load(&self, id: &str) -> anyhow::Result<Vec<u8>>;
    /// Metadata record for `id`, if one exists.
    fn meta(&self, id: &str) -> Option<AssetMeta>;
    /// Persist a payload together with its record.
    fn save(&mut self, bytes: &[u8], id: &str, meta: AssetMeta) -> anyhow::Result<()>;
    /// Write an auxiliary file (e.g. a video thumbnail) next to the stored assets.
    fn save_sidecar(&mut self, file_name: &str, bytes: &[u8]) -> anyhow::Result<()>;

    /// On-disk location of the payload for `id`, when the store keeps payloads as files.
    fn asset_path(&self, _id: &str) -> Option<PathBuf> {
        None
    }

    /// Whether a record exists for `id`.
    fn exists(&self, id: &str) -> bool {
        self.meta(id).is_some()
    }

    /// Render a record as one UGC manifest entry.
    fn meta_to_xml(&self, meta: &AssetMeta) -> MoviepackResult<String> {
        manifest_entry(meta).to_fragment()
    }
}

/// Per-user character store consumed by the codec.
pub trait CharacterRepository {
    /// Character definition XML.
    fn char_xml(&self, id: &str) -> anyhow::Result<Vec<u8>>;
    /// Whether a character with `id` is stored.
    fn exists(&self, id: &str) -> bool;
    /// Persist a character definition and its record.
    fn save(&mut self, xml: &[u8], meta: AssetMeta) -> anyhow::Result<()>;

    /// Theme a character definition belongs to.
    fn theme_id(&self, xml: &[u8]) -> String {
        char_theme_id(xml)
    }
}

/// Read the `theme_id` attribute of a character definition's root element.
///
/// Definitions that fail to parse or carry no theme fall back to [`DEFAULT_CHAR_THEME`].
pub fn char_theme_id(xml: &[u8]) -> String {
    XmlElement::parse(xml)
        .ok()
        .and_then(|root| root.attr("theme_id").map(str::to_string))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_CHAR_THEME.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/storage/repository.rs"]
mod tests;
