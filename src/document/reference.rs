use std::path::{Path, PathBuf};

use crate::foundation::error::{MoviepackError, MoviepackResult};

/// Pseudo-theme id marking references into the per-user store.
pub const UGC_THEME: &str = "ugc";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Storage category of a referenced asset.
pub enum AssetCategory {
    /// Scene background.
    Bg,
    /// Scene effect.
    Effect,
    /// Prop, headgear or handheld item.
    Prop,
    /// Character definition or action.
    Char,
    /// Audio clip.
    Sound,
    /// Character action.
    Action,
    /// Character head.
    Head,
}

impl AssetCategory {
    /// Segment name used in archive members and theme-tree paths.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bg => "bg",
            Self::Effect => "effect",
            Self::Prop => "prop",
            Self::Char => "char",
            Self::Sound => "sound",
            Self::Action => "action",
            Self::Head => "head",
        }
    }
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssetCategory {
    type Err = MoviepackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "bg" => Self::Bg,
            "effect" => Self::Effect,
            "prop" => Self::Prop,
            "char" => Self::Char,
            "sound" => Self::Sound,
            "action" => Self::Action,
            "head" => Self::Head,
            other => {
                return Err(MoviepackError::malformed_reference(format!(
                    "unknown asset category '{other}'"
                )));
            }
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// Structured form of a dotted asset reference such as `family.sofa.swf`.
///
/// The category never appears in the reference string itself; the caller supplies it from the
/// element the reference was found in.
pub struct AssetReference {
    /// Theme folder name, or [`UGC_THEME`].
    pub theme_id: String,
    /// Storage category.
    pub category: AssetCategory,
    /// Dotted middle segments (may be empty).
    pub id: String,
    /// Trailing extension without the dot.
    pub extension: String,
}

impl AssetReference {
    /// Split `reference` into theme, id and extension, attaching `category`.
    pub fn decode(reference: &str, category: AssetCategory) -> MoviepackResult<Self> {
        let reference = reference.trim();
        let mut segments: Vec<&str> = reference.split('.').collect();
        if segments.len() < 2 {
            return Err(MoviepackError::malformed_reference(format!(
                "'{reference}' has fewer than two dotted segments"
            )));
        }
        let extension = segments.pop().unwrap_or_default().to_string();
        let theme_id = segments.remove(0).to_string();
        Ok(Self {
            theme_id,
            category,
            id: segments.join("."),
            extension,
        })
    }

    /// Reference string form; inverse of [`AssetReference::decode`].
    pub fn encode(&self) -> String {
        if self.id.is_empty() {
            format!("{}.{}", self.theme_id, self.extension)
        } else {
            format!("{}.{}.{}", self.theme_id, self.id, self.extension)
        }
    }

    /// Whether the reference points into the per-user store.
    pub fn is_ugc(&self) -> bool {
        self.theme_id == UGC_THEME
    }

    /// Copy with another category.
    pub fn with_category(&self, category: AssetCategory) -> Self {
        Self {
            category,
            ..self.clone()
        }
    }

    /// Copy with another extension.
    pub fn with_extension(&self, extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            ..self.clone()
        }
    }

    /// Member-name pieces: theme, category, id segments, with the extension glued to the last.
    pub fn pieces(&self) -> Vec<String> {
        let mut pieces = vec![self.theme_id.clone(), self.category.as_str().to_string()];
        if !self.id.is_empty() {
            pieces.extend(self.id.split('.').map(str::to_string));
        }
        match pieces.len() {
            2 => pieces.push(self.extension.clone()),
            _ => {
                if let Some(last) = pieces.last_mut() {
                    last.push('.');
                    last.push_str(&self.extension);
                }
            }
        }
        pieces
    }

    /// Archive member name, `<theme>.<category>.<id>.<ext>`.
    pub fn member_name(&self) -> String {
        self.pieces().join(".")
    }

    /// Location of the asset inside the shared theme tree rooted at `root`.
    pub fn theme_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for piece in self.pieces() {
            path.push(piece);
        }
        path
    }

    /// Identifier used by the per-user store: the first piece after the category.
    pub fn ugc_id(&self) -> String {
        self.pieces().swap_remove(2)
    }

    /// Last piece including the extension.
    pub fn file_name(&self) -> String {
        self.pieces().pop().unwrap_or_default()
    }

    /// Whether any piece equals `segment` exactly.
    pub fn has_piece(&self, segment: &str) -> bool {
        self.pieces().iter().any(|p| p == segment)
    }
}

/// Free-function form of [`AssetReference::decode`].
pub fn decode(reference: &str, category: AssetCategory) -> MoviepackResult<AssetReference> {
    AssetReference::decode(reference, category)
}

/// Free-function form of [`AssetReference::encode`].
pub fn encode(reference: &AssetReference) -> String {
    reference.encode()
}

/// Id of a video prop's companion thumbnail: the id with its 3-character extension replaced by
/// `png`.
pub fn video_thumbnail_id(id: &str) -> String {
    let cut = id
        .char_indices()
        .rev()
        .nth(2)
        .map(|(i, _)| i)
        .unwrap_or(0);
    format!("{}png", &id[..cut])
}

#[cfg(test)]
#[path = "../../tests/unit/document/reference.rs"]
mod tests;
