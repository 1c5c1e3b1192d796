use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::MoviepackResult;

/// Default XML declaration prepended to generated manifests.
pub const DEFAULT_XML_HEADER: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Storage roots and output options for the movie codec.
pub struct CodecConfig {
    /// Root of the shared theme tree (`<root>/<themeId>/...`).
    pub shared_content_root: PathBuf,
    /// Root of the per-user asset store. Used for user clip paths only when the asset store
    /// exposes no file paths of its own.
    pub user_content_root: PathBuf,
    /// XML declaration written in front of every generated XML member.
    #[serde(default = "default_xml_header")]
    pub xml_header: String,
    /// Root of the static client files holding bundled fonts. Falls back to
    /// `shared_content_root` when unset.
    #[serde(default)]
    pub client_root: Option<PathBuf>,
    /// Themes seeded into every packed theme set before traversal.
    #[serde(default)]
    pub always_include_themes: Vec<String>,
}

fn default_xml_header() -> String {
    DEFAULT_XML_HEADER.to_string()
}

impl CodecConfig {
    /// Build a config with default header and no seeded themes.
    pub fn new(shared_content_root: impl Into<PathBuf>, user_content_root: impl Into<PathBuf>) -> Self {
        Self {
            shared_content_root: shared_content_root.into(),
            user_content_root: user_content_root.into(),
            xml_header: default_xml_header(),
            client_root: None,
            always_include_themes: Vec::new(),
        }
    }

    /// Replace the XML declaration.
    pub fn with_xml_header(mut self, header: impl Into<String>) -> Self {
        self.xml_header = header.into();
        self
    }

    /// Set the static client root used for bundled fonts.
    pub fn with_client_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.client_root = Some(root.into());
        self
    }

    /// Seed `themes` into every packed theme set.
    pub fn with_always_include_themes<I, S>(mut self, themes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.always_include_themes = themes.into_iter().map(Into::into).collect();
        self
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: &Path) -> MoviepackResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read codec config '{}'", path.display()))?;
        let cfg = serde_json::from_str(&text)
            .with_context(|| format!("parse codec config '{}'", path.display()))?;
        Ok(cfg)
    }

    /// Directory holding bundled `FontFile*.swf` resources.
    pub fn font_dir(&self) -> PathBuf {
        self.client_root
            .as_deref()
            .unwrap_or(&self.shared_content_root)
            .join("go")
            .join("font")
    }

    /// Path of a theme's manifest file.
    pub fn theme_manifest_path(&self, theme_id: &str) -> PathBuf {
        self.shared_content_root.join(theme_id).join("theme.xml")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
