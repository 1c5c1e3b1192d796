use crate::{
    document::{reference::UGC_THEME, xml::XmlElement},
    foundation::error::MoviepackResult,
};

/// Legacy theme ids and the ids they are shipped under.
pub const THEME_ALIASES: &[(&str, &str)] = &[("family", "custom"), ("cc2", "action")];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Theme ids seen while packing, in first-seen order.
pub struct ThemeSet {
    ids: Vec<String>,
}

impl ThemeSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `theme_id` unless already present.
    pub fn insert(&mut self, theme_id: &str) {
        if !self.contains(theme_id) {
            self.ids.push(theme_id.to_string());
        }
    }

    /// Whether `theme_id` was recorded.
    pub fn contains(&self, theme_id: &str) -> bool {
        self.ids.iter().any(|t| t == theme_id)
    }

    /// Replace legacy aliases with their canonical ids.
    ///
    /// The alias is dropped and its target appended unless the target was already seen.
    pub fn canonicalize(&mut self) {
        for (legacy, canonical) in THEME_ALIASES {
            if let Some(pos) = self.ids.iter().position(|t| t == legacy) {
                self.ids.remove(pos);
                self.insert(canonical);
            }
        }
    }

    /// All ids in first-seen order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Ids that need a theme manifest (everything but `ugc`).
    pub fn manifest_ids(&self) -> impl Iterator<Item = &str> {
        self.ids
            .iter()
            .map(String::as_str)
            .filter(|t| *t != UGC_THEME)
    }

    /// Render `themelist.xml`.
    pub fn to_theme_list(&self, header: &str) -> MoviepackResult<Vec<u8>> {
        let mut root = XmlElement::new("themes");
        for id in &self.ids {
            root = root.with_child(XmlElement::new("theme").with_text(id.as_str()));
        }
        root.to_document(header)
    }
}

/// Read the theme ids listed in a `themelist.xml` document.
pub fn parse_theme_list(xml: &[u8]) -> MoviepackResult<Vec<String>> {
    let root = XmlElement::parse(xml)?;
    Ok(root
        .elements()
        .filter(|e| e.name == "theme")
        .map(|e| e.text().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/archive/themes.rs"]
mod tests;
