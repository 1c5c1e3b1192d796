use crate::{
    document::{reference::video_thumbnail_id, xml::XmlElement},
    storage::repository::{AssetKind, AssetMeta, PropPlacement},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Accumulating `ugc.xml` fragment: one entry per user asset the movie depends on.
pub struct UgcManifest {
    entries: Vec<String>,
}

impl UgcManifest {
    /// Empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one rendered entry.
    pub fn push(&mut self, entry: String) {
        self.entries.push(entry);
    }

    /// Number of entries so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries were added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Close the fragment and render the full `ugc.xml` document.
    pub fn finish(&self, header: &str) -> Vec<u8> {
        let mut out = String::with_capacity(header.len() + 64);
        out.push_str(header);
        out.push_str(r#"<theme id="ugc" name="ugc">"#);
        for entry in &self.entries {
            out.push_str(entry);
        }
        out.push_str("</theme>");
        out.into_bytes()
    }
}

/// Describe one stored asset as a UGC manifest element.
pub fn manifest_entry(meta: &AssetMeta) -> XmlElement {
    let id = meta.id.as_str();
    let asset_url = format!("/assets/{id}");
    match meta.kind {
        AssetKind::Bg => XmlElement::new("background")
            .with_attr("subtype", "0")
            .with_attr("id", id)
            .with_attr("enc_asset_id", id)
            .with_attr("name", meta.title.as_str())
            .with_attr("enable", "Y")
            .with_attr("asset_url", asset_url),
        AssetKind::Prop if meta.subtype == "video" => XmlElement::new("prop")
            .with_attr("subtype", "video")
            .with_attr("id", id)
            .with_attr("enc_asset_id", id)
            .with_attr("name", meta.title.as_str())
            .with_attr("enable", "Y")
            .with_attr("holdable", "0")
            .with_attr("headable", "0")
            .with_attr("placeable", "1")
            .with_attr("facing", "left")
            .with_attr("width", meta.width.unwrap_or(0).to_string())
            .with_attr("height", meta.height.unwrap_or(0).to_string())
            .with_attr("asset_url", asset_url)
            .with_attr(
                "thumbnail_url",
                format!("/assets/{}", video_thumbnail_id(id)),
            ),
        AssetKind::Prop => {
            let placement = meta.ptype.unwrap_or(PropPlacement::Placeable);
            let flag = |p: PropPlacement| if p == placement { "1" } else { "0" };
            XmlElement::new("prop")
                .with_attr("subtype", "0")
                .with_attr("id", id)
                .with_attr("enc_asset_id", id)
                .with_attr("name", meta.title.as_str())
                .with_attr("enable", "Y")
                .with_attr("holdable", flag(PropPlacement::Holdable))
                .with_attr("wearable", flag(PropPlacement::Wearable))
                .with_attr("placeable", flag(PropPlacement::Placeable))
                .with_attr("facing", "left")
                .with_attr("width", "0")
                .with_attr("height", "0")
                .with_attr("asset_url", asset_url)
        }
        AssetKind::Char => XmlElement::new("char")
            .with_attr("id", id)
            .with_attr("enc_asset_id", id)
            .with_attr("name", if meta.title.is_empty() { "Untitled" } else { meta.title.as_str() })
            .with_attr("cc_theme_id", meta.theme_id.as_deref().unwrap_or_default())
            .with_attr("thumbnail_url", format!("/assets/{id}.png"))
            .with_attr("copyable", "Y")
            .with_child(XmlElement::new("tags")),
        AssetKind::Sound => XmlElement::new("sound")
            .with_attr("subtype", meta.subtype.as_str())
            .with_attr("id", id)
            .with_attr("enc_asset_id", id)
            .with_attr("name", meta.title.as_str())
            .with_attr("enable", "Y")
            .with_attr("duration", meta.duration.unwrap_or(0.0).to_string())
            .with_attr("downloadtype", "progressive"),
        AssetKind::Movie => XmlElement::new("movie")
            .with_attr("id", id)
            .with_attr("enc_asset_id", id)
            .with_attr("name", meta.title.as_str()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/archive/manifest.rs"]
mod tests;
