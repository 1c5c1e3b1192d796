use crate::{
    archive::{
        container::{MOVIE_MEMBER, MovieArchive, THEMELIST_MEMBER, THUMBNAIL_MEMBER, UGC_MEMBER},
        manifest::UgcManifest,
        themes::ThemeSet,
    },
    document::{
        fonts::{BUILTIN_FONT, font_file_name, resolve_font},
        reference::{AssetCategory, AssetReference, video_thumbnail_id},
        xml::{XmlElement, XmlNode},
    },
    foundation::{
        config::CodecConfig,
        error::{MoviepackError, MoviepackResult},
    },
    storage::repository::{AssetKind, AssetMeta, AssetRepository, CharacterRepository},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How a direct child of a `scene` element is treated.
enum SceneHandler {
    /// Not asset-bearing; copied through.
    Passthrough,
    /// Carries a `file` reference of the given category.
    Asset(AssetCategory),
    /// Character with an `action` reference and nested head/prop parts.
    Character,
    /// Speech bubble whose text may need a bundled font.
    Bubble,
}

/// Scene child tag to handler. `effectAsset` is stored as `effect`.
const SCENE_HANDLERS: &[(&str, SceneHandler)] = &[
    ("durationSetting", SceneHandler::Passthrough),
    ("trans", SceneHandler::Passthrough),
    ("bg", SceneHandler::Asset(AssetCategory::Bg)),
    ("effect", SceneHandler::Asset(AssetCategory::Effect)),
    ("effectAsset", SceneHandler::Asset(AssetCategory::Effect)),
    ("prop", SceneHandler::Asset(AssetCategory::Prop)),
    ("char", SceneHandler::Character),
    ("bubbleAsset", SceneHandler::Bubble),
];

fn scene_handler(tag: &str) -> Option<SceneHandler> {
    SCENE_HANDLERS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, h)| *h)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    Resolved,
    Missing,
}

/// Build the archive for one movie document.
#[tracing::instrument(skip_all, fields(document_len = document.len()))]
pub(crate) fn pack_document<A, C>(
    config: &CodecConfig,
    assets: &A,
    chars: &C,
    document: &[u8],
    thumbnail: Option<&[u8]>,
) -> MoviepackResult<MovieArchive>
where
    A: AssetRepository,
    C: CharacterRepository,
{
    if document.is_empty() {
        return Err(MoviepackError::EmptyDocument);
    }

    let mut film = XmlElement::parse(document)?;
    let mut session = PackSession::new(config, assets, chars);
    let children = std::mem::take(&mut film.children);
    film.children = session.walk_film(children)?;
    session.finish(film, document, thumbnail)
}

struct PackSession<'a, A, C> {
    config: &'a CodecConfig,
    assets: &'a A,
    chars: &'a C,
    archive: MovieArchive,
    themes: ThemeSet,
    ugc: UgcManifest,
    mutated: bool,
}

impl<'a, A, C> PackSession<'a, A, C>
where
    A: AssetRepository,
    C: CharacterRepository,
{
    fn new(config: &'a CodecConfig, assets: &'a A, chars: &'a C) -> Self {
        let mut themes = ThemeSet::new();
        for theme in &config.always_include_themes {
            themes.insert(theme);
        }
        Self {
            config,
            assets,
            chars,
            archive: MovieArchive::new(),
            themes,
            ugc: UgcManifest::new(),
            mutated: false,
        }
    }

    fn walk_film(&mut self, children: Vec<XmlNode>) -> MoviepackResult<Vec<XmlNode>> {
        let mut out = Vec::with_capacity(children.len());
        for node in children {
            let node = match node {
                XmlNode::Element(el) if el.name == "sound" => XmlNode::Element(self.visit_sound(el)?),
                XmlNode::Element(el) if el.name == "scene" => XmlNode::Element(self.visit_scene(el)?),
                other => other,
            };
            out.push(node);
        }
        Ok(out)
    }

    fn visit_sound(&mut self, sound: XmlElement) -> MoviepackResult<XmlElement> {
        let Some(file) = sound.child_text("sfile") else {
            return Ok(sound);
        };
        match self.resolve_asset(&file, AssetCategory::Sound, None)? {
            Outcome::Resolved => Ok(sound),
            Outcome::Missing => Ok(self.downgrade()),
        }
    }

    fn visit_scene(&mut self, mut scene: XmlElement) -> MoviepackResult<XmlElement> {
        let children = std::mem::take(&mut scene.children);
        let mut out = Vec::with_capacity(children.len());
        for node in children {
            let XmlNode::Element(el) = node else {
                out.push(node);
                continue;
            };
            let el = match scene_handler(&el.name) {
                None | Some(SceneHandler::Passthrough) => el,
                Some(SceneHandler::Asset(category)) => self.visit_asset_node(el, category)?,
                Some(SceneHandler::Character) => self.visit_char(el)?,
                Some(SceneHandler::Bubble) => {
                    self.add_bubble_font(&el)?;
                    el
                }
            };
            out.push(XmlNode::Element(el));
        }
        scene.children = out;
        Ok(scene)
    }

    fn visit_asset_node(
        &mut self,
        el: XmlElement,
        category: AssetCategory,
    ) -> MoviepackResult<XmlElement> {
        let Some(file) = el.child_text("file") else {
            return Ok(el);
        };
        match self.resolve_asset(&file, category, el.attr("subtype"))? {
            Outcome::Resolved => Ok(el),
            Outcome::Missing => Ok(self.downgrade()),
        }
    }

    fn visit_char(&mut self, mut el: XmlElement) -> MoviepackResult<XmlElement> {
        let Some(action) = el.child_text("action") else {
            return Ok(el);
        };
        let reference = match AssetReference::decode(&action, AssetCategory::Char) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(%action, error = %e, "character action is malformed; eliding");
                return Ok(self.downgrade());
            }
        };

        let resolved = if reference.is_ugc() {
            self.add_user_character(&reference)?
        } else {
            self.add_theme_file(&reference, &reference)
        };
        if resolved == Outcome::Missing {
            return Ok(self.downgrade());
        }
        self.themes.insert(&reference.theme_id);

        let parts = std::mem::take(&mut el.children);
        let mut out = Vec::with_capacity(parts.len());
        for node in parts {
            let node = match node {
                XmlNode::Element(part) => XmlNode::Element(self.visit_char_part(part)?),
                other => other,
            };
            out.push(node);
        }
        el.children = out;
        Ok(el)
    }

    /// Heads, headgear and handhelds nested in a resolved character.
    fn visit_char_part(&mut self, part: XmlElement) -> MoviepackResult<XmlElement> {
        let Some(file) = part.child_text("file") else {
            return Ok(part);
        };

        if part.name != "head" {
            return match self.resolve_asset(&file, AssetCategory::Prop, None)? {
                Outcome::Resolved => Ok(part),
                Outcome::Missing => Ok(self.downgrade()),
            };
        }

        let head = match AssetReference::decode(&file, AssetCategory::Char) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(%file, error = %e, "head reference is malformed; eliding");
                return Ok(self.downgrade());
            }
        };
        // user heads ship inside the character definition
        if head.is_ugc() {
            return Ok(part);
        }
        let lookup = head.with_extension("swf");
        let archived = lookup.with_category(AssetCategory::Prop);
        match self.add_theme_file(&lookup, &archived) {
            Outcome::Resolved => {
                self.themes.insert(&head.theme_id);
                Ok(part)
            }
            Outcome::Missing => Ok(self.downgrade()),
        }
    }

    fn add_bubble_font(&mut self, bubble_asset: &XmlElement) -> MoviepackResult<()> {
        let Some(font) = bubble_asset
            .child("bubble")
            .and_then(|b| b.child("text"))
            .and_then(|t| t.attr("font"))
        else {
            return Ok(());
        };
        if font == BUILTIN_FONT {
            return Ok(());
        }
        let resource = resolve_font(font);
        if resource.is_empty() {
            return Ok(());
        }

        let file_name = font_file_name(&resource);
        let path = self.config.font_dir().join(&file_name);
        let bytes = std::fs::read(&path).map_err(|e| {
            MoviepackError::missing_asset(format!(
                "font '{font}' at '{}': {e}",
                path.display()
            ))
        })?;
        self.archive.add(file_name, bytes);
        Ok(())
    }

    /// Resolve a bg/effect/prop/sound reference and archive its payload.
    ///
    /// Unreadable payloads are recoverable; a user asset whose record is gone is not.
    fn resolve_asset(
        &mut self,
        file: &str,
        category: AssetCategory,
        subtype: Option<&str>,
    ) -> MoviepackResult<Outcome> {
        let reference = match AssetReference::decode(file, category) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(%file, %category, error = %e, "asset reference is malformed; eliding");
                return Ok(Outcome::Missing);
            }
        };

        if reference.is_ugc() {
            let id = reference.ugc_id();
            let bytes = match self.assets.load(&id) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(%id, %category, error = %e, "user asset failed to load; eliding");
                    return Ok(Outcome::Missing);
                }
            };
            let meta = self.assets.meta(&id).ok_or_else(|| {
                MoviepackError::missing_asset(format!(
                    "asset #{id} is referenced by the movie but has no record"
                ))
            })?;
            self.ugc.push(self.assets.meta_to_xml(&meta)?);
            self.archive.add(reference.member_name(), bytes);

            if category == AssetCategory::Prop && subtype == Some("video") {
                self.add_video_thumbnail(&reference, &id);
            }
        } else {
            let lookup = if category == AssetCategory::Prop && reference.has_piece("head") {
                reference.with_category(AssetCategory::Char)
            } else {
                reference.clone()
            };
            if self.add_theme_file(&lookup, &reference) == Outcome::Missing {
                return Ok(Outcome::Missing);
            }
        }

        self.themes.insert(&reference.theme_id);
        Ok(Outcome::Resolved)
    }

    fn add_video_thumbnail(&mut self, video: &AssetReference, id: &str) {
        let thumb_id = video_thumbnail_id(id);
        let mut pieces = video.pieces();
        pieces[2] = thumb_id.clone();
        match self.assets.load(&thumb_id) {
            Ok(bytes) => self.archive.add(pieces.join("."), bytes),
            Err(e) => tracing::debug!(%thumb_id, error = %e, "video thumbnail unavailable"),
        }
    }

    /// Archive a user character's definition under `ugc.char.<id>.xml`.
    fn add_user_character(&mut self, action: &AssetReference) -> MoviepackResult<Outcome> {
        let mut pieces = action.pieces();
        // drop the action; only the definition is archived
        if pieces.len() > 3 {
            pieces.remove(3);
        }
        let id = pieces[2].clone();

        let xml = match self.chars.char_xml(&id) {
            Ok(xml) => xml,
            Err(e) => {
                tracing::warn!(%id, error = %e, "user character failed to load; eliding");
                return Ok(Outcome::Missing);
            }
        };
        let mut meta = AssetMeta::new(id.as_str(), AssetKind::Char);
        meta.theme_id = Some(self.chars.theme_id(&xml));
        self.ugc.push(self.assets.meta_to_xml(&meta)?);
        self.archive.add(format!("{}.xml", pieces.join(".")), xml);
        Ok(Outcome::Resolved)
    }

    /// Read `lookup` from the theme tree and archive it under `archived`'s member name.
    fn add_theme_file(&mut self, lookup: &AssetReference, archived: &AssetReference) -> Outcome {
        let path = lookup.theme_path(&self.config.shared_content_root);
        match std::fs::read(&path) {
            Ok(bytes) => {
                self.archive.add(archived.member_name(), bytes);
                Outcome::Resolved
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    category = %archived.category,
                    error = %e,
                    "theme asset failed to load; eliding"
                );
                Outcome::Missing
            }
        }
    }

    fn downgrade(&mut self) -> XmlElement {
        self.mutated = true;
        XmlElement::placeholder()
    }

    fn finish(
        self,
        film: XmlElement,
        document: &[u8],
        thumbnail: Option<&[u8]>,
    ) -> MoviepackResult<MovieArchive> {
        let Self {
            config,
            mut archive,
            mut themes,
            ugc,
            mutated,
            ..
        } = self;

        themes.canonicalize();
        for theme_id in themes.manifest_ids() {
            let path = config.theme_manifest_path(theme_id);
            let bytes = std::fs::read(&path).map_err(|e| {
                MoviepackError::missing_asset(format!(
                    "theme manifest '{}': {e}",
                    path.display()
                ))
            })?;
            archive.add(format!("{theme_id}.xml"), bytes);
        }

        archive.add(THEMELIST_MEMBER, themes.to_theme_list(&config.xml_header)?);
        archive.add(UGC_MEMBER, ugc.finish(&config.xml_header));
        if let Some(thumbnail) = thumbnail {
            archive.add(THUMBNAIL_MEMBER, thumbnail.to_vec());
        }
        let movie = if mutated {
            film.to_document(&config.xml_header)?
        } else {
            document.to_vec()
        };
        archive.add(MOVIE_MEMBER, movie);

        tracing::debug!(
            members = archive.len(),
            themes = themes.ids().len(),
            user_assets = ugc.len(),
            mutated,
            "movie packed"
        );
        Ok(archive)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/archive/pack.rs"]
mod tests;
