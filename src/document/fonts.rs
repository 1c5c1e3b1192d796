/// Font that ships with the player and never needs a bundled resource.
pub const BUILTIN_FONT: &str = "Arial";

const FONT_FILES: &[(&str, &str)] = &[
    ("Blambot Casual", "FontFileCasual"),
    ("BadaBoom BB", "FontFileBoom"),
    ("Entrails BB", "FontFileEntrails"),
    ("Tokyo Robot Intl BB", "FontFileTokyo"),
    ("Accidental Presidency", "FontFileAccidental"),
    ("Budmo Jiggler", "FontFileBJiggler"),
    ("Budmo Jigglish", "FontFileBJigglish"),
    ("Existence Light", "FontFileExistence"),
    ("HeartlandRegular", "FontFileHeartland"),
    ("Honey Script", "FontFileHoney"),
    ("I hate Comic Sans", "FontFileIHate"),
    ("loco tv", "FontFileLocotv"),
    ("Mail Ray Stuff", "FontFileMailRay"),
    ("Mia's Scribblings ~", "FontFileMia"),
    ("Coming Soon", "FontFileCSoon"),
    ("Lilita One", "FontFileLOne"),
    ("Telex Regular", "FontFileTelex"),
];

/// Map a font name to its bundled resource id.
///
/// Unknown names map to `FontFile` followed by the name with all whitespace removed. An empty
/// name maps to the empty string: no resource is needed.
pub fn resolve_font(font_name: &str) -> String {
    if font_name.is_empty() {
        return String::new();
    }
    if let Some((_, file)) = FONT_FILES.iter().find(|(name, _)| *name == font_name) {
        return (*file).to_string();
    }
    let compact: String = font_name.chars().filter(|c| !c.is_whitespace()).collect();
    format!("FontFile{compact}")
}

/// Archive member / file name of a bundled font resource.
pub fn font_file_name(resource_id: &str) -> String {
    format!("{resource_id}.swf")
}

#[cfg(test)]
#[path = "../../tests/unit/document/fonts.rs"]
mod tests;
