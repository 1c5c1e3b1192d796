use std::path::{Path, PathBuf};

use super::*;
use crate::storage::memory::{InMemoryAssets, InMemoryCharacters};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "moviepack_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write(root: &Path, rel: &str, bytes: &[u8]) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, bytes).unwrap();
}

#[test]
fn scene_handlers_normalize_effect_asset() {
    assert_eq!(
        scene_handler("effectAsset"),
        Some(SceneHandler::Asset(AssetCategory::Effect))
    );
    assert_eq!(
        scene_handler("effect"),
        Some(SceneHandler::Asset(AssetCategory::Effect))
    );
    assert_eq!(scene_handler("trans"), Some(SceneHandler::Passthrough));
    assert_eq!(scene_handler("char"), Some(SceneHandler::Character));
    assert_eq!(scene_handler("camera"), None);
}

#[test]
fn empty_document_is_rejected() {
    let cfg = CodecConfig::new("/nonexistent", "/nonexistent");
    let err = pack_document(
        &cfg,
        &InMemoryAssets::new(),
        &InMemoryCharacters::new(),
        b"",
        Some(b"png"),
    )
    .unwrap_err();
    assert!(matches!(err, MoviepackError::EmptyDocument));
}

#[test]
fn user_asset_without_record_aborts() {
    let cfg = CodecConfig::new("/nonexistent", "/nonexistent");
    let mut assets = InMemoryAssets::new();
    assets.insert_payload("a1.mp3", b"mp3".to_vec());
    let doc = b"<film><sound><sfile>ugc.a1.mp3</sfile></sound></film>";
    let err = pack_document(&cfg, &assets, &InMemoryCharacters::new(), doc, None).unwrap_err();
    assert!(matches!(err, MoviepackError::MissingAsset(_)), "{err}");
}

#[test]
fn unreadable_user_asset_becomes_placeholder() {
    let cfg = CodecConfig::new("/nonexistent", "/nonexistent");
    let doc = b"<film><sound><sfile>ugc.gone.mp3</sfile></sound><sound/></film>";
    let archive = pack_document(
        &cfg,
        &InMemoryAssets::new(),
        &InMemoryCharacters::new(),
        doc,
        None,
    )
    .unwrap();

    let film = XmlElement::parse(archive.get(MOVIE_MEMBER).unwrap()).unwrap();
    let kids: Vec<&XmlElement> = film.elements().collect();
    assert_eq!(kids.len(), 2);
    assert!(kids[0].is_placeholder());
    assert_eq!(kids[1].name, "sound");
}

#[test]
fn headgear_is_read_from_char_tree_but_archived_as_prop() {
    let root = temp_dir("pack_headgear");
    write(&root, "family/char/head/hat.swf", b"hat");
    write(&root, "custom/theme.xml", b"<theme id=\"custom\"/>");
    let cfg = CodecConfig::new(&root, root.join("user"));

    let doc = b"<film><scene id=\"s1\"><prop><file>family.head.hat.swf</file></prop></scene></film>";
    let archive = pack_document(
        &cfg,
        &InMemoryAssets::new(),
        &InMemoryCharacters::new(),
        doc,
        None,
    )
    .unwrap();

    assert_eq!(archive.get("family.prop.head.hat.swf"), Some(&b"hat"[..]));
    assert!(archive.contains("custom.xml"));
    assert!(!archive.contains("family.xml"));
    // nothing was elided, so the original bytes are kept verbatim
    assert_eq!(archive.get(MOVIE_MEMBER), Some(&doc[..]));

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn seeded_themes_come_first() {
    let root = temp_dir("pack_seeded");
    write(&root, "common/theme.xml", b"<theme id=\"common\"/>");
    write(&root, "anime/theme.xml", b"<theme id=\"anime\"/>");
    write(&root, "anime/bg/park.swf", b"park");
    let cfg = CodecConfig::new(&root, root.join("user")).with_always_include_themes(["common"]);

    let doc = b"<film><scene><bg><file>anime.park.swf</file></bg></scene></film>";
    let archive = pack_document(
        &cfg,
        &InMemoryAssets::new(),
        &InMemoryCharacters::new(),
        doc,
        None,
    )
    .unwrap();

    let list = crate::archive::themes::parse_theme_list(archive.get(THEMELIST_MEMBER).unwrap())
        .unwrap();
    assert_eq!(list, ["common", "anime"]);
    assert!(archive.contains("anime.bg.park.swf"));

    std::fs::remove_dir_all(&root).ok();
}

fn scene_children(archive: &MovieArchive) -> Vec<XmlElement> {
    let film = XmlElement::parse(archive.get(MOVIE_MEMBER).unwrap()).unwrap();
    film.child("scene").unwrap().elements().cloned().collect()
}

#[test]
fn char_part_failure_downgrades_only_that_part() {
    let root = temp_dir("pack_char_part");
    write(&root, "anime/theme.xml", b"<theme id=\"anime\"/>");
    write(&root, "anime/char/c/walk.swf", b"walk");
    write(&root, "anime/char/heads/smile.swf", b"smile");
    let cfg = CodecConfig::new(&root, root.join("user"));

    let doc = br#"<film><scene><char><action>anime.c.walk.swf</action><prop><file>anime.cup.swf</file></prop><head><file>anime.heads.smile.png</file></head></char><bg/></scene></film>"#;
    let archive = pack_document(
        &cfg,
        &InMemoryAssets::new(),
        &InMemoryCharacters::new(),
        doc,
        None,
    )
    .unwrap();

    let kids = scene_children(&archive);
    let names: Vec<&str> = kids.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["char", "bg"]);
    let parts: Vec<&str> = kids[0].elements().map(|e| e.name.as_str()).collect();
    assert_eq!(parts, ["action", "ELEMENT", "head"]);
    assert!(archive.contains("anime.char.c.walk.swf"));
    assert!(archive.contains("anime.prop.heads.smile.swf"));

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn user_heads_are_skipped() {
    let root = temp_dir("pack_user_head");
    write(&root, "anime/theme.xml", b"<theme id=\"anime\"/>");
    write(&root, "anime/char/c/walk.swf", b"walk");
    let cfg = CodecConfig::new(&root, root.join("user"));

    let doc = br#"<film><scene><char><action>anime.c.walk.swf</action><head><file>ugc.h1.png</file></head></char></scene></film>"#;
    let archive = pack_document(
        &cfg,
        &InMemoryAssets::new(),
        &InMemoryCharacters::new(),
        doc,
        None,
    )
    .unwrap();

    assert_eq!(archive.get(MOVIE_MEMBER), Some(&doc[..]));
    assert!(!archive.names().any(|n| n.contains("h1")));
    let list = crate::archive::themes::parse_theme_list(archive.get(THEMELIST_MEMBER).unwrap())
        .unwrap();
    assert_eq!(list, ["anime"]);

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn arial_bubble_adds_no_font() {
    let cfg = CodecConfig::new("/nonexistent", "/nonexistent");
    let doc = br#"<film><scene><bubbleAsset><bubble><text font="Arial">hi</text></bubble></bubbleAsset></scene></film>"#;
    let archive = pack_document(
        &cfg,
        &InMemoryAssets::new(),
        &InMemoryCharacters::new(),
        doc,
        None,
    )
    .unwrap();
    assert!(!archive.names().any(|n| n.starts_with("FontFile")));
    assert_eq!(archive.get(MOVIE_MEMBER), Some(&doc[..]));
}

#[test]
fn unreadable_bundled_font_aborts() {
    let cfg = CodecConfig::new("/nonexistent", "/nonexistent");
    let doc = br#"<film><scene><bubbleAsset><bubble><text font="Honey Script">hi</text></bubble></bubbleAsset></scene></film>"#;
    let err = pack_document(
        &cfg,
        &InMemoryAssets::new(),
        &InMemoryCharacters::new(),
        doc,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, MoviepackError::MissingAsset(_)), "{err}");
    assert!(err.to_string().contains("FontFileHoney.swf"));
}

#[test]
fn missing_user_character_is_elided() {
    let cfg = CodecConfig::new("/nonexistent", "/nonexistent");
    let doc = br#"<film><scene><char><action>ugc.c9.idle.xml</action></char><trans/></scene></film>"#;
    let archive = pack_document(
        &cfg,
        &InMemoryAssets::new(),
        &InMemoryCharacters::new(),
        doc,
        None,
    )
    .unwrap();

    let kids = scene_children(&archive);
    assert!(kids[0].is_placeholder());
    assert_eq!(kids[1].name, "trans");
    let ugc = XmlElement::parse(archive.get(UGC_MEMBER).unwrap()).unwrap();
    assert_eq!(ugc.elements().count(), 0);
    assert!(!archive.contains("ugc.char.c9.xml"));
}
