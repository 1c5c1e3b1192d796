use std::path::Path;

use super::*;

#[test]
fn decode_splits_theme_id_and_extension() {
    let r = decode("family.bedroom.sofa.swf", AssetCategory::Prop).unwrap();
    assert_eq!(r.theme_id, "family");
    assert_eq!(r.category, AssetCategory::Prop);
    assert_eq!(r.id, "bedroom.sofa");
    assert_eq!(r.extension, "swf");
    assert!(!r.is_ugc());
}

#[test]
fn encode_inverts_decode() {
    let refs = [
        AssetReference {
            theme_id: "ugc".to_string(),
            category: AssetCategory::Sound,
            id: "a1b2c3".to_string(),
            extension: "mp3".to_string(),
        },
        AssetReference {
            theme_id: "family".to_string(),
            category: AssetCategory::Char,
            id: "alice.walk".to_string(),
            extension: "swf".to_string(),
        },
        AssetReference {
            theme_id: "common".to_string(),
            category: AssetCategory::Bg,
            id: String::new(),
            extension: "swf".to_string(),
        },
    ];
    for r in refs {
        assert_eq!(decode(&encode(&r), r.category).unwrap(), r);
    }
}

#[test]
fn fewer_than_two_segments_is_malformed() {
    for bad in ["", "nodots", "  "] {
        let err = decode(bad, AssetCategory::Bg).unwrap_err();
        assert!(matches!(err, MoviepackError::MalformedReference(_)));
    }
}

#[test]
fn member_name_inserts_category() {
    let r = decode("ugc.a1b2c3.mp3", AssetCategory::Sound).unwrap();
    assert_eq!(r.member_name(), "ugc.sound.a1b2c3.mp3");
    assert_eq!(r.ugc_id(), "a1b2c3.mp3");
    assert_eq!(r.file_name(), "a1b2c3.mp3");

    let r = decode("family.alice.walk.swf", AssetCategory::Char).unwrap();
    assert_eq!(r.pieces(), ["family", "char", "alice", "walk.swf"]);
    assert_eq!(r.member_name(), "family.char.alice.walk.swf");
}

#[test]
fn theme_path_nests_pieces() {
    let r = decode("family.alice.walk.swf", AssetCategory::Char).unwrap();
    assert_eq!(
        r.theme_path(Path::new("/store")),
        Path::new("/store/family/char/alice/walk.swf")
    );
}

#[test]
fn head_piece_detection_is_exact() {
    let r = decode("family.head.hat01.swf", AssetCategory::Prop).unwrap();
    assert!(r.has_piece("head"));
    let r = decode("family.headband.swf", AssetCategory::Prop).unwrap();
    assert!(!r.has_piece("head"));
}

#[test]
fn category_parses_and_displays() {
    for c in [
        AssetCategory::Bg,
        AssetCategory::Effect,
        AssetCategory::Prop,
        AssetCategory::Char,
        AssetCategory::Sound,
        AssetCategory::Action,
        AssetCategory::Head,
    ] {
        assert_eq!(c.to_string().parse::<AssetCategory>().unwrap(), c);
    }
    assert!("effectAsset".parse::<AssetCategory>().is_err());
}

#[test]
fn video_thumbnail_replaces_extension() {
    assert_eq!(video_thumbnail_id("clip01.mp4"), "clip01.png");
    assert_eq!(video_thumbnail_id("ab"), "png");
}
