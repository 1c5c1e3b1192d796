use super::*;

#[test]
fn theme_id_reads_root_attribute() {
    assert_eq!(
        char_theme_id(br#"<cc_char theme_id="anime"><head/></cc_char>"#),
        "anime"
    );
}

#[test]
fn theme_id_falls_back_to_family() {
    assert_eq!(char_theme_id(b"<cc_char/>"), DEFAULT_CHAR_THEME);
    assert_eq!(char_theme_id(br#"<cc_char theme_id=""/>"#), DEFAULT_CHAR_THEME);
    assert_eq!(char_theme_id(b"not xml"), DEFAULT_CHAR_THEME);
}

#[test]
fn meta_json_uses_type_key_and_skips_unset_fields() {
    let meta = AssetMeta::new("a.mp3", AssetKind::Sound).with_subtype("bgmusic");
    let json = serde_json::to_value(&meta).unwrap();
    assert_eq!(json["type"], "sound");
    assert_eq!(json["subtype"], "bgmusic");
    assert!(json.get("width").is_none());

    let back: AssetMeta = serde_json::from_value(json).unwrap();
    assert_eq!(back, meta);
}
