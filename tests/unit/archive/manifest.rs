use super::*;

#[test]
fn finish_wraps_entries_in_ugc_theme() {
    let mut m = UgcManifest::new();
    assert!(m.is_empty());
    m.push("<a/>".to_string());
    m.push("<b/>".to_string());
    assert_eq!(m.len(), 2);
    assert_eq!(
        String::from_utf8(m.finish("<?xml?>")).unwrap(),
        r#"<?xml?><theme id="ugc" name="ugc"><a/><b/></theme>"#
    );
}

#[test]
fn background_entry_carries_id_and_name() {
    let meta = AssetMeta::new("bg1.swf", AssetKind::Bg).with_title("Beach & Sun");
    let el = manifest_entry(&meta);
    assert_eq!(el.name, "background");
    assert_eq!(el.attr("id"), Some("bg1.swf"));
    assert_eq!(el.attr("name"), Some("Beach & Sun"));
    assert_eq!(el.attr("subtype"), Some("0"));
    assert!(el.to_fragment().unwrap().contains("Beach &amp; Sun"));
}

#[test]
fn prop_entry_flags_placement() {
    let mut meta = AssetMeta::new("hat.swf", AssetKind::Prop).with_subtype("0");
    meta.ptype = Some(PropPlacement::Wearable);
    let el = manifest_entry(&meta);
    assert_eq!(el.attr("wearable"), Some("1"));
    assert_eq!(el.attr("holdable"), Some("0"));
    assert_eq!(el.attr("placeable"), Some("0"));
}

#[test]
fn video_entry_has_dimensions_and_thumbnail() {
    let mut meta = AssetMeta::new("clip.mp4", AssetKind::Prop).with_subtype("video");
    meta.width = Some(640);
    meta.height = Some(360);
    let el = manifest_entry(&meta);
    assert_eq!(el.attr("subtype"), Some("video"));
    assert_eq!(el.attr("width"), Some("640"));
    assert_eq!(el.attr("height"), Some("360"));
    assert_eq!(el.attr("thumbnail_url"), Some("/assets/clip.png"));
}

#[test]
fn sound_and_char_entries() {
    let mut sound = AssetMeta::new("s.mp3", AssetKind::Sound).with_subtype("voiceover");
    sound.duration = Some(1500.0);
    let el = manifest_entry(&sound);
    assert_eq!(el.name, "sound");
    assert_eq!(el.attr("subtype"), Some("voiceover"));
    assert_eq!(el.attr("duration"), Some("1500"));

    let mut ch = AssetMeta::new("c1", AssetKind::Char);
    ch.theme_id = Some("anime".to_string());
    let el = manifest_entry(&ch);
    assert_eq!(el.name, "char");
    assert_eq!(el.attr("cc_theme_id"), Some("anime"));
    assert_eq!(el.attr("name"), Some("Untitled"));
}
