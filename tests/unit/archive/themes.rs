use super::*;

#[test]
fn insert_keeps_first_seen_order() {
    let mut set = ThemeSet::new();
    for t in ["common", "ugc", "common", "anime", "ugc"] {
        set.insert(t);
    }
    assert_eq!(set.ids(), ["common", "ugc", "anime"]);
    assert_eq!(set.manifest_ids().collect::<Vec<_>>(), ["common", "anime"]);
}

#[test]
fn family_becomes_custom() {
    let mut set = ThemeSet::new();
    set.insert("family");
    set.canonicalize();
    assert_eq!(set.ids(), ["custom"]);
}

#[test]
fn aliases_merge_into_existing_targets() {
    let mut set = ThemeSet::new();
    for t in ["action", "cc2", "family", "common"] {
        set.insert(t);
    }
    set.canonicalize();
    assert_eq!(set.ids(), ["action", "common", "custom"]);
}

#[test]
fn theme_list_round_trips_through_xml() {
    let mut set = ThemeSet::new();
    set.insert("common");
    set.insert("ugc");
    let xml = set.to_theme_list(r#"<?xml version="1.0"?>"#).unwrap();
    assert_eq!(
        String::from_utf8(xml.clone()).unwrap(),
        r#"<?xml version="1.0"?><themes><theme>common</theme><theme>ugc</theme></themes>"#
    );
    assert_eq!(parse_theme_list(&xml).unwrap(), ["common", "ugc"]);
}

#[test]
fn empty_theme_list_is_self_closing() {
    let xml = ThemeSet::new().to_theme_list("").unwrap();
    assert_eq!(xml, b"<themes/>");
}
