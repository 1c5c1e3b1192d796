use std::path::PathBuf;

use super::*;

#[test]
fn json_defaults_fill_optional_fields() {
    let cfg: CodecConfig = serde_json::from_str(
        r#"{ "sharedContentRoot": "/srv/store", "userContentRoot": "/srv/user" }"#,
    )
    .unwrap();
    assert_eq!(cfg.shared_content_root, PathBuf::from("/srv/store"));
    assert_eq!(cfg.user_content_root, PathBuf::from("/srv/user"));
    assert_eq!(cfg.xml_header, DEFAULT_XML_HEADER);
    assert!(cfg.client_root.is_none());
    assert!(cfg.always_include_themes.is_empty());
}

#[test]
fn font_dir_prefers_client_root() {
    let cfg = CodecConfig::new("/store", "/user");
    assert_eq!(cfg.font_dir(), PathBuf::from("/store/go/font"));

    let cfg = cfg.with_client_root("/client");
    assert_eq!(cfg.font_dir(), PathBuf::from("/client/go/font"));
}

#[test]
fn theme_manifest_lives_in_theme_folder() {
    let cfg = CodecConfig::new("/store", "/user");
    assert_eq!(
        cfg.theme_manifest_path("family"),
        PathBuf::from("/store/family/theme.xml")
    );
}
