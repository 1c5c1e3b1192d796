use super::*;

#[test]
fn add_replaces_in_place() {
    let mut a = MovieArchive::new();
    a.add("a", vec![1]);
    a.add("b", vec![2]);
    a.add("a", vec![3]);
    assert_eq!(a.names().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(a.get("a"), Some(&[3u8][..]));
    assert_eq!(a.len(), 2);
}

#[test]
fn zip_preserves_members_and_order() {
    let mut a = MovieArchive::new();
    a.add("family.prop.sofa.swf", b"swf".to_vec());
    a.add(MOVIE_MEMBER, b"<film/>".to_vec());
    a.add(THUMBNAIL_MEMBER, Vec::new());

    let back = MovieArchive::from_zip(&a.to_zip().unwrap()).unwrap();
    assert_eq!(back, a);
}

#[test]
fn require_reports_corruption() {
    let a = MovieArchive::new();
    let err = a.require(UGC_MEMBER).unwrap_err();
    assert!(matches!(err, MoviepackError::CorruptArchive(_)));
    assert!(err.to_string().contains("ugc.xml"));
}

#[test]
fn garbage_is_not_an_archive() {
    let err = MovieArchive::from_zip(b"definitely not a zip").unwrap_err();
    assert!(matches!(err, MoviepackError::CorruptArchive(_)));
}
