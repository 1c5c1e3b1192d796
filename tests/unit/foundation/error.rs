use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert_eq!(MoviepackError::EmptyDocument.to_string(), "empty document");
    assert!(
        MoviepackError::malformed_reference("x")
            .to_string()
            .contains("malformed reference:")
    );
    assert!(
        MoviepackError::missing_asset("x")
            .to_string()
            .contains("missing asset:")
    );
    assert!(
        MoviepackError::corrupt_archive("x")
            .to_string()
            .contains("corrupt archive:")
    );
    assert!(
        MoviepackError::malformed_xml("x")
            .to_string()
            .contains("malformed xml:")
    );
}

#[test]
fn not_found_classification() {
    assert!(MoviepackError::missing_asset("a").is_not_found());
    assert!(MoviepackError::corrupt_archive("a").is_not_found());
    assert!(!MoviepackError::EmptyDocument.is_not_found());
    assert!(!MoviepackError::malformed_xml("a").is_not_found());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MoviepackError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
