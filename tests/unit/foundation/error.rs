use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StoryError::invalid_story("x")
            .to_string()
            .contains("invalid story format:")
    );
    assert!(
        StoryError::legacy_args("x")
            .to_string()
            .contains("legacy stories unsupported:")
    );
    assert!(
        StoryError::missing_tree("x")
            .to_string()
            .contains("mount error:")
    );
    assert!(
        StoryError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        StoryError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StoryError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
