use super::*;

#[test]
fn export_names_become_start_case() {
    assert_eq!(story_name_from_export("primaryButton"), "Primary Button");
    assert_eq!(story_name_from_export("Primary"), "Primary");
    assert_eq!(story_name_from_export("with_long_label"), "With Long Label");
    assert_eq!(story_name_from_export("HTMLButton"), "HTML Button");
    assert_eq!(story_name_from_export("size2xl"), "Size 2 Xl");
}

#[test]
fn ids_are_sanitized_and_joined() {
    assert_eq!(to_id("Example/Button", "Primary"), "example-button--primary");
    assert_eq!(to_id("NGRX/MyCounter", "With  Signal!"), "ngrx-mycounter--with-signal");
    assert_eq!(to_id("", "Primary"), "primary");
    assert_eq!(sanitize("--a__b--"), "a-b");
}

#[test]
fn module_markers_are_never_stories() {
    let fixture = FixtureAnnotations::default();
    assert!(!is_export_story("default", &fixture));
    assert!(!is_export_story("__esModule", &fixture));
    assert!(is_export_story("Primary", &fixture));
}

#[test]
fn include_and_exclude_lists_filter_exports() {
    let fixture = FixtureAnnotations::default()
        .include_stories(["Primary", "mockData"])
        .exclude_stories(["mockData"]);
    assert!(is_export_story("Primary", &fixture));
    assert!(!is_export_story("Secondary", &fixture));
    assert!(!is_export_story("mockData", &fixture));
}
