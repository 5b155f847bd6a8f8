use super::*;
use crate::foundation::value::{Props, args};
use crate::render::descriptor::{ComponentRef, ModuleMetadata, Provider};

fn live_state() -> RendererState {
    let mut st = RendererState::new("story");
    assert_eq!(
        st.decide(&descriptor(), true),
        Decision::Rebuild(RebuildReason::FirstRender)
    );
    st.replace_channel(PropChannel::new(Props::new()));
    st.mark_built();
    st
}

fn descriptor() -> RenderDescriptor {
    RenderDescriptor::default()
        .component(ComponentRef::new("Button", "app-button"))
        .prop("label", "a")
}

#[test]
fn first_decision_is_always_a_rebuild() {
    let mut st = RendererState::new("story");
    assert!(st.is_first_render());
    assert_eq!(
        st.decide(&descriptor(), true),
        Decision::Rebuild(RebuildReason::FirstRender)
    );
}

#[test]
fn repeated_first_render_until_build_completes() {
    let mut st = RendererState::new("story");
    st.decide(&descriptor(), true);
    assert_eq!(
        st.decide(&descriptor(), true),
        Decision::Rebuild(RebuildReason::FirstRender)
    );
}

#[test]
fn forced_identical_structure_is_reused() {
    let mut st = live_state();
    let next = descriptor().prop("label", "b");
    assert_eq!(st.decide(&next, true), Decision::Reuse);
    assert!(!st.is_first_render());
}

#[test]
fn unforced_always_rebuilds() {
    let mut st = live_state();
    assert_eq!(
        st.decide(&descriptor(), false),
        Decision::Rebuild(RebuildReason::NotForced)
    );
}

#[test]
fn template_change_rebuilds_even_when_forced() {
    let mut st = live_state();
    st.decide(&descriptor().template("<a></a>"), true);
    assert_eq!(
        st.decide(&descriptor().template("<b></b>"), true),
        Decision::Rebuild(RebuildReason::TemplateChanged)
    );
    // Comparison is against the latest snapshot, not the first.
    assert_eq!(
        st.decide(&descriptor().template("<b></b>"), true),
        Decision::Reuse
    );
}

#[test]
fn dropping_a_template_is_not_a_template_change() {
    let mut st = live_state();
    st.decide(&descriptor().template("<a></a>"), true);
    assert_eq!(st.decide(&descriptor(), true), Decision::Reuse);
}

#[test]
fn metadata_changes_rebuild() {
    let mut st = live_state();
    let with_meta = descriptor().module_metadata(ModuleMetadata {
        declarations: vec![ComponentRef::new("Icon", "app-icon")],
        ..ModuleMetadata::default()
    });
    assert_eq!(
        st.decide(&with_meta, true),
        Decision::Rebuild(RebuildReason::ModuleMetadataChanged)
    );

    let with_app = with_meta
        .clone()
        .application_providers([Provider::token("Store")]);
    assert_eq!(
        st.decide(&with_app, true),
        Decision::Rebuild(RebuildReason::ApplicationConfigChanged)
    );
    assert_eq!(st.decide(&with_app, true), Decision::Reuse);
}

#[test]
fn replacing_channel_completes_previous_one() {
    let mut st = live_state();
    let old = st.channel().unwrap().clone();
    st.replace_channel(PropChannel::new(args([("label", "new")])));
    assert!(old.is_closed());
    assert!(!st.channel().unwrap().is_closed());
    st.complete();
    st.complete();
    assert!(st.channel().unwrap().is_closed());
}
