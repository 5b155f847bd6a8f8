use super::*;
use crate::foundation::value::{Props, args};
use crate::render::descriptor::{ModuleMetadata, ModuleRef};
use std::sync::{Arc, Mutex};

fn button() -> ComponentRef {
    ComponentRef::new("ButtonComponent", "app-button").input("label")
}

fn descriptor(label: &str) -> RenderDescriptor {
    RenderDescriptor::default().prop("label", label)
}

fn mount() -> MountPoint<StandaloneTreeBuilder> {
    MountPoint::new("example-button--primary", StandaloneTreeBuilder::new())
        .with_component(button())
}

#[test]
fn first_render_builds_a_tree() {
    let mut mp = mount();
    let tree = mp.render(&descriptor("a"), true).unwrap().into_tree().unwrap();
    assert_eq!(tree.component, Some(button()));
    assert_eq!(tree.wrapper.selector, "example-button--primary");
    assert_eq!(tree.props.current()["label"].as_str(), Some("a"));
    assert!(!mp.state().is_first_render());
    assert!(mp.channel().unwrap().same_channel(&tree.props));
}

#[test]
fn forced_identical_render_reuses_and_pushes_props() {
    let mut mp = mount();
    let tree = mp.render(&descriptor("a"), true).unwrap().into_tree().unwrap();
    let outcome = mp.render(&descriptor("b"), true).unwrap();
    assert!(matches!(outcome, RenderOutcome::Reused));
    assert_eq!(mp.builder().build_count(), 1);
    assert_eq!(tree.props.current()["label"].as_str(), Some("b"));
}

#[test]
fn template_change_rebuilds_even_when_forced() {
    let mut mp = mount();
    mp.render(&descriptor("a").template("<x></x>"), true).unwrap();
    let outcome = mp.render(&descriptor("a").template("<y></y>"), true).unwrap();
    assert!(matches!(outcome, RenderOutcome::Rebuilt(_)));
    assert_eq!(mp.builder().build_count(), 2);
}

#[test]
fn unforced_render_always_rebuilds() {
    let mut mp = mount();
    mp.render(&descriptor("a"), false).unwrap();
    assert!(matches!(
        mp.render(&descriptor("a"), false).unwrap(),
        RenderOutcome::Rebuilt(_)
    ));
    assert_eq!(mp.builder().build_count(), 2);
}

#[test]
fn rebuild_completes_previous_channel_and_new_one_receives_reuse_pushes() {
    let mut mp = mount();
    let first = mp.render(&descriptor("a"), true).unwrap().into_tree().unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let _sub = first
        .props
        .subscribe(move |p: &Props| sink.lock().unwrap().push(p.clone()));

    let meta = ModuleMetadata {
        imports: vec![ModuleRef::new("Forms")],
        ..ModuleMetadata::default()
    };
    let second = mp
        .render(&descriptor("b").module_metadata(meta.clone()), true)
        .unwrap()
        .into_tree()
        .unwrap();
    assert!(first.props.is_closed());
    assert!(!second.props.is_closed());

    mp.render(&descriptor("c").module_metadata(meta), true).unwrap();
    assert_eq!(second.props.current()["label"].as_str(), Some("c"));
    assert_eq!(first.props.current()["label"].as_str(), Some("a"));
    // Only the replayed seed reached the old subscriber.
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn teardown_completes_channel_and_drops_later_pushes() {
    let mut mp = mount();
    let tree = mp.render(&descriptor("a"), true).unwrap().into_tree().unwrap();
    mp.teardown();
    mp.teardown();
    assert!(tree.props.is_closed());
    mp.render(&descriptor("b"), true).unwrap();
    assert_eq!(tree.props.current()["label"].as_str(), Some("a"));
}

struct NoTree;

impl TreeBuilder for NoTree {
    type Tree = ();

    fn build(&mut self, _: BuildRequest<'_>) -> StoryResult<Option<()>> {
        Ok(None)
    }
}

#[test]
fn missing_initial_tree_is_fatal() {
    let mut mp = MountPoint::new("story", NoTree);
    let err = mp.render(&descriptor("a"), true).unwrap_err();
    assert!(matches!(err, StoryError::MissingTree(_)));
    assert!(err.to_string().contains("must initially have module/tree"));
    assert!(mp.state().is_first_render());
    assert!(mp.channel().is_none());
}

struct Recording(Vec<BuildSeen>);

#[derive(Clone, Debug, PartialEq)]
struct BuildSeen {
    selector: String,
    declarations: usize,
}

impl TreeBuilder for Recording {
    type Tree = ();

    fn build(&mut self, request: BuildRequest<'_>) -> StoryResult<Option<()>> {
        self.0.push(BuildSeen {
            selector: request.target_selector.to_string(),
            declarations: request.metadata.declarations.len(),
        });
        Ok(Some(()))
    }
}

#[test]
fn custom_builder_is_called_once_per_rebuild_with_normalized_request() {
    let mut mp = MountPoint::new("Weird Id!", Recording(Vec::new()));
    mp.render(&descriptor("a"), true).unwrap();
    mp.render(&descriptor("b"), true).unwrap();
    mp.render(&descriptor("c"), false).unwrap();
    assert_eq!(
        mp.builder().0,
        vec![
            BuildSeen {
                selector: "sb-WeirdId-component".into(),
                declarations: 0
            };
            2
        ]
    );
}

#[test]
fn build_mountable_tree_uses_explicit_component() {
    let tree = build_mountable_tree(&descriptor("Go"), Some(&button())).unwrap();
    assert_eq!(tree.wrapper.selector, WRAPPER_STORY_ID);
    assert_eq!(tree.declarations, vec![button()]);
    assert_eq!(tree.template, r#"<app-button [label]="label"></app-button>"#);
    assert_eq!(tree.props.current(), args([("label", "Go")]));
}

struct Failing(Option<PropChannel>);

impl TreeBuilder for Failing {
    type Tree = ();

    fn build(&mut self, request: BuildRequest<'_>) -> StoryResult<Option<()>> {
        self.0 = Some(request.props);
        Err(StoryError::Other(anyhow::anyhow!("host bootstrap failed")))
    }
}

#[test]
fn builder_error_completes_the_fresh_channel() {
    let mut mp = MountPoint::new("story", Failing(None));
    let err = mp.render(&descriptor("a"), true).unwrap_err();
    assert!(err.to_string().contains("host bootstrap failed"));
    assert!(mp.builder().0.as_ref().unwrap().is_closed());
    assert!(mp.channel().is_none());
    assert!(mp.state().is_first_render());
}
