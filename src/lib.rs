//! Storyweave composes component stories and renders them incrementally.
//!
//! A story is a render function plus annotations. Annotations are layered (global, fixture,
//! story) and the result is a [`ComposedStory`] that can be called any number of times to
//! produce a [`RenderDescriptor`]. A [`MountPoint`] then decides per render whether the live
//! tree can be reused, pushing new props through its [`PropChannel`], or whether a
//! [`TreeBuilder`] has to build a fresh one.
//!
//! - Describe annotations with [`GlobalAnnotations`], [`FixtureAnnotations`] and [`Story`]
//! - Compose with [`Composer`] (or [`compose_story`] / [`compose_stories`])
//! - Mount with [`MountPoint`] or one-shot [`build_mountable_tree`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Annotation model and layering rules.
pub mod annotations;
/// Story composition.
pub mod compose;
/// Incremental mounting of render descriptors.
pub mod mount;
/// Render descriptors and decorators.
pub mod render;

pub use crate::foundation::error::{StoryError, StoryResult};
pub use crate::foundation::value::{
    Action, ArgValue, Args, Globals, Parameters, Props, args,
};

pub use crate::annotations::layering::{
    EffectiveConfig, combine_global_annotations, combine_parameters, derive_globals,
    layer_annotations, merge_args,
};
pub use crate::annotations::model::{
    ArgType, ArgTypes, Export, FixtureAnnotations, GlobalAnnotations, Story, StoryModule,
};
pub use crate::compose::composer::{
    ComposedStory, Composer, compose_stories, compose_story, global_annotations,
    set_global_annotations,
};
pub use crate::compose::naming::{is_export_story, sanitize, story_name_from_export, to_id};
pub use crate::mount::builder::{
    BuildRequest, MountableTree, StandaloneTreeBuilder, TreeBuilder, assemble_tree,
    target_selector,
};
pub use crate::mount::channel::{PropChannel, PropObserver, Subscription};
pub use crate::mount::diff::{Decision, RebuildReason, RendererState};
pub use crate::mount::host::MountedStory;
pub use crate::mount::mount_point::{
    MountPoint, RenderOutcome, WRAPPER_STORY_ID, build_mountable_tree,
};
pub use crate::render::decorator::{Decorator, DecoratorChain, Next, RenderContext, RenderFn};
pub use crate::render::descriptor::{
    ApplicationConfig, ComponentRef, ModuleMetadata, ModuleRef, Provider, RenderDescriptor,
    STORY_PROPS_TOKEN,
};
pub use crate::render::template::template_from_component;
