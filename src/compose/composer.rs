use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::{
    annotations::layering::{combine_global_annotations, layer_annotations, merge_args},
    annotations::model::{ArgTypes, Export, FixtureAnnotations, GlobalAnnotations, Story, StoryModule},
    compose::naming::{is_export_story, story_name_from_export, to_id},
    foundation::error::{StoryError, StoryResult},
    foundation::value::{Args, Globals, Parameters},
    render::decorator::{Decorator, DecoratorChain, RenderContext, RenderFn},
    render::descriptor::{ComponentRef, RenderDescriptor},
};

const PASS_ARGS_FIRST: &str = "passArgsFirst";

static GLOBAL_ANNOTATIONS: RwLock<Option<Arc<GlobalAnnotations>>> = RwLock::new(None);

/// Install process-wide global annotations used by [`compose_story`] and [`compose_stories`].
///
/// Call once during test setup, before composing; several preview files can be installed
/// together with [`GlobalAnnotations::compose`]. Later calls replace earlier ones; stories
/// composed before the replacement keep what they captured.
pub fn set_global_annotations(global: GlobalAnnotations) {
    let mut slot = GLOBAL_ANNOTATIONS
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *slot = Some(Arc::new(global));
}

/// Currently installed process-wide annotations, or empty ones.
pub fn global_annotations() -> Arc<GlobalAnnotations> {
    let slot = GLOBAL_ANNOTATIONS
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    slot.clone().unwrap_or_default()
}

/// Compose one story against its fixture and global annotations.
///
/// Explicit `global` annotations layer on top of the process-wide ones (see
/// [`set_global_annotations`]).
pub fn compose_story(
    story: impl Into<Export>,
    fixture: &FixtureAnnotations,
    global: Option<&GlobalAnnotations>,
) -> StoryResult<ComposedStory> {
    composer_for(global).compose_story(story, fixture)
}

/// Compose every story export of `module`, keyed by export name.
pub fn compose_stories(
    module: &StoryModule,
    global: Option<&GlobalAnnotations>,
) -> StoryResult<BTreeMap<String, ComposedStory>> {
    composer_for(global).compose_stories(module)
}

fn composer_for(global: Option<&GlobalAnnotations>) -> Composer {
    let installed = global_annotations();
    match global {
        Some(g) => Composer::new(combine_global_annotations([installed.as_ref(), g])),
        None => Composer::from_shared(installed),
    }
}

/// Composes stories against one fixed set of global annotations.
///
/// Unlike the free functions, a composer never consults the process-wide annotations.
#[derive(Clone, Debug, Default)]
pub struct Composer {
    global: Arc<GlobalAnnotations>,
}

impl Composer {
    /// Composer owning `global`.
    pub fn new(global: GlobalAnnotations) -> Self {
        Self::from_shared(Arc::new(global))
    }

    /// Composer sharing already-wrapped annotations.
    pub fn from_shared(global: Arc<GlobalAnnotations>) -> Self {
        Self { global }
    }

    /// The global annotations stories are composed against.
    pub fn global(&self) -> &GlobalAnnotations {
        &self.global
    }

    /// Compose one story with empty identity fields.
    pub fn compose_story(
        &self,
        story: impl Into<Export>,
        fixture: &FixtureAnnotations,
    ) -> StoryResult<ComposedStory> {
        self.compose(None, story.into(), fixture)
    }

    /// Compose one story exported as `export_name`, deriving its id and display name.
    pub fn compose_named(
        &self,
        export_name: &str,
        story: impl Into<Export>,
        fixture: &FixtureAnnotations,
    ) -> StoryResult<ComposedStory> {
        self.compose(Some(export_name), story.into(), fixture)
    }

    /// Compose every story export of `module`.
    ///
    /// Module markers and names filtered by the fixture are skipped; any other non-story export
    /// fails the whole call.
    #[tracing::instrument(skip_all, fields(title = module.default.title.as_deref().unwrap_or("")))]
    pub fn compose_stories(
        &self,
        module: &StoryModule,
    ) -> StoryResult<BTreeMap<String, ComposedStory>> {
        let mut out = BTreeMap::new();
        for (name, export) in &module.exports {
            if !is_export_story(name, &module.default) {
                continue;
            }
            let composed = self.compose(Some(name), export.clone(), &module.default)?;
            out.insert(name.clone(), composed);
        }
        Ok(out)
    }

    #[tracing::instrument(skip(self, export, fixture))]
    fn compose(
        &self,
        export_name: Option<&str>,
        export: Export,
        fixture: &FixtureAnnotations,
    ) -> StoryResult<ComposedStory> {
        let story = match export {
            Export::Story(s) => s,
            Export::Data(v) => {
                return Err(StoryError::invalid_story(format!(
                    "expected a story render function, got {}",
                    describe_value(&v)
                )));
            }
        };

        let cfg = layer_annotations(&story, fixture, &self.global);
        if cfg.parameters.get(PASS_ARGS_FIRST) == Some(&Value::Bool(false)) {
            return Err(StoryError::legacy_args(
                "stories must receive args as their first argument (passArgsFirst=false)",
            ));
        }

        let render = story
            .render
            .clone()
            .or_else(|| fixture.render.clone())
            .or_else(|| self.global.render.clone())
            .unwrap_or_else(RenderFn::args_as_props);
        let identity = StoryIdentity::new(&story, fixture, export_name);

        tracing::debug!(
            id = %identity.id,
            decorators = cfg.decorators.len(),
            args = cfg.args.len(),
            "composed story"
        );

        Ok(ComposedStory {
            chain: DecoratorChain::new(render, cfg.decorators),
            args: cfg.args,
            parameters: cfg.parameters,
            globals: cfg.globals,
            arg_types: cfg.arg_types,
            component: fixture.component.clone(),
            identity,
        })
    }
}

#[derive(Clone, Debug, Default)]
struct StoryIdentity {
    id: String,
    kind: String,
    name: String,
}

impl StoryIdentity {
    fn new(story: &Story, fixture: &FixtureAnnotations, export_name: Option<&str>) -> Self {
        let Some(export_name) = export_name else {
            return Self {
                name: story.name.clone().unwrap_or_default(),
                ..Self::default()
            };
        };
        let kind = fixture.title.clone().unwrap_or_default();
        let derived = story_name_from_export(export_name);
        Self {
            id: to_id(&kind, &derived),
            name: story.name.clone().unwrap_or(derived),
            kind,
        }
    }
}

fn describe_value(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object-style annotation (no longer supported)",
    }
}

/// A story bound to its merged annotations, renderable any number of times.
///
/// The merged `args`, `parameters` and `decorators` are fixed at composition time and can be
/// read without rendering.
#[derive(Clone, Debug)]
pub struct ComposedStory {
    chain: DecoratorChain,
    args: Args,
    parameters: Parameters,
    globals: Globals,
    arg_types: ArgTypes,
    component: Option<ComponentRef>,
    identity: StoryIdentity,
}

impl ComposedStory {
    /// Render with `extra_args` overriding the merged args.
    pub fn call(&self, extra_args: Args) -> RenderDescriptor {
        let ctx = RenderContext {
            args: merge_args([&self.args, &extra_args]),
            parameters: self.parameters.clone(),
            globals: self.globals.clone(),
            arg_types: self.arg_types.clone(),
            id: self.identity.id.clone(),
            kind: self.identity.kind.clone(),
            name: self.identity.name.clone(),
        };
        let mut descriptor = self.chain.run(ctx);
        if descriptor.component.is_none() {
            descriptor.component = self.component.clone();
        }
        descriptor
    }

    /// Render with the merged args only.
    pub fn render(&self) -> RenderDescriptor {
        self.call(Args::new())
    }

    /// Merged args.
    pub fn args(&self) -> &Args {
        &self.args
    }

    /// Merged parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Merged decorators: story, fixture, then global (innermost first).
    pub fn decorators(&self) -> &[Decorator] {
        self.chain.decorators()
    }

    /// Globals derived from global argType defaults.
    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    /// Fixture component used to back-fill descriptors.
    pub fn component(&self) -> Option<&ComponentRef> {
        self.component.as_ref()
    }

    /// Story id; empty when composed without an export name.
    pub fn id(&self) -> &str {
        &self.identity.id
    }

    /// Story kind (fixture title); empty when composed without an export name.
    pub fn kind(&self) -> &str {
        &self.identity.kind
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.identity.name
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;
