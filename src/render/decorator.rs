use std::fmt;
use std::sync::Arc;

use crate::annotations::model::ArgTypes;
use crate::foundation::value::{Args, Globals, Parameters};
use crate::render::descriptor::{ApplicationConfig, ModuleMetadata, Provider, RenderDescriptor};
use crate::render::template::template_from_component;

#[derive(Clone, Debug, Default)]
/// Per-invocation input to render functions and decorators.
pub struct RenderContext {
    /// Merged args plus caller overrides.
    pub args: Args,
    /// Merged parameters.
    pub parameters: Parameters,
    /// Globals derived from argType defaults.
    pub globals: Globals,
    /// Global argTypes.
    pub arg_types: ArgTypes,
    /// Story id (`kind--name`), empty when unknown.
    pub id: String,
    /// Story kind (fixture title), empty when unknown.
    pub kind: String,
    /// Display name, empty when unknown.
    pub name: String,
}

type RenderFnInner = dyn Fn(&RenderContext) -> RenderDescriptor + Send + Sync;

/// A story render function: context in, descriptor out.
#[derive(Clone)]
pub struct RenderFn(Arc<RenderFnInner>);

impl RenderFn {
    /// Wrap a render closure.
    pub fn new(f: impl Fn(&RenderContext) -> RenderDescriptor + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Fallback render used when neither story nor project supply one: props are the args.
    pub fn args_as_props() -> Self {
        Self::new(|ctx| RenderDescriptor::from_props(ctx.args.clone()))
    }

    /// Run the render function.
    pub fn call(&self, ctx: &RenderContext) -> RenderDescriptor {
        (self.0)(ctx)
    }
}

impl fmt::Debug for RenderFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RenderFn")
    }
}

/// Continuation handed to a decorator; calling it runs the rest of the chain.
pub type Next<'a> = &'a dyn Fn(RenderContext) -> RenderDescriptor;

type DecoratorInner = dyn Fn(Next<'_>, RenderContext) -> RenderDescriptor + Send + Sync;

/// A cross-cutting transform around a story render.
///
/// A decorator that never calls `next` short-circuits every inner decorator and the story.
#[derive(Clone)]
pub struct Decorator {
    name: String,
    f: Arc<DecoratorInner>,
}

impl Decorator {
    /// Wrap a decorator closure under a debug name.
    pub fn new(
        name: impl Into<String>,
        f: impl Fn(Next<'_>, RenderContext) -> RenderDescriptor + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    /// Debug name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run this decorator around `next`.
    pub fn apply(&self, next: Next<'_>, ctx: RenderContext) -> RenderDescriptor {
        (self.f)(next, ctx)
    }

    /// Prepend structural declarations to whatever the inner story declares.
    pub fn module_metadata(metadata: ModuleMetadata) -> Self {
        Self::new("moduleMetadata", move |next, ctx| {
            let mut story = next(ctx);
            let mut merged = metadata.clone();
            if let Some(own) = story.module_metadata.take() {
                merged.extend(&own);
            }
            story.module_metadata = Some(merged);
            story
        })
    }

    /// Prepend application providers to whatever the inner story provides.
    pub fn application_config(providers: Vec<Provider>) -> Self {
        Self::new("applicationConfig", move |next, ctx| {
            let mut story = next(ctx);
            let mut merged = providers.clone();
            if let Some(own) = story.application_config.take() {
                merged.extend(own.providers);
            }
            story.application_config = Some(ApplicationConfig { providers: merged });
            story
        })
    }

    /// Wrap the story template (computed from its component when absent) with `wrap`.
    pub fn template_wrapper(wrap: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self::new("componentWrapper", move |next, ctx| {
            let mut story = next(ctx);
            let inner = match (&story.template, &story.component) {
                (Some(t), _) => t.clone(),
                (None, Some(c)) => template_from_component(c, &story.props),
                (None, None) => String::new(),
            };
            story.template = Some(wrap(&inner));
            story
        })
    }
}

impl fmt::Debug for Decorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decorator({})", self.name)
    }
}

/// A render function wrapped by an ordered list of decorators.
///
/// `decorators[0]` sits directly around the render function and the last entry is outermost,
/// i.e. the list is folded left-to-right, each decorator wrapping the result so far.
#[derive(Clone, Debug)]
pub struct DecoratorChain {
    render: RenderFn,
    decorators: Vec<Decorator>,
}

impl DecoratorChain {
    /// Build a chain from innermost-first decorators.
    pub fn new(render: RenderFn, decorators: Vec<Decorator>) -> Self {
        Self { render, decorators }
    }

    /// Decorators, innermost first.
    pub fn decorators(&self) -> &[Decorator] {
        &self.decorators
    }

    /// Run the full chain.
    pub fn run(&self, ctx: RenderContext) -> RenderDescriptor {
        self.invoke(self.decorators.len(), ctx)
    }

    fn invoke(&self, depth: usize, ctx: RenderContext) -> RenderDescriptor {
        match depth.checked_sub(1) {
            None => self.render.call(&ctx),
            Some(i) => {
                let next = |c: RenderContext| self.invoke(i, c);
                self.decorators[i].apply(&next, ctx)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/decorator.rs"]
mod tests;
