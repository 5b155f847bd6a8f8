use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;

use crate::{
    annotations::layering::combine_global_annotations,
    foundation::error::{StoryError, StoryResult},
    foundation::value::{ArgValue, Args, Parameters},
    render::decorator::{Decorator, RenderFn},
    render::descriptor::ComponentRef,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Type metadata for a single arg.
pub struct ArgType {
    /// Default value; feeds derived globals when declared at project level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Control hint for interactive hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<Value>,
}

impl ArgType {
    /// ArgType with a default value.
    pub fn with_default(value: Value) -> Self {
        Self {
            default_value: Some(value),
            ..Self::default()
        }
    }
}

/// ArgTypes keyed by arg name.
pub type ArgTypes = BTreeMap<String, ArgType>;

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Project-wide annotations applied to every story.
///
/// Data fields load from a JSON preview configuration; functions are attached in code.
pub struct GlobalAnnotations {
    /// Outermost parameter layer.
    #[serde(default)]
    pub parameters: Parameters,
    /// Outermost arg layer.
    #[serde(default)]
    pub args: Args,
    /// ArgTypes; their defaults become the globals of every render.
    #[serde(default)]
    pub arg_types: ArgTypes,
    /// Outermost decorators, innermost first.
    #[serde(skip)]
    pub decorators: Vec<Decorator>,
    /// Render used by stories that do not carry their own.
    #[serde(skip)]
    pub render: Option<RenderFn>,
}

impl GlobalAnnotations {
    /// Parse data annotations from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> StoryResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| StoryError::validation(format!("parse global annotations JSON: {e}")))
    }

    /// Parse data annotations from a JSON string.
    pub fn from_json_str(s: &str) -> StoryResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Convert data annotations from an already parsed JSON value.
    pub fn from_value(v: Value) -> StoryResult<Self> {
        serde_json::from_value(v)
            .map_err(|e| StoryError::validation(format!("parse global annotations JSON: {e}")))
    }

    /// Parse data annotations from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> StoryResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StoryError::validation(format!(
                "open global annotations JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Compose several annotation sets in order; later sets layer on top of earlier ones.
    pub fn compose(layers: impl IntoIterator<Item = GlobalAnnotations>) -> Self {
        let layers: Vec<_> = layers.into_iter().collect();
        combine_global_annotations(&layers)
    }

    /// Append a decorator (it becomes outer to those already present).
    pub fn decorator(mut self, d: Decorator) -> Self {
        self.decorators.push(d);
        self
    }

    /// Set the default render.
    pub fn render(mut self, render: RenderFn) -> Self {
        self.render = Some(render);
        self
    }

    /// Set one parameter.
    pub fn parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    /// Set one arg.
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    /// Declare one argType.
    pub fn arg_type(mut self, key: impl Into<String>, arg_type: ArgType) -> Self {
        self.arg_types.insert(key.into(), arg_type);
        self
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Annotations shared by every story of one component under test.
pub struct FixtureAnnotations {
    /// Fixture title; becomes the story `kind`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Component used when a story's descriptor names none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentRef>,
    /// Middle parameter layer.
    #[serde(default)]
    pub parameters: Parameters,
    /// Middle arg layer.
    #[serde(default)]
    pub args: Args,
    /// Only these export names are stories, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_stories: Option<Vec<String>>,
    /// These export names are never stories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_stories: Option<Vec<String>>,
    /// Middle decorators, innermost first.
    #[serde(skip)]
    pub decorators: Vec<Decorator>,
    /// Render for stories of this fixture that carry none.
    #[serde(skip)]
    pub render: Option<RenderFn>,
}

impl FixtureAnnotations {
    /// Fixture for `component`.
    pub fn for_component(component: ComponentRef) -> Self {
        Self {
            component: Some(component),
            ..Self::default()
        }
    }

    /// Parse data annotations from a JSON string.
    pub fn from_json_str(s: &str) -> StoryResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| StoryError::validation(format!("parse fixture annotations JSON: {e}")))
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a decorator.
    pub fn decorator(mut self, d: Decorator) -> Self {
        self.decorators.push(d);
        self
    }

    /// Set one parameter.
    pub fn parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    /// Set one arg.
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    /// Set the fixture-level render.
    pub fn render(mut self, render: RenderFn) -> Self {
        self.render = Some(render);
        self
    }

    /// Restrict stories to these export names.
    pub fn include_stories<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.include_stories = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Exclude these export names from stories.
    pub fn exclude_stories<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.exclude_stories = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

#[derive(Clone, Debug, Default)]
/// One story: an optional render function plus its own annotation layer.
pub struct Story {
    /// Explicit display name.
    pub name: Option<String>,
    /// Render function; falls back to fixture, then project, then args-as-props.
    pub render: Option<RenderFn>,
    /// Innermost decorators, innermost first.
    pub decorators: Vec<Decorator>,
    /// Innermost parameter layer.
    pub parameters: Parameters,
    /// Innermost arg layer.
    pub args: Args,
}

impl Story {
    /// Story with an explicit render function.
    pub fn new(render: RenderFn) -> Self {
        Self {
            render: Some(render),
            ..Self::default()
        }
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a decorator.
    pub fn decorator(mut self, d: Decorator) -> Self {
        self.decorators.push(d);
        self
    }

    /// Set one parameter.
    pub fn parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    /// Set one arg.
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }
}

#[derive(Clone, Debug)]
/// A named export of a story module.
pub enum Export {
    /// A story.
    Story(Story),
    /// Any non-story value, including legacy object-style annotations.
    Data(Value),
}

impl From<Story> for Export {
    fn from(s: Story) -> Self {
        Self::Story(s)
    }
}

impl From<Value> for Export {
    fn from(v: Value) -> Self {
        Self::Data(v)
    }
}

impl From<RenderFn> for Export {
    fn from(render: RenderFn) -> Self {
        Self::Story(Story::new(render))
    }
}

#[derive(Clone, Debug, Default)]
/// A story module: fixture annotations (the default export) plus named exports in order.
pub struct StoryModule {
    /// Default export.
    pub default: FixtureAnnotations,
    /// Named exports in declaration order.
    pub exports: Vec<(String, Export)>,
}

impl StoryModule {
    /// Module with the given default export and no named exports.
    pub fn new(default: FixtureAnnotations) -> Self {
        Self {
            default,
            exports: Vec::new(),
        }
    }

    /// Append a named export.
    pub fn export(mut self, name: impl Into<String>, export: impl Into<Export>) -> Self {
        self.exports.push((name.into(), export.into()));
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/annotations/model.rs"]
mod tests;
