use serde_json::Value;

use crate::foundation::value::{ArgValue, Props};

/// Token of the provider that feeds the live prop channel into a mounted tree.
pub const STORY_PROPS_TOKEN: &str = "STORY_PROPS";

#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Reference to a mountable component type.
///
/// `name` is the stable identity key; two refs with the same name describe the same type.
pub struct ComponentRef {
    /// Stable type name.
    pub name: String,
    /// Element selector used in generated templates.
    pub selector: String,
    /// Declared input property names, in declaration order.
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Declared output (event) names, in declaration order.
    #[serde(default)]
    pub outputs: Vec<String>,
    /// Standalone components are imported rather than declared.
    #[serde(default)]
    pub standalone: bool,
}

impl ComponentRef {
    /// Create a non-standalone component ref with no inputs or outputs.
    pub fn new(name: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selector: selector.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            standalone: false,
        }
    }

    /// Append a declared input.
    pub fn input(mut self, name: impl Into<String>) -> Self {
        self.inputs.push(name.into());
        self
    }

    /// Append a declared output.
    pub fn output(mut self, name: impl Into<String>) -> Self {
        self.outputs.push(name.into());
        self
    }

    /// Mark the component standalone.
    pub fn standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A dependency-injection provider entry. Identity is the `token`.
pub struct Provider {
    /// Injection token.
    pub token: String,
    /// Provided value; `Null` for class/factory providers resolved by the host.
    #[serde(default)]
    pub value: Value,
}

impl Provider {
    /// Provider resolved by token only.
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            value: Value::Null,
        }
    }

    /// Provider with a concrete value.
    pub fn value(token: impl Into<String>, value: Value) -> Self {
        Self {
            token: token.into(),
            value,
        }
    }

    /// The provider wiring the live prop channel into a tree.
    pub fn story_props() -> Self {
        Self::token(STORY_PROPS_TOKEN)
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// An importable module: exports components and may carry providers and nested imports.
pub struct ModuleRef {
    /// Stable module name.
    pub name: String,
    /// Components this module declares and exports.
    #[serde(default)]
    pub exports: Vec<ComponentRef>,
    /// Modules re-exported through this one.
    #[serde(default)]
    pub imports: Vec<ModuleRef>,
    /// Providers contributed to the application when imported.
    #[serde(default)]
    pub providers: Vec<Provider>,
}

impl ModuleRef {
    /// Create an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append an exported component.
    pub fn export(mut self, component: ComponentRef) -> Self {
        self.exports.push(component);
        self
    }

    /// Append a nested import.
    pub fn import(mut self, module: ModuleRef) -> Self {
        self.imports.push(module);
        self
    }

    /// Append a provider.
    pub fn provider(mut self, provider: Provider) -> Self {
        self.providers.push(provider);
        self
    }

    /// Whether `component` is exported here or by any nested import.
    pub fn declares(&self, component: &ComponentRef) -> bool {
        self.exports.iter().any(|c| c.name == component.name)
            || self.imports.iter().any(|m| m.declares(component))
    }

    /// Providers of this module followed by those of nested imports, depth-first.
    pub fn collect_providers(&self, out: &mut Vec<Provider>) {
        out.extend(self.providers.iter().cloned());
        for m in &self.imports {
            m.collect_providers(out);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Structural declarations of a story tree.
pub struct ModuleMetadata {
    /// Declared components.
    #[serde(default)]
    pub declarations: Vec<ComponentRef>,
    /// Imported modules.
    #[serde(default)]
    pub imports: Vec<ModuleRef>,
    /// Module-level providers.
    #[serde(default)]
    pub providers: Vec<Provider>,
    /// Components created dynamically.
    #[serde(default)]
    pub entry_components: Vec<ComponentRef>,
    /// Schema identifiers, e.g. `CUSTOM_ELEMENTS_SCHEMA`.
    #[serde(default)]
    pub schemas: Vec<String>,
}

impl ModuleMetadata {
    /// Append every entry of `other` after the entries of `self`.
    pub fn extend(&mut self, other: &ModuleMetadata) {
        self.declarations.extend(other.declarations.iter().cloned());
        self.imports.extend(other.imports.iter().cloned());
        self.providers.extend(other.providers.iter().cloned());
        self.entry_components.extend(other.entry_components.iter().cloned());
        self.schemas.extend(other.schemas.iter().cloned());
    }

    /// Whether `component` is declared directly or exported by an import, recursively.
    pub fn declares(&self, component: &ComponentRef) -> bool {
        self.declarations.iter().any(|c| c.name == component.name)
            || self.imports.iter().any(|m| m.declares(component))
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Application-level configuration handed to the host when bootstrapping a tree.
pub struct ApplicationConfig {
    /// Application providers.
    #[serde(default)]
    pub providers: Vec<Provider>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Structural output of rendering a story once.
pub struct RenderDescriptor {
    /// Component to mount; back-filled from the fixture when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentRef>,
    /// Explicit template text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Props fed into the component.
    #[serde(default)]
    pub props: Props,
    /// Extra stylesheets.
    #[serde(default)]
    pub styles: Vec<String>,
    /// Structural declarations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_metadata: Option<ModuleMetadata>,
    /// Application-level configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_config: Option<ApplicationConfig>,
}

impl RenderDescriptor {
    /// Descriptor carrying only props.
    pub fn from_props(props: Props) -> Self {
        Self {
            props,
            ..Self::default()
        }
    }

    /// Set the component.
    pub fn component(mut self, component: ComponentRef) -> Self {
        self.component = Some(component);
        self
    }

    /// Set the template.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Set one prop, replacing any previous value.
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// Append a stylesheet.
    pub fn style(mut self, css: impl Into<String>) -> Self {
        self.styles.push(css.into());
        self
    }

    /// Merge structural declarations into the descriptor's own.
    pub fn module_metadata(mut self, metadata: ModuleMetadata) -> Self {
        self.module_metadata
            .get_or_insert_with(ModuleMetadata::default)
            .extend(&metadata);
        self
    }

    /// Append application providers.
    pub fn application_providers(mut self, providers: impl IntoIterator<Item = Provider>) -> Self {
        self.application_config
            .get_or_insert_with(ApplicationConfig::default)
            .providers
            .extend(providers);
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/descriptor.rs"]
mod tests;
