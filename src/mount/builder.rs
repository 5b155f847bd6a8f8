use crate::{
    foundation::error::StoryResult,
    mount::channel::PropChannel,
    render::descriptor::{
        ApplicationConfig, ComponentRef, ModuleMetadata, ModuleRef, Provider, RenderDescriptor,
    },
    render::template::template_from_component,
};

/// Everything a tree builder needs for one rebuild.
#[derive(Debug)]
pub struct BuildRequest<'a> {
    /// Descriptor being mounted.
    pub descriptor: &'a RenderDescriptor,
    /// Descriptor's module metadata, normalized to all five lists.
    pub metadata: &'a ModuleMetadata,
    /// Component to mount (descriptor's, else the explicit one).
    pub component: Option<&'a ComponentRef>,
    /// Host element selector for the story.
    pub target_selector: &'a str,
    /// Fresh channel to wire into the tree.
    pub props: PropChannel,
}

/// Collaborator constructing a mountable tree on every rebuild.
///
/// Called exactly once per rebuild decision and never on reuse. Returning `Ok(None)` signals
/// that no tree could be produced, which the mount point treats as fatal.
pub trait TreeBuilder {
    /// Opaque tree handle handed to the host.
    type Tree;

    /// Build a tree for `request`.
    fn build(&mut self, request: BuildRequest<'_>) -> StoryResult<Option<Self::Tree>>;
}

/// A tree ready to be mounted by a host renderer.
#[derive(Clone, Debug)]
pub struct MountableTree {
    /// Generated wrapper component hosting the story template.
    pub wrapper: ComponentRef,
    /// Story component, if known.
    pub component: Option<ComponentRef>,
    /// Template rendered inside the wrapper.
    pub template: String,
    /// Stylesheets of the wrapper.
    pub styles: Vec<String>,
    /// Declarations: the story component when it needs declaring, then the descriptor's own.
    pub declarations: Vec<ComponentRef>,
    /// Standalone components imported by the wrapper.
    pub standalone_imports: Vec<ComponentRef>,
    /// Imported modules.
    pub imports: Vec<ModuleRef>,
    /// Module-level providers.
    pub providers: Vec<Provider>,
    /// Entry components.
    pub entry_components: Vec<ComponentRef>,
    /// Schemas.
    pub schemas: Vec<String>,
    /// Application configuration, starting with the story-props provider.
    pub application_config: ApplicationConfig,
    /// Live prop channel of this tree.
    pub props: PropChannel,
}

impl MountableTree {
    /// Complete the tree's prop channel. Idempotent.
    pub fn teardown(&self) {
        self.props.complete();
    }
}

/// Host element selector for a story id.
///
/// Ids that are valid tag names (`[A-Za-z0-9-]`) are used as-is; otherwise invalid characters
/// are removed and the result is wrapped as `sb-<id>-component`.
pub fn target_selector(story_id: &str) -> String {
    let valid = |c: char| c.is_ascii_alphanumeric() || c == '-';
    if !story_id.is_empty() && story_id.chars().all(valid) {
        return story_id.to_string();
    }
    let cleaned: String = story_id.chars().filter(|c| valid(*c)).collect();
    format!("sb-{cleaned}-component")
}

/// Default [`TreeBuilder`] producing [`MountableTree`] handles.
#[derive(Debug, Default)]
pub struct StandaloneTreeBuilder {
    builds: usize,
}

impl StandaloneTreeBuilder {
    /// New builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trees built so far.
    pub fn build_count(&self) -> usize {
        self.builds
    }
}

impl TreeBuilder for StandaloneTreeBuilder {
    type Tree = MountableTree;

    fn build(&mut self, request: BuildRequest<'_>) -> StoryResult<Option<MountableTree>> {
        self.builds += 1;
        Ok(Some(assemble_tree(request)))
    }
}

/// Merge the builder's own entries with the descriptor's, never dropping either side.
pub fn assemble_tree(request: BuildRequest<'_>) -> MountableTree {
    let BuildRequest {
        descriptor,
        metadata,
        component,
        target_selector,
        props,
    } = request;

    let mut declarations = Vec::new();
    let mut standalone_imports = Vec::new();
    if let Some(c) = component {
        if c.standalone {
            standalone_imports.push(c.clone());
        } else if !metadata.declares(c) {
            declarations.push(c.clone());
        }
    }
    declarations.extend(metadata.declarations.iter().cloned());

    let template = match (&descriptor.template, component) {
        (Some(t), _) => t.clone(),
        (None, Some(c)) => template_from_component(c, &descriptor.props),
        (None, None) => String::new(),
    };

    let mut app_providers = vec![Provider::story_props()];
    for m in &metadata.imports {
        m.collect_providers(&mut app_providers);
    }
    if let Some(cfg) = &descriptor.application_config {
        app_providers.extend(cfg.providers.iter().cloned());
    }

    MountableTree {
        wrapper: ComponentRef::new(format!("{target_selector}-wrapper"), target_selector),
        component: component.cloned(),
        template,
        styles: descriptor.styles.clone(),
        declarations,
        standalone_imports,
        imports: metadata.imports.clone(),
        providers: metadata.providers.clone(),
        entry_components: metadata.entry_components.clone(),
        schemas: metadata.schemas.clone(),
        application_config: ApplicationConfig {
            providers: app_providers,
        },
        props,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mount/builder.rs"]
mod tests;
