use crate::{
    foundation::error::{StoryError, StoryResult},
    mount::builder::{BuildRequest, MountableTree, StandaloneTreeBuilder, TreeBuilder, target_selector},
    mount::channel::PropChannel,
    mount::diff::{Decision, RendererState},
    render::descriptor::{ComponentRef, RenderDescriptor},
};

/// Story id of the throwaway mount point used by [`build_mountable_tree`].
pub const WRAPPER_STORY_ID: &str = "story-testing-wrapper";

/// Result of one render request at a mount point.
#[derive(Debug)]
pub enum RenderOutcome<T> {
    /// Props were pushed through the live channel; the mounted tree stays.
    Reused,
    /// A fresh tree was built; the previous channel (if any) is complete.
    Rebuilt(T),
}

impl<T> RenderOutcome<T> {
    /// The rebuilt tree, if any.
    pub fn into_tree(self) -> Option<T> {
        match self {
            Self::Reused => None,
            Self::Rebuilt(t) => Some(t),
        }
    }
}

/// One location where a tree is kept alive across repeated renders.
#[derive(Debug)]
pub struct MountPoint<B: TreeBuilder> {
    state: RendererState,
    builder: B,
    component: Option<ComponentRef>,
}

impl<B: TreeBuilder> MountPoint<B> {
    /// Mount point for `story_id` using `builder` for rebuilds.
    pub fn new(story_id: impl Into<String>, builder: B) -> Self {
        Self {
            state: RendererState::new(story_id),
            builder,
            component: None,
        }
    }

    /// Component used when a descriptor names none.
    pub fn with_component(mut self, component: ComponentRef) -> Self {
        self.component = Some(component);
        self
    }

    /// Render bookkeeping.
    pub fn state(&self) -> &RendererState {
        &self.state
    }

    /// Tree builder.
    pub fn builder(&self) -> &B {
        &self.builder
    }

    /// The active prop channel, once a tree is live.
    pub fn channel(&self) -> Option<&PropChannel> {
        self.state.channel()
    }

    /// Render `descriptor`, reusing the live tree when `forced` and nothing structural changed.
    #[tracing::instrument(skip(self, descriptor), fields(story_id = %self.state.story_id()))]
    pub fn render(
        &mut self,
        descriptor: &RenderDescriptor,
        forced: bool,
    ) -> StoryResult<RenderOutcome<B::Tree>> {
        let reason = match self.state.decide(descriptor, forced) {
            Decision::Reuse => {
                tracing::debug!("reusing mounted tree");
                if let Some(ch) = self.state.channel() {
                    ch.next(descriptor.props.clone());
                }
                return Ok(RenderOutcome::Reused);
            }
            Decision::Rebuild(reason) => reason,
        };
        tracing::debug!(?reason, "rebuilding tree");

        let metadata = descriptor.module_metadata.clone().unwrap_or_default();
        let channel = PropChannel::new(descriptor.props.clone());
        let selector = target_selector(self.state.story_id());
        let built = self
            .builder
            .build(BuildRequest {
                descriptor,
                metadata: &metadata,
                component: descriptor.component.as_ref().or(self.component.as_ref()),
                target_selector: &selector,
                props: channel.clone(),
            })
            .inspect_err(|_| channel.complete())?;

        let Some(tree) = built else {
            channel.complete();
            return Err(if self.state.is_first_render() {
                StoryError::missing_tree("must initially have module/tree")
            } else {
                StoryError::missing_tree("tree builder produced no tree for a rebuild")
            });
        };

        self.state.replace_channel(channel);
        self.state.mark_built();
        Ok(RenderOutcome::Rebuilt(tree))
    }

    /// Complete the active channel. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.state.complete();
    }
}

/// Build a tree for one descriptor on a throwaway mount point.
///
/// The descriptor's module metadata is normalized so every list is present; `component` is
/// used when the descriptor names none.
#[tracing::instrument(skip_all)]
pub fn build_mountable_tree(
    descriptor: &RenderDescriptor,
    component: Option<&ComponentRef>,
) -> StoryResult<MountableTree> {
    let mut normalized = descriptor.clone();
    normalized.module_metadata = Some(descriptor.module_metadata.clone().unwrap_or_default());

    let mut mount = MountPoint::new(WRAPPER_STORY_ID, StandaloneTreeBuilder::new());
    if let Some(c) = component {
        mount = mount.with_component(c.clone());
    }
    mount
        .render(&normalized, false)?
        .into_tree()
        .ok_or_else(|| StoryError::missing_tree("must initially have module/tree"))
}

#[cfg(test)]
#[path = "../../tests/unit/mount/mount_point.rs"]
mod tests;
