use crate::{
    mount::channel::PropChannel,
    mount::fingerprint::{
        MetadataFingerprint, fingerprint_application_config, fingerprint_module_metadata,
    },
    render::descriptor::RenderDescriptor,
};

/// Why a full rebuild is required.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RebuildReason {
    /// Nothing is mounted yet.
    FirstRender,
    /// The caller did not opt into reuse checking.
    NotForced,
    /// The descriptor carries a template different from the previous one.
    TemplateChanged,
    /// Declarations, imports, providers, entry components or schemas changed.
    ModuleMetadataChanged,
    /// Application providers changed.
    ApplicationConfigChanged,
}

/// Outcome of comparing a descriptor against the previous one at the same mount point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Push the new props through the live channel.
    Reuse,
    /// Build a fresh tree bound to a fresh channel.
    Rebuild(RebuildReason),
}

impl Decision {
    /// Whether a full rebuild is required.
    pub fn requires_rebuild(self) -> bool {
        matches!(self, Self::Rebuild(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct DescriptorSnapshot {
    template: Option<String>,
    module: MetadataFingerprint,
    application: MetadataFingerprint,
}

impl DescriptorSnapshot {
    fn of(d: &RenderDescriptor) -> Self {
        Self {
            template: d.template.clone(),
            module: fingerprint_module_metadata(d.module_metadata.as_ref()),
            application: fingerprint_application_config(d.application_config.as_ref()),
        }
    }
}

/// Per-mount-point render bookkeeping.
///
/// Starts out waiting for its first build; after [`RendererState::mark_built`] it is live and
/// owns exactly one active [`PropChannel`].
#[derive(Debug)]
pub struct RendererState {
    story_id: String,
    previous: Option<DescriptorSnapshot>,
    is_first_render: bool,
    channel: Option<PropChannel>,
}

impl RendererState {
    /// Fresh state for `story_id`.
    pub fn new(story_id: impl Into<String>) -> Self {
        Self {
            story_id: story_id.into(),
            previous: None,
            is_first_render: true,
            channel: None,
        }
    }

    /// Story id this state belongs to.
    pub fn story_id(&self) -> &str {
        &self.story_id
    }

    /// `true` until the first build completes.
    pub fn is_first_render(&self) -> bool {
        self.is_first_render
    }

    /// The active channel, if live.
    pub fn channel(&self) -> Option<&PropChannel> {
        self.channel.as_ref()
    }

    /// Decide between reuse and rebuild. The snapshot is replaced by `descriptor` either way.
    pub fn decide(&mut self, descriptor: &RenderDescriptor, forced: bool) -> Decision {
        let current = DescriptorSnapshot::of(descriptor);
        let previous = self.previous.replace(current.clone());

        let Some(previous) = previous else {
            return Decision::Rebuild(RebuildReason::FirstRender);
        };
        if self.is_first_render || self.channel.is_none() {
            return Decision::Rebuild(RebuildReason::FirstRender);
        }
        if !forced {
            return Decision::Rebuild(RebuildReason::NotForced);
        }
        if let Some(template) = &current.template
            && previous.template.as_ref() != Some(template)
        {
            return Decision::Rebuild(RebuildReason::TemplateChanged);
        }
        if previous.module != current.module {
            return Decision::Rebuild(RebuildReason::ModuleMetadataChanged);
        }
        if previous.application != current.application {
            return Decision::Rebuild(RebuildReason::ApplicationConfigChanged);
        }
        Decision::Reuse
    }

    /// Install a new active channel, completing the previous one.
    pub fn replace_channel(&mut self, channel: PropChannel) {
        if let Some(old) = self.channel.replace(channel) {
            old.complete();
        }
    }

    /// Record that the first build completed. Never toggles back.
    pub fn mark_built(&mut self) {
        self.is_first_render = false;
    }

    /// Complete the active channel, if any. Safe to call repeatedly.
    pub fn complete(&mut self) {
        if let Some(ch) = &self.channel {
            ch.complete();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mount/diff.rs"]
mod tests;
