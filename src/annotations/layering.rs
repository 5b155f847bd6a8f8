use serde_json::Value;

use crate::{
    annotations::model::{ArgTypes, FixtureAnnotations, GlobalAnnotations, Story},
    foundation::value::{Args, Globals, Parameters},
    render::decorator::Decorator,
};

#[derive(Clone, Debug, Default)]
/// The effective configuration of one story after layering global, fixture and story annotations.
pub struct EffectiveConfig {
    /// Shallow-merged args (global, fixture, story).
    pub args: Args,
    /// Deep-combined parameters (global, fixture, story).
    pub parameters: Parameters,
    /// Globals derived from global argType defaults.
    pub globals: Globals,
    /// Global argTypes.
    pub arg_types: ArgTypes,
    /// Story, fixture, then global decorators: innermost first.
    pub decorators: Vec<Decorator>,
}

/// Layer the three annotation sets into one effective configuration.
pub fn layer_annotations(
    story: &Story,
    fixture: &FixtureAnnotations,
    global: &GlobalAnnotations,
) -> EffectiveConfig {
    let decorators = story
        .decorators
        .iter()
        .chain(&fixture.decorators)
        .chain(&global.decorators)
        .cloned()
        .collect();

    EffectiveConfig {
        args: merge_args([&global.args, &fixture.args, &story.args]),
        parameters: combine_parameters([&global.parameters, &fixture.parameters, &story.parameters]),
        globals: derive_globals(&global.arg_types),
        arg_types: global.arg_types.clone(),
        decorators,
    }
}

/// Fold several global annotation sets into one, in order.
///
/// Later sets layer on top of earlier ones: their decorators wrap the earlier decorators, args
/// and argTypes replace same-named entries, parameters combine, and a later `render` wins.
pub fn combine_global_annotations<'a>(
    layers: impl IntoIterator<Item = &'a GlobalAnnotations>,
) -> GlobalAnnotations {
    let mut out = GlobalAnnotations::default();
    for layer in layers {
        out.decorators.extend(layer.decorators.iter().cloned());
        out.args = merge_args([&out.args, &layer.args]);
        combine_into(&mut out.parameters, &layer.parameters);
        out.arg_types
            .extend(layer.arg_types.iter().map(|(k, t)| (k.clone(), t.clone())));
        if let Some(render) = &layer.render {
            out.render = Some(render.clone());
        }
    }
    out
}

/// Shallow merge: later layers replace whole values of earlier ones.
pub fn merge_args<'a>(layers: impl IntoIterator<Item = &'a Args>) -> Args {
    let mut out = Args::new();
    for layer in layers {
        out.extend(layer.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    out
}

/// Deep merge: nested objects combine key-by-key; any other value from a later layer wins.
pub fn combine_parameters<'a>(layers: impl IntoIterator<Item = &'a Parameters>) -> Parameters {
    let mut out = Parameters::new();
    for layer in layers {
        combine_into(&mut out, layer);
    }
    out
}

fn combine_into(dst: &mut Parameters, src: &Parameters) {
    for (key, value) in src {
        if let (Some(Value::Object(existing)), Value::Object(incoming)) = (dst.get_mut(key), value)
        {
            combine_into(existing, incoming);
            continue;
        }
        dst.insert(key.clone(), value.clone());
    }
}

/// Collect argType defaults. Entries without a default, or with a `null` default, are omitted.
pub fn derive_globals(arg_types: &ArgTypes) -> Globals {
    arg_types
        .iter()
        .filter_map(|(k, t)| match &t.default_value {
            Some(Value::Null) | None => None,
            Some(v) => Some((k.clone(), v.clone())),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/annotations/layering.rs"]
mod tests;
