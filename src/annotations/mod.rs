//! Annotation model and layering.
//!
//! Annotations come in three layers (global, fixture, story). Layering resolves them into the
//! effective configuration of one story.

/// Layer combination rules for args, parameters, globals and decorators.
pub mod layering;
/// Global, fixture and story annotation types.
pub mod model;
