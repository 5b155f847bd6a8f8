//! Render descriptors and the decorator chain.

/// Decorators, render functions and their composition.
pub mod decorator;
/// Description of one render: component, template, props, module metadata.
pub mod descriptor;
/// Template computation from component declarations.
pub mod template;
