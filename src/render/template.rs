use crate::foundation::value::Props;
use crate::render::descriptor::ComponentRef;

/// Compute a host template binding `props` to the component's declared inputs and outputs.
///
/// Only props that name a declared input (`[name]="name"`) or output (`(name)="name($event)"`)
/// are bound; bindings follow declaration order.
pub fn template_from_component(component: &ComponentRef, props: &Props) -> String {
    let mut bindings = Vec::new();
    for input in &component.inputs {
        if props.contains_key(input) {
            bindings.push(format!("[{input}]=\"{input}\""));
        }
    }
    for output in &component.outputs {
        if props.contains_key(output) {
            bindings.push(format!("({output})=\"{output}($event)\""));
        }
    }
    build_template(&component.selector, &bindings)
}

fn build_template(selector: &str, bindings: &[String]) -> String {
    // Only the first selector of a group is used.
    let first = selector.split(',').next().unwrap_or_default().trim();
    let attrs = if bindings.is_empty() {
        String::new()
    } else {
        format!(" {}", bindings.join(" "))
    };

    if let Some(attr) = first.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return format!("<div {attr}{attrs}></div>");
    }
    if let Some(class) = first.strip_prefix('.') {
        return format!("<div class=\"{class}\"{attrs}></div>");
    }
    let tag = if first.is_empty() { "div" } else { first };
    format!("<{tag}{attrs}></{tag}>")
}

#[cfg(test)]
#[path = "../../tests/unit/render/template.rs"]
mod tests;
