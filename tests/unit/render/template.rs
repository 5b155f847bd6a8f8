use super::*;
use crate::foundation::value::{Action, ArgValue, args};

fn button() -> ComponentRef {
    ComponentRef::new("ButtonComponent", "app-button")
        .input("primary")
        .input("label")
        .output("onClick")
}

#[test]
fn binds_declared_inputs_and_outputs_present_in_props() {
    let props = args([
        ("label", ArgValue::from("Go")),
        ("onClick", ArgValue::from(Action::new("onClick", |_| {}))),
        ("unrelated", ArgValue::from(true)),
    ]);
    assert_eq!(
        template_from_component(&button(), &props),
        r#"<app-button [label]="label" (onClick)="onClick($event)"></app-button>"#
    );
}

#[test]
fn empty_props_yield_bare_element() {
    assert_eq!(
        template_from_component(&button(), &Props::new()),
        "<app-button></app-button>"
    );
}

#[test]
fn attribute_and_class_selectors_use_div_host() {
    let attr = ComponentRef::new("Tooltip", "[appTooltip], .legacy").input("text");
    let props = args([("text", "hi")]);
    assert_eq!(
        template_from_component(&attr, &props),
        r#"<div appTooltip [text]="text"></div>"#
    );

    let class = ComponentRef::new("Card", ".card");
    assert_eq!(
        template_from_component(&class, &Props::new()),
        r#"<div class="card"></div>"#
    );
}
