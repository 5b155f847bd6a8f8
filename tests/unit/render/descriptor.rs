use super::*;

fn button() -> ComponentRef {
    ComponentRef::new("ButtonComponent", "app-button").input("label")
}

#[test]
fn module_declaration_lookup_recurses_into_imports() {
    let inner = ModuleRef::new("ButtonModule").export(button());
    let outer = ModuleRef::new("SharedModule").import(inner);
    let meta = ModuleMetadata {
        imports: vec![outer],
        ..ModuleMetadata::default()
    };
    assert!(meta.declares(&button()));
    assert!(!meta.declares(&ComponentRef::new("Other", "app-other")));
}

#[test]
fn module_metadata_builder_appends_without_dropping() {
    let d = RenderDescriptor::default()
        .module_metadata(ModuleMetadata {
            declarations: vec![button()],
            ..ModuleMetadata::default()
        })
        .module_metadata(ModuleMetadata {
            schemas: vec!["CUSTOM_ELEMENTS_SCHEMA".into()],
            providers: vec![Provider::token("Logger")],
            ..ModuleMetadata::default()
        });
    let meta = d.module_metadata.unwrap();
    assert_eq!(meta.declarations.len(), 1);
    assert_eq!(meta.schemas, vec!["CUSTOM_ELEMENTS_SCHEMA".to_string()]);
    assert_eq!(meta.providers[0].token, "Logger");
}

#[test]
fn collect_providers_is_depth_first() {
    let m = ModuleRef::new("A")
        .provider(Provider::token("a"))
        .import(ModuleRef::new("B").provider(Provider::token("b")))
        .import(ModuleRef::new("C").provider(Provider::token("c")));
    let mut out = Vec::new();
    m.collect_providers(&mut out);
    let tokens: Vec<_> = out.iter().map(|p| p.token.as_str()).collect();
    assert_eq!(tokens, ["a", "b", "c"]);
}

#[test]
fn descriptor_json_omits_absent_structure() {
    let d = RenderDescriptor::default().prop("label", "Go");
    let v = serde_json::to_value(&d).unwrap();
    assert_eq!(v, serde_json::json!({"props": {"label": "Go"}, "styles": []}));
}
