// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};
use serde_json::json;

use super::{resolve_override, Environment, InMemoryAssets, OverrideResolver, Scope};
use crate::model::{
    fixtures, Binding, ComponentInstance, ComponentReference, DataPath, Document, ImageRef,
    MainComponent, Node, NodeId, NodeKind, OverrideValue, PropertyValue,
};

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn text(value: &str) -> PropertyValue {
    PropertyValue::Text(value.to_owned())
}

fn path(raw: &str) -> DataPath {
    DataPath::parse(raw).expect("data path")
}

#[fixture]
fn card_screen() -> Document {
    fixtures::card_screen()
}

#[test]
fn mismatched_override_kind_falls_back_to_the_default() {
    let env = Environment::new();
    let scope = Scope::new(&env);
    let default = PropertyValue::Number(5.0);
    let mismatched = OverrideValue::Text(Binding::Literal("five".to_owned()));

    assert_eq!(resolve_override(Some(&mismatched), &default, &scope), default);
    assert_eq!(resolve_override(None, &default, &scope), default);
    assert_eq!(
        resolve_override(Some(&OverrideValue::Number(Binding::Literal(7.0))), &default, &scope),
        PropertyValue::Number(7.0)
    );
}

#[test]
fn property_bindings_track_the_current_outer_scope() {
    let binding = OverrideValue::Text(Binding::property("heading"));
    let default = text("Untitled");

    let mut outer = Environment::new();
    outer.insert("heading".into(), text("First"));
    assert_eq!(resolve_override(Some(&binding), &default, &Scope::new(&outer)), text("First"));

    outer.insert("heading".into(), text("Second"));
    assert_eq!(resolve_override(Some(&binding), &default, &Scope::new(&outer)), text("Second"));

    outer.insert("heading".into(), PropertyValue::Boolean(true));
    assert_eq!(resolve_override(Some(&binding), &default, &Scope::new(&outer)), default);

    outer.clear();
    assert_eq!(resolve_override(Some(&binding), &default, &Scope::new(&outer)), default);
}

#[rstest]
#[case::text_from_string(Binding::<String>::DataPath(path("user.name")), "?", "Ada")]
#[case::text_from_number(Binding::<String>::DataPath(path("user.age")), "?", "36")]
#[case::missing_path(Binding::<String>::DataPath(path("user.email")), "?", "?")]
#[case::wrong_shape(Binding::<String>::DataPath(path("user.tags")), "?", "?")]
fn data_path_text_bindings(
    #[case] binding: Binding<String>,
    #[case] fallback: &str,
    #[case] expected: &str,
) {
    let data = json!({ "user": { "name": "Ada", "age": 36, "tags": ["a"] } });
    let env = Environment::new();
    let scope = Scope::new(&env).with_data(&data);
    assert_eq!(binding.resolve(&fallback.to_owned(), &scope), expected);
}

#[test]
fn data_path_numbers_coerce_or_fall_back() {
    let data = json!({ "size": "18", "label": "large" });
    let env = Environment::new();
    let scope = Scope::new(&env).with_data(&data);

    assert_eq!(Binding::<f64>::DataPath(path("size")).resolve(&12.0, &scope), 18.0);
    assert_eq!(Binding::<f64>::DataPath(path("label")).resolve(&12.0, &scope), 12.0);
    assert_eq!(
        Binding::<f64>::DataPath(path("size")).resolve(&12.0, &Scope::new(&env)),
        12.0
    );
}

#[rstest]
fn instance_environment_applies_matching_overrides_only(card_screen: Document) {
    let resolver = OverrideResolver::new(&card_screen);
    let env = Environment::new();
    let instance = card_screen.find("instance-1").expect("instance");
    let badge = card_screen.find("badge").expect("badge");

    let resolved = resolver
        .environment_for(instance, &Scope::new(&env))
        .expect("resolved instance");

    assert_eq!(resolved.component, card_screen.find("card").expect("card"));
    assert_eq!(resolved.property("title"), Some(&text("Hello")));
    assert_eq!(resolved.property("count"), Some(&PropertyValue::Number(0.0)));
    assert_eq!(
        resolved.property("icon"),
        Some(&PropertyValue::Image(ImageRef::new("placeholder")))
    );
    assert_eq!(resolved.property("badge"), Some(&PropertyValue::Component(badge)));
    let names = resolved.environment.keys().map(|k| k.as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["title", "count", "icon", "badge"]);
}

#[rstest]
fn nested_instances_resolve_through_component_properties(card_screen: Document) {
    let resolver = OverrideResolver::new(&card_screen);
    let env = Environment::new();
    let instance = card_screen.find("instance-1").expect("instance");
    let card_badge = card_screen.find("card-badge").expect("card-badge");

    let resolved = resolver
        .environment_for(instance, &Scope::new(&env))
        .expect("resolved instance");
    assert_eq!(resolved.nested.len(), 1);

    let nested = resolved.find(card_badge).expect("nested badge");
    assert_eq!(nested.component, card_screen.find("badge").expect("badge"));
    assert_eq!(nested.property("label"), Some(&text("Hello")));
    assert!(!nested.recursive);
}

#[rstest]
fn property_reference_without_a_component_in_scope_does_not_resolve(card_screen: Document) {
    let resolver = OverrideResolver::new(&card_screen);
    let card_badge = card_screen.find("card-badge").expect("card-badge");

    let mut env = Environment::new();
    assert_eq!(resolver.environment_for(card_badge, &Scope::new(&env)), None);

    env.insert("badge".into(), text("not a component"));
    assert_eq!(resolver.environment_for(card_badge, &Scope::new(&env)), None);

    assert_eq!(
        resolver.environment_for(card_screen.find("title").expect("text node"), &Scope::new(&env)),
        None
    );
}

#[test]
fn self_placing_component_stops_at_the_repeated_component() {
    let mut doc = Document::new();
    let mut component = MainComponent::default();
    component.declare("depth", PropertyValue::Number(1.0));
    let a = doc.insert_root(Node::new(nid("a"), component)).expect("a");
    let inner = doc
        .append_child(a, Node::new(nid("inner"), ComponentInstance::new(ComponentReference::Main(a))))
        .expect("inner");
    let outer = doc
        .insert_root(Node::new(
            nid("outer"),
            ComponentInstance::new(ComponentReference::Main(a))
                .with_override("depth", OverrideValue::Number(Binding::Literal(0.0))),
        ))
        .expect("outer");

    let env = Environment::new();
    let resolved = OverrideResolver::new(&doc)
        .environment_for(outer, &Scope::new(&env))
        .expect("resolved");

    assert!(!resolved.recursive);
    assert_eq!(resolved.property("depth"), Some(&PropertyValue::Number(0.0)));
    let nested = resolved.find(inner).expect("inner expansion");
    assert!(nested.recursive);
    assert!(nested.nested.is_empty());
    assert_eq!(nested.property("depth"), Some(&PropertyValue::Number(1.0)));
}

#[rstest]
fn preview_scope_uses_defaults_and_preview_data(card_screen: Document) {
    let card = card_screen
        .node(card_screen.find("card").expect("card"))
        .and_then(|node| node.as_main_component())
        .expect("card component");
    let preview = OverrideResolver::preview_scope(card);
    let scope = preview.scope();

    let NodeKind::Text(title) = card_screen
        .node(card_screen.find("card-title").expect("card-title"))
        .expect("node")
        .kind()
    else {
        panic!("card-title should be a Text");
    };
    assert_eq!(title.text.resolve(&String::new(), &scope), "Untitled");
    assert_eq!(
        Binding::<String>::DataPath(path("user.name")).resolve(&String::new(), &scope),
        "Ada"
    );
}

#[test]
fn assets_translate_text_and_replace_missing_images() {
    let assets = InMemoryAssets::new()
        .with_image("hero", vec![1])
        .with_translation("de", "Welcome", "Willkommen");
    let env = Environment::new();
    let scope = Scope::new(&env).with_assets(&assets, "de");

    let welcome = Binding::Literal("Welcome".to_owned());
    assert_eq!(welcome.resolve(&String::new(), &scope), "Willkommen");
    assert_eq!(welcome.resolve(&String::new(), &Scope::new(&env)), "Welcome");

    let placeholder = ImageRef::new("placeholder");
    let hero = Binding::Literal(ImageRef::new("hero"));
    let logo = Binding::Literal(ImageRef::new("logo"));
    assert_eq!(hero.resolve(&placeholder, &scope), ImageRef::new("hero"));
    assert_eq!(logo.resolve(&placeholder, &scope), placeholder);
}
