// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::action::Action;
use super::document::Document;
use super::ids::{ColorId, GradientId, NodeId, NodeKey};
use super::node::{
    Axis, Button, ComponentInstance, Image, MainComponent, Node, PreviewConfig, Rectangle,
    Screen, Spacer, Stack, Text,
};
use super::palette::{ColorValue, DocumentColor, DocumentGradient, Fill, GradientStop, Rgba};
use super::value::{Binding, ComponentReference, ImageRef, OverrideValue, PropertyValue};
use super::DataPath;

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn add(doc: &mut Document, parent: Option<NodeKey>, id: &str, node: impl Into<super::NodeKind>) -> NodeKey {
    let node = Node::new(nid(id), node);
    match parent {
        Some(parent) => doc.append_child(parent, node).expect("append child"),
        None => doc.insert_root(node).expect("insert root"),
    }
}

/// Two components (`card` embeds `badge` through a component-typed property) and two screens.
///
/// ```text
/// card (MainComponent: title, count, icon, badge=badge)
///   card-stack
///     card-title   text <- property(title)
///     card-badge   instance of property(badge), label <- property(title)
/// badge (MainComponent: label)
///   badge-text     text <- property(label)
/// screen
///   screen-stack
///     title        "Welcome"
///     instance-1   card, title="Hello", count="wrong kind"
///     button       navigate -> detail
/// detail
/// ```
pub(crate) fn card_screen() -> Document {
    let mut doc = Document::new();
    let brand = ColorId::new("brand").expect("color id");
    doc.colors_mut().insert(
        brand.clone(),
        DocumentColor {
            name: Some("Brand".to_owned()),
            color: Rgba::from_rgba8(0x33, 0x66, 0xff, 0xff),
        },
    );
    let sunset = GradientId::new("sunset").expect("gradient id");
    doc.gradients_mut().insert(
        sunset.clone(),
        DocumentGradient {
            name: None,
            angle: 90.0,
            stops: vec![
                GradientStop { location: 0.0, color: Rgba::WHITE },
                GradientStop { location: 1.0, color: Rgba::BLACK },
            ],
        },
    );

    let card = add(&mut doc, None, "card", MainComponent::default());
    let badge = add(&mut doc, None, "badge", MainComponent::default());

    let mut card_component = MainComponent::default();
    card_component.declare("title", PropertyValue::Text("Untitled".to_owned()));
    card_component.declare("count", PropertyValue::Number(0.0));
    card_component.declare("icon", PropertyValue::Image(ImageRef::new("placeholder")));
    card_component.declare("badge", PropertyValue::Component(badge));
    card_component.preview = PreviewConfig {
        data: Some(serde_json::json!({ "user": { "name": "Ada" } })),
        width: Some(320.0),
        height: None,
    };
    *doc.node_mut(card).expect("card").kind_mut() = card_component.into();

    let mut badge_component = MainComponent::default();
    badge_component.declare("label", PropertyValue::Text("New".to_owned()));
    *doc.node_mut(badge).expect("badge").kind_mut() = badge_component.into();

    let card_stack = add(
        &mut doc,
        Some(card),
        "card-stack",
        Stack { axis: Axis::Horizontal, spacing: Binding::Literal(4.0) },
    );
    let mut card_title = Text::new("");
    card_title.text = Binding::property("title");
    card_title.color = Some(ColorValue::Document(brand.clone()));
    add(&mut doc, Some(card_stack), "card-title", card_title);
    add(
        &mut doc,
        Some(card_stack),
        "card-badge",
        ComponentInstance::new(ComponentReference::Property("badge".into()))
            .with_override("label", OverrideValue::Text(Binding::property("title"))),
    );

    let mut badge_text = Text::new("");
    badge_text.text = Binding::property("label");
    add(&mut doc, Some(badge), "badge-text", badge_text);

    let screen = add(
        &mut doc,
        None,
        "screen",
        Screen {
            title: Some("Home".to_owned()),
            background: Some(Fill::DocumentGradient(sunset)),
        },
    );
    let detail = add(&mut doc, None, "detail", Screen::default());

    let screen_stack = add(&mut doc, Some(screen), "screen-stack", Stack::default());
    add(&mut doc, Some(screen_stack), "title", Text::new("Welcome"));
    add(
        &mut doc,
        Some(screen_stack),
        "instance-1",
        ComponentInstance::new(ComponentReference::Main(card))
            .with_override("title", OverrideValue::Text(Binding::Literal("Hello".to_owned())))
            .with_override(
                "count",
                OverrideValue::Text(Binding::Literal("wrong kind".to_owned())),
            ),
    );
    add(
        &mut doc,
        Some(screen_stack),
        "button",
        Button {
            actions: vec![
                Action::Navigate { destination: detail },
                Action::OpenUrl {
                    url: Binding::DataPath(DataPath::parse("links.help").expect("path")),
                },
            ],
        },
    );
    add(
        &mut doc,
        Some(screen_stack),
        "hero",
        Image::new(ImageRef::new("hero")),
    );
    add(
        &mut doc,
        Some(screen_stack),
        "panel",
        Rectangle {
            fill: Some(Fill::DocumentColor(brand)),
            corner_radius: Binding::Literal(12.0),
        },
    );
    add(&mut doc, Some(screen_stack), "gap", Spacer { min_length: Some(f64::INFINITY) });

    doc
}
