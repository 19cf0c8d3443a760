// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use indexmap::IndexMap;

use super::action::Action;
use super::ids::{NodeId, NodeKey};
use super::palette::{ColorValue, Fill};
use super::value::{Binding, ComponentReference, ImageRef, OverrideValue, PropertyName, PropertyValue};

/// One element of the document tree.
///
/// `parent` is a non-owning back-edge maintained by the [`Document`](super::Document); `children`
/// owns the subtree. Both are arena keys, never ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    name: Option<String>,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    kind: NodeKind,
}

impl Node {
    pub fn new(id: NodeId, kind: impl Into<NodeKind>) -> Self {
        Self {
            id,
            name: None,
            parent: None,
            children: Vec::new(),
            kind: kind.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub(crate) fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name<T: Into<String>>(&mut self, name: Option<T>) {
        self.name = name.map(Into::into);
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    pub fn as_main_component(&self) -> Option<&MainComponent> {
        match &self.kind {
            NodeKind::MainComponent(component) => Some(component),
            _ => None,
        }
    }

    pub fn as_component_instance(&self) -> Option<&ComponentInstance> {
        match &self.kind {
            NodeKind::ComponentInstance(instance) => Some(instance),
            _ => None,
        }
    }
}

/// The closed set of node variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Screen(Screen),
    Stack(Stack),
    Text(Text),
    Image(Image),
    Button(Button),
    Rectangle(Rectangle),
    Spacer(Spacer),
    MainComponent(MainComponent),
    ComponentInstance(ComponentInstance),
}

impl NodeKind {
    /// The `__typeName` discriminator written for this variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Screen(_) => "Screen",
            Self::Stack(_) => "Stack",
            Self::Text(_) => "Text",
            Self::Image(_) => "Image",
            Self::Button(_) => "Button",
            Self::Rectangle(_) => "Rectangle",
            Self::Spacer(_) => "Spacer",
            Self::MainComponent(_) => "MainComponent",
            Self::ComponentInstance(_) => "ComponentInstance",
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for NodeKind {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_variant!(
    Screen,
    Stack,
    Text,
    Image,
    Button,
    Rectangle,
    Spacer,
    MainComponent,
    ComponentInstance,
);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Screen {
    pub title: Option<String>,
    pub background: Option<Fill>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
    /// Children overlap, back to front.
    Depth,
}

impl Axis {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::Depth => "depth",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "vertical" => Some(Self::Vertical),
            "horizontal" => Some(Self::Horizontal),
            "depth" => Some(Self::Depth),
            _ => None,
        }
    }
}

pub const DEFAULT_STACK_SPACING: f64 = 8.0;
pub const DEFAULT_FONT_SIZE: f64 = 17.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    pub axis: Axis,
    pub spacing: Binding<f64>,
}

impl Default for Stack {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            spacing: Binding::Literal(DEFAULT_STACK_SPACING),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub text: Binding<String>,
    pub font_size: Binding<f64>,
    pub font_family: Option<String>,
    pub color: Option<ColorValue>,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Binding::Literal(text.into()),
            font_size: Binding::Literal(DEFAULT_FONT_SIZE),
            font_family: None,
            color: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentMode {
    #[default]
    Fit,
    Fill,
}

impl ContentMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Fill => "fill",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fit" => Some(Self::Fit),
            "fill" => Some(Self::Fill),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub image: Binding<ImageRef>,
    pub content_mode: ContentMode,
}

impl Image {
    pub fn new(image: ImageRef) -> Self {
        Self {
            image: Binding::Literal(image),
            content_mode: ContentMode::Fit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Button {
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub fill: Option<Fill>,
    pub corner_radius: Binding<f64>,
}

impl Default for Rectangle {
    fn default() -> Self {
        Self {
            fill: None,
            corner_radius: Binding::Literal(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spacer {
    pub min_length: Option<f64>,
}

/// How the editor previews a component in isolation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreviewConfig {
    /// Sample external data fed to `dataPath` bindings.
    pub data: Option<serde_json::Value>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// A reusable definition with named, typed, default-valued properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MainComponent {
    properties: IndexMap<PropertyName, PropertyValue>,
    pub preview: PreviewConfig,
}

impl MainComponent {
    pub fn properties(&self) -> &IndexMap<PropertyName, PropertyValue> {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut PropertyValue> {
        self.properties.get_mut(name)
    }

    /// Declares a property, or replaces the default of an existing one in place.
    ///
    /// Returns the previous default when the name was already declared.
    pub fn declare(
        &mut self,
        name: impl Into<PropertyName>,
        default: PropertyValue,
    ) -> Option<PropertyValue> {
        self.properties.insert(name.into(), default)
    }
}

/// A placement of a main component with optional per-property overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInstance {
    pub value: ComponentReference,
    pub overrides: IndexMap<PropertyName, OverrideValue>,
}

impl ComponentInstance {
    pub fn new(value: ComponentReference) -> Self {
        Self {
            value,
            overrides: IndexMap::new(),
        }
    }

    pub fn with_override(mut self, name: impl Into<PropertyName>, value: OverrideValue) -> Self {
        self.overrides.insert(name.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, MainComponent, Node, NodeKind, Text};
    use crate::model::{NodeId, PropertyValue};

    #[test]
    fn declare_keeps_declaration_order_and_replaces_in_place() {
        let mut component = MainComponent::default();
        component.declare("title", PropertyValue::Text("Hello".to_owned()));
        component.declare("count", PropertyValue::Number(1.0));
        let previous = component.declare("title", PropertyValue::Text("Bye".to_owned()));

        assert_eq!(previous, Some(PropertyValue::Text("Hello".to_owned())));
        let names = component.properties().keys().map(|k| k.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["title", "count"]);
    }

    #[test]
    fn axis_parses_its_own_spelling() {
        for axis in [Axis::Vertical, Axis::Horizontal, Axis::Depth] {
            assert_eq!(Axis::parse(axis.as_str()), Some(axis));
        }
        assert_eq!(Axis::parse("diagonal"), None);
    }

    #[test]
    fn node_reports_type_name() {
        let node = Node::new(NodeId::new("t1").expect("id"), Text::new("Hi")).with_name("Title");
        assert_eq!(node.kind().type_name(), "Text");
        assert_eq!(node.name(), Some("Title"));
        assert!(matches!(node.kind(), NodeKind::Text(_)));
    }
}
