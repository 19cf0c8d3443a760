// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{Map, Value};

use super::coordinator::NodeScope;
use super::fields;
use super::record::{opt_f64, opt_str};
use super::DecodeError;
use crate::model::{
    Button, ComponentInstance, Image, MainComponent, NodeKind, Rectangle, Screen, Spacer, Stack,
    Text, DEFAULT_FONT_SIZE, DEFAULT_STACK_SPACING,
};

/// Every `__typeName` this build understands.
pub const KNOWN_TAGS: &[&str] = &[
    "Screen",
    "Stack",
    "Text",
    "Image",
    "Button",
    "Rectangle",
    "Spacer",
    "MainComponent",
    "ComponentInstance",
];

/// A recognised node discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeTag {
    Screen,
    Stack,
    Text,
    Image,
    Button,
    Rectangle,
    Spacer,
    MainComponent,
    ComponentInstance,
}

impl NodeTag {
    /// `None` for tags written by newer or foreign tools.
    pub fn parse(tag: &str) -> Option<Self> {
        Some(match tag {
            "Screen" => Self::Screen,
            "Stack" => Self::Stack,
            "Text" => Self::Text,
            "Image" => Self::Image,
            "Button" => Self::Button,
            "Rectangle" => Self::Rectangle,
            "Spacer" => Self::Spacer,
            "MainComponent" => Self::MainComponent,
            "ComponentInstance" => Self::ComponentInstance,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Screen => "Screen",
            Self::Stack => "Stack",
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Button => "Button",
            Self::Rectangle => "Rectangle",
            Self::Spacer => "Spacer",
            Self::MainComponent => "MainComponent",
            Self::ComponentInstance => "ComponentInstance",
        }
    }

    /// Decodes the variant fields of a record. Common fields (`id`, `name`, `children`) are the
    /// coordinator's business.
    pub fn decode(
        self,
        record: &Map<String, Value>,
        scope: &mut NodeScope<'_>,
    ) -> Result<NodeKind, DecodeError> {
        let site = scope.site();
        Ok(match self {
            Self::Screen => NodeKind::Screen(Screen {
                title: opt_str(record, "title", site)?.map(str::to_owned),
                background: fields::fill(record, "background", scope)?,
            }),
            Self::Stack => NodeKind::Stack(Stack {
                axis: fields::stack_axis(record, scope)?,
                spacing: fields::bound(record, "spacing", scope, Some(DEFAULT_STACK_SPACING))?,
            }),
            Self::Text => NodeKind::Text(Text {
                text: fields::bound(record, "text", scope, Some(String::new()))?,
                font_size: fields::bound(record, "fontSize", scope, Some(DEFAULT_FONT_SIZE))?,
                font_family: opt_str(record, "fontFamily", site)?.map(str::to_owned),
                color: fields::color(record, "color", scope)?,
            }),
            Self::Image => NodeKind::Image(Image {
                image: fields::bound(record, "image", scope, None)?,
                content_mode: fields::content_mode(record, site)?,
            }),
            Self::Button => NodeKind::Button(Button {
                actions: fields::button_actions(record, scope)?,
            }),
            Self::Rectangle => NodeKind::Rectangle(Rectangle {
                fill: fields::fill(record, "fill", scope)?,
                corner_radius: fields::bound(record, "cornerRadius", scope, Some(0.0))?,
            }),
            Self::Spacer => NodeKind::Spacer(Spacer {
                min_length: opt_f64(record, "minLength", site)?,
            }),
            Self::MainComponent => {
                let mut component = MainComponent::default();
                for (name, default) in fields::component_properties(record, scope)? {
                    component.declare(name, default);
                }
                component.preview = fields::preview(record, site)?;
                NodeKind::MainComponent(component)
            }
            Self::ComponentInstance => NodeKind::ComponentInstance(ComponentInstance {
                value: fields::instance_value(record, scope)?,
                overrides: fields::instance_overrides(record, scope)?,
            }),
        })
    }
}
