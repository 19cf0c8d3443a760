// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Writes documents in the current on-disk shape. There is no down-levelling: every field is
//! written the way [`CURRENT_DOCUMENT_VERSION`](crate::model::CURRENT_DOCUMENT_VERSION) reads it.

use serde_json::{json, Map, Value};
use thiserror::Error;

use super::document_json::{colors_to_json, gradients_to_json, metadata_to_json};
use super::record::float_to_json;
use super::value_codec::{
    empty_record, encode_binding, encode_color_value, encode_fill, encode_override_value,
    encode_property_value,
};
use super::variant::tagged;
use crate::model::{
    Action, ColorId, ComponentReference, Document, GradientId, Metadata, Node, NodeId, NodeKey,
    NodeKind,
};

#[derive(Debug, Error)]
pub enum EncodeError {
    /// A reference field holds a key that no longer names a live node.
    #[error("node {node}: `{field}` references {key}, which is not in the document")]
    DanglingReference {
        node: NodeId,
        field: &'static str,
        key: NodeKey,
    },
    /// A paint names a palette entry the document does not define.
    #[error("node {node}: `{field}` references {palette} {id}, which is not in the palette")]
    DanglingPalette {
        node: NodeId,
        field: &'static str,
        palette: &'static str,
        id: String,
    },
    #[error("{0} is not in the document")]
    UnknownNode(NodeKey),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Turns arena keys back into the ids written on disk.
pub(crate) struct RefWriter<'d> {
    document: &'d Document,
    owner: &'d NodeId,
}

impl RefWriter<'_> {
    pub fn id(&self, key: NodeKey, field: &'static str) -> Result<Value, EncodeError> {
        self.document
            .node(key)
            .map(|node| Value::String(node.id().to_string()))
            .ok_or_else(|| EncodeError::DanglingReference {
                node: self.owner.clone(),
                field,
                key,
            })
    }

    pub fn color(&self, id: &ColorId, field: &'static str) -> Result<Value, EncodeError> {
        if self.document.colors().contains_key(id) {
            Ok(Value::String(id.to_string()))
        } else {
            Err(self.dangling_palette("color", id.as_str(), field))
        }
    }

    pub fn gradient(&self, id: &GradientId, field: &'static str) -> Result<Value, EncodeError> {
        if self.document.gradients().contains_key(id) {
            Ok(Value::String(id.to_string()))
        } else {
            Err(self.dangling_palette("gradient", id.as_str(), field))
        }
    }

    fn dangling_palette(&self, palette: &'static str, id: &str, field: &'static str) -> EncodeError {
        EncodeError::DanglingPalette {
            node: self.owner.clone(),
            field,
            palette,
            id: id.to_owned(),
        }
    }
}

/// Encodes the whole document, metadata included.
pub fn encode_value(document: &Document) -> Result<Value, EncodeError> {
    let metadata = Metadata::default();
    let nodes = document
        .roots()
        .iter()
        .map(|&key| encode_node(document, key))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(json!({
        "metadata": serde_json::to_value(metadata_to_json(metadata))?,
        "document": {
            "nodes": nodes,
            "colors": serde_json::to_value(colors_to_json(document))?,
            "gradients": serde_json::to_value(gradients_to_json(document))?,
        },
    }))
}

pub fn to_vec_pretty(document: &Document) -> Result<Vec<u8>, EncodeError> {
    let value = encode_value(document)?;
    let mut out = serde_json::to_vec_pretty(&value)?;
    out.push(b'\n');
    Ok(out)
}

pub fn to_string_pretty(document: &Document) -> Result<String, EncodeError> {
    let value = encode_value(document)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Encodes one node and its subtree.
pub fn encode_node(document: &Document, key: NodeKey) -> Result<Value, EncodeError> {
    let node = document.node(key).ok_or(EncodeError::UnknownNode(key))?;

    let mut record = Map::new();
    record.insert("__typeName".to_owned(), Value::String(node.kind().type_name().to_owned()));
    record.insert("id".to_owned(), Value::String(node.id().to_string()));
    if let Some(name) = node.name() {
        record.insert("name".to_owned(), Value::String(name.to_owned()));
    }
    encode_kind(document, node, &mut record)?;

    if !node.children().is_empty() {
        let children = node
            .children()
            .iter()
            .map(|&child| encode_node(document, child))
            .collect::<Result<Vec<_>, _>>()?;
        record.insert("children".to_owned(), Value::Array(children));
    }
    Ok(Value::Object(record))
}

fn encode_kind(
    document: &Document,
    node: &Node,
    record: &mut Map<String, Value>,
) -> Result<(), EncodeError> {
    let refs = RefWriter {
        document,
        owner: node.id(),
    };
    let mut put = |key: &str, value: Value| {
        record.insert(key.to_owned(), value);
    };

    match node.kind() {
        NodeKind::Screen(screen) => {
            if let Some(title) = &screen.title {
                put("title", Value::String(title.clone()));
            }
            if let Some(background) = &screen.background {
                put("background", encode_fill(background, &refs, "background")?);
            }
        }
        NodeKind::Stack(stack) => {
            put("axis", Value::String(stack.axis.as_str().to_owned()));
            put("spacing", encode_binding(&stack.spacing));
        }
        NodeKind::Text(text) => {
            put("text", encode_binding(&text.text));
            put("fontSize", encode_binding(&text.font_size));
            if let Some(family) = &text.font_family {
                put("fontFamily", Value::String(family.clone()));
            }
            if let Some(color) = &text.color {
                put("color", encode_color_value(color, &refs, "color")?);
            }
        }
        NodeKind::Image(image) => {
            put("image", encode_binding(&image.image));
            put("contentMode", Value::String(image.content_mode.as_str().to_owned()));
        }
        NodeKind::Button(button) => {
            let actions = button
                .actions
                .iter()
                .map(|action| encode_action(action, &refs))
                .collect::<Result<Vec<_>, _>>()?;
            put("actions", Value::Array(actions));
        }
        NodeKind::Rectangle(rectangle) => {
            if let Some(fill) = &rectangle.fill {
                put("fill", encode_fill(fill, &refs, "fill")?);
            }
            put("cornerRadius", encode_binding(&rectangle.corner_radius));
        }
        NodeKind::Spacer(spacer) => {
            if let Some(min_length) = spacer.min_length {
                put("minLength", float_to_json(min_length));
            }
        }
        NodeKind::MainComponent(component) => {
            let properties = component
                .properties()
                .iter()
                .map(|(name, value)| {
                    Ok(json!({
                        "name": name.as_str(),
                        "value": encode_property_value(value, &refs, "properties")?,
                    }))
                })
                .collect::<Result<Vec<_>, EncodeError>>()?;
            put("properties", Value::Array(properties));

            let preview = &component.preview;
            let mut preview_record = Map::new();
            if let Some(data) = &preview.data {
                preview_record.insert("data".to_owned(), data.clone());
            }
            if let Some(width) = preview.width {
                preview_record.insert("width".to_owned(), float_to_json(width));
            }
            if let Some(height) = preview.height {
                preview_record.insert("height".to_owned(), float_to_json(height));
            }
            if !preview_record.is_empty() {
                put("preview", Value::Object(preview_record));
            }
        }
        NodeKind::ComponentInstance(instance) => {
            let value = match &instance.value {
                ComponentReference::Main(key) => tagged("component", refs.id(*key, "value")?),
                ComponentReference::Property(name) => {
                    tagged("property", Value::String(name.to_string()))
                }
            };
            put("value", value);

            let mut overrides = Map::new();
            for (name, value) in &instance.overrides {
                overrides.insert(
                    name.to_string(),
                    encode_override_value(value, &refs, "overrides")?,
                );
            }
            put("overrides", Value::Object(overrides));
        }
    }
    Ok(())
}

fn encode_action(action: &Action, refs: &RefWriter<'_>) -> Result<Value, EncodeError> {
    let payload = match action {
        Action::Navigate { destination } => {
            json!({ "destination": refs.id(*destination, "actions")? })
        }
        Action::OpenUrl { url } => json!({ "url": encode_binding(url) }),
        Action::Dismiss => empty_record(),
    };
    Ok(tagged(action.case_name(), payload))
}

impl Document {
    /// Compares two documents by what they would write to disk.
    ///
    /// Arena keys, tombstones and the source version are ignored; ids, names, children order,
    /// variant fields, references (by target id) and palettes are compared. NaN floats compare
    /// equal to each other. Documents that cannot be encoded are never equal.
    pub fn structurally_eq(&self, other: &Document) -> bool {
        match (encode_value(self), encode_value(other)) {
            (Ok(left), Ok(right)) => left == right,
            _ => false,
        }
    }
}
