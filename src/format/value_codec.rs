// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Current-shape codec for scalar values, bindings, property/override values, and paints.
//!
//! Legacy shapes are handled in [`super::fields`]; everything here reads and writes what
//! [`super::versions::CURRENT_DOCUMENT_VERSION`] documents contain.

use serde_json::{json, Map, Value};

use super::coordinator::{LinkSlot, NodeScope, PaletteTarget};
use super::encode::{EncodeError, RefWriter};
use super::record::{float_from_json, float_to_json, kind_of, Site};
use super::variant::{case_of, tagged};
use super::DecodeError;
use crate::model::{
    Binding, ColorId, ColorValue, DataPath, Fill, GradientId, ImageRef, NodeId, NodeKey,
    OverrideValue, PropertyName, PropertyValue, Rgba,
};

pub(crate) const BINDING_CASES: &[&str] = &["literal", "property", "dataPath"];
pub(crate) const VALUE_CASES: &[&str] = &["text", "number", "boolean", "image", "component"];
pub(crate) const FILL_CASES: &[&str] = &["solid", "documentColor", "documentGradient"];
pub(crate) const COLOR_CASES: &[&str] = &["solid", "documentColor"];

/// A scalar with a raw (un-tagged) JSON spelling.
pub(crate) trait ScalarCodec: Sized {
    fn decode_raw(value: &Value, site: Site<'_>, field: &'static str) -> Result<Self, DecodeError>;

    fn encode_raw(&self) -> Value;
}

impl ScalarCodec for String {
    fn decode_raw(value: &Value, site: Site<'_>, field: &'static str) -> Result<Self, DecodeError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(site.malformed(field, format!("expected text, found {}", kind_of(other)))),
        }
    }

    fn encode_raw(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ScalarCodec for f64 {
    fn decode_raw(value: &Value, site: Site<'_>, field: &'static str) -> Result<Self, DecodeError> {
        float_from_json(value)
            .ok_or_else(|| site.malformed(field, format!("expected a number, found {}", kind_of(value))))
    }

    fn encode_raw(&self) -> Value {
        float_to_json(*self)
    }
}

impl ScalarCodec for bool {
    fn decode_raw(value: &Value, site: Site<'_>, field: &'static str) -> Result<Self, DecodeError> {
        value
            .as_bool()
            .ok_or_else(|| site.malformed(field, format!("expected a boolean, found {}", kind_of(value))))
    }

    fn encode_raw(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ScalarCodec for ImageRef {
    fn decode_raw(value: &Value, site: Site<'_>, field: &'static str) -> Result<Self, DecodeError> {
        match value {
            Value::String(s) if !s.is_empty() => Ok(ImageRef::new(s.clone())),
            Value::String(_) => Err(site.malformed(field, "image reference must not be empty")),
            other => Err(site.malformed(
                field,
                format!("expected an image reference, found {}", kind_of(other)),
            )),
        }
    }

    fn encode_raw(&self) -> Value {
        Value::String(self.as_str().to_owned())
    }
}

/// Decodes a binding record, delegating the `literal` payload to `literal`.
pub(crate) fn decode_binding_with<T>(
    value: &Value,
    site: Site<'_>,
    field: &'static str,
    literal: impl FnOnce(&Value) -> Result<T, DecodeError>,
) -> Result<Binding<T>, DecodeError> {
    let (case, payload) = case_of(value, BINDING_CASES, site, field)?;
    match case {
        "literal" => literal(payload).map(Binding::Literal),
        "property" => property_name(payload, site, field).map(Binding::Property),
        _ => {
            let raw = payload.as_str().ok_or_else(|| {
                site.malformed(field, format!("data path must be text, found {}", kind_of(payload)))
            })?;
            DataPath::parse(raw)
                .map(Binding::DataPath)
                .map_err(|err| site.malformed(field, format!("invalid data path {raw:?}: {err}")))
        }
    }
}

pub(crate) fn decode_binding<T: ScalarCodec>(
    value: &Value,
    site: Site<'_>,
    field: &'static str,
) -> Result<Binding<T>, DecodeError> {
    decode_binding_with(value, site, field, |payload| T::decode_raw(payload, site, field))
}

pub(crate) fn encode_binding_with<T>(
    binding: &Binding<T>,
    literal: impl FnOnce(&T) -> Result<Value, EncodeError>,
) -> Result<Value, EncodeError> {
    Ok(match binding {
        Binding::Literal(value) => tagged("literal", literal(value)?),
        Binding::Property(name) => tagged("property", Value::String(name.to_string())),
        Binding::DataPath(path) => tagged("dataPath", Value::String(path.as_str().to_owned())),
    })
}

pub(crate) fn encode_binding<T: ScalarCodec>(binding: &Binding<T>) -> Value {
    match binding {
        Binding::Literal(value) => tagged("literal", value.encode_raw()),
        Binding::Property(name) => tagged("property", Value::String(name.to_string())),
        Binding::DataPath(path) => tagged("dataPath", Value::String(path.as_str().to_owned())),
    }
}

pub(crate) fn property_name(
    value: &Value,
    site: Site<'_>,
    field: &'static str,
) -> Result<PropertyName, DecodeError> {
    match value {
        Value::String(s) if !s.is_empty() => Ok(PropertyName::new(s)),
        Value::String(_) => Err(site.malformed(field, "property name must not be empty")),
        other => Err(site.malformed(
            field,
            format!("expected a property name, found {}", kind_of(other)),
        )),
    }
}

/// Reads a node id and queues the link that will patch `slot` once every node is known.
pub(crate) fn deferred_node_ref(
    value: &Value,
    scope: &mut NodeScope<'_>,
    slot: LinkSlot,
    field: &'static str,
) -> Result<NodeKey, DecodeError> {
    let site = scope.site();
    let raw = value.as_str().ok_or_else(|| {
        site.malformed(field, format!("expected a node id, found {}", kind_of(value)))
    })?;
    let target = NodeId::new(raw).map_err(|source| DecodeError::InvalidId {
        field,
        value: raw.to_owned(),
        source,
    })?;
    scope.defer_link(slot, target, field);
    Ok(NodeKey::UNRESOLVED)
}

/// Decodes a tagged property value. Component values are linked into `slot`.
pub(crate) fn decode_property_value(
    value: &Value,
    scope: &mut NodeScope<'_>,
    slot: LinkSlot,
    field: &'static str,
) -> Result<PropertyValue, DecodeError> {
    let site = scope.site();
    let (case, payload) = case_of(value, VALUE_CASES, site, field)?;
    Ok(match case {
        "text" => PropertyValue::Text(String::decode_raw(payload, site, field)?),
        "number" => PropertyValue::Number(f64::decode_raw(payload, site, field)?),
        "boolean" => PropertyValue::Boolean(bool::decode_raw(payload, site, field)?),
        "image" => PropertyValue::Image(ImageRef::decode_raw(payload, site, field)?),
        _ => PropertyValue::Component(deferred_node_ref(payload, scope, slot, field)?),
    })
}

pub(crate) fn encode_property_value(
    value: &PropertyValue,
    refs: &RefWriter<'_>,
    field: &'static str,
) -> Result<Value, EncodeError> {
    Ok(match value {
        PropertyValue::Text(v) => tagged("text", v.encode_raw()),
        PropertyValue::Number(v) => tagged("number", v.encode_raw()),
        PropertyValue::Boolean(v) => tagged("boolean", v.encode_raw()),
        PropertyValue::Image(v) => tagged("image", v.encode_raw()),
        PropertyValue::Component(key) => tagged("component", refs.id(*key, field)?),
    })
}

/// Decodes a current-shape override: a value case whose payload is a binding.
pub(crate) fn decode_override_value(
    value: &Value,
    scope: &mut NodeScope<'_>,
    name: &PropertyName,
    field: &'static str,
) -> Result<OverrideValue, DecodeError> {
    let site = scope.site();
    let (case, payload) = case_of(value, VALUE_CASES, site, field)?;
    Ok(match case {
        "text" => OverrideValue::Text(decode_binding(payload, site, field)?),
        "number" => OverrideValue::Number(decode_binding(payload, site, field)?),
        "boolean" => OverrideValue::Boolean(decode_binding(payload, site, field)?),
        "image" => OverrideValue::Image(decode_binding(payload, site, field)?),
        _ => {
            let slot = LinkSlot::OverrideComponent(name.clone());
            OverrideValue::Component(decode_binding_with(payload, site, field, |literal| {
                deferred_node_ref(literal, scope, slot, field)
            })?)
        }
    })
}

pub(crate) fn encode_override_value(
    value: &OverrideValue,
    refs: &RefWriter<'_>,
    field: &'static str,
) -> Result<Value, EncodeError> {
    let kind = value.kind();
    let payload = match value {
        OverrideValue::Text(b) => encode_binding(b),
        OverrideValue::Number(b) => encode_binding(b),
        OverrideValue::Boolean(b) => encode_binding(b),
        OverrideValue::Image(b) => encode_binding(b),
        OverrideValue::Component(b) => encode_binding_with(b, |key| refs.id(*key, field))?,
    };
    Ok(tagged(kind.as_str(), payload))
}

pub(crate) fn decode_rgba(
    value: &Value,
    site: Site<'_>,
    field: &'static str,
) -> Result<Rgba, DecodeError> {
    let Value::Object(record) = value else {
        return Err(site.malformed(field, format!("expected a color, found {}", kind_of(value))));
    };
    let channel = |key: &str, default: Option<f64>| -> Result<f64, DecodeError> {
        match record.get(key) {
            Some(v) => float_from_json(v).ok_or_else(|| {
                site.malformed(field, format!("color channel `{key}` must be a number"))
            }),
            None => default.ok_or_else(|| {
                site.malformed(field, format!("color channel `{key}` is missing"))
            }),
        }
    };
    Ok(Rgba::new(
        channel("r", None)?,
        channel("g", None)?,
        channel("b", None)?,
        channel("a", Some(1.0))?,
    ))
}

pub(crate) fn encode_rgba(rgba: Rgba) -> Value {
    json!({
        "r": float_to_json(rgba.r),
        "g": float_to_json(rgba.g),
        "b": float_to_json(rgba.b),
        "a": float_to_json(rgba.a),
    })
}

fn palette_id<T>(
    payload: &Value,
    site: Site<'_>,
    field: &'static str,
) -> Result<crate::model::Id<T>, DecodeError> {
    let raw = payload.as_str().ok_or_else(|| {
        site.malformed(field, format!("expected a palette id, found {}", kind_of(payload)))
    })?;
    crate::model::Id::new(raw).map_err(|source| DecodeError::InvalidId {
        field,
        value: raw.to_owned(),
        source,
    })
}

pub(crate) fn decode_fill(
    value: &Value,
    scope: &mut NodeScope<'_>,
    field: &'static str,
) -> Result<Fill, DecodeError> {
    let site = scope.site();
    let (case, payload) = case_of(value, FILL_CASES, site, field)?;
    Ok(match case {
        "solid" => Fill::Solid(decode_rgba(payload, site, field)?),
        "documentColor" => {
            let id: ColorId = palette_id(payload, site, field)?;
            scope.defer_palette(PaletteTarget::Color(id.clone()), field);
            Fill::DocumentColor(id)
        }
        _ => {
            let id: GradientId = palette_id(payload, site, field)?;
            scope.defer_palette(PaletteTarget::Gradient(id.clone()), field);
            Fill::DocumentGradient(id)
        }
    })
}

pub(crate) fn decode_color_value(
    value: &Value,
    scope: &mut NodeScope<'_>,
    field: &'static str,
) -> Result<ColorValue, DecodeError> {
    let site = scope.site();
    let (case, payload) = case_of(value, COLOR_CASES, site, field)?;
    Ok(match case {
        "solid" => ColorValue::Solid(decode_rgba(payload, site, field)?),
        _ => {
            let id: ColorId = palette_id(payload, site, field)?;
            scope.defer_palette(PaletteTarget::Color(id.clone()), field);
            ColorValue::Document(id)
        }
    })
}

pub(crate) fn encode_fill(
    fill: &Fill,
    refs: &RefWriter<'_>,
    field: &'static str,
) -> Result<Value, EncodeError> {
    Ok(match fill {
        Fill::Solid(rgba) => tagged("solid", encode_rgba(*rgba)),
        Fill::DocumentColor(id) => tagged("documentColor", refs.color(id, field)?),
        Fill::DocumentGradient(id) => tagged("documentGradient", refs.gradient(id, field)?),
    })
}

pub(crate) fn encode_color_value(
    color: &ColorValue,
    refs: &RefWriter<'_>,
    field: &'static str,
) -> Result<Value, EncodeError> {
    Ok(match color {
        ColorValue::Solid(rgba) => tagged("solid", encode_rgba(*rgba)),
        ColorValue::Document(id) => tagged("documentColor", refs.color(id, field)?),
    })
}

pub(crate) fn empty_record() -> Value {
    Value::Object(Map::new())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{decode_binding, decode_rgba, encode_binding};
    use crate::format::record::Site;
    use crate::format::DecodeError;
    use crate::model::{Binding, DataPath, Rgba};

    fn site() -> Site<'static> {
        Site { type_name: "Text", node: None, version: 21 }
    }

    #[test]
    fn binding_cases_decode() {
        let literal: Binding<f64> = decode_binding(&json!({ "literal": "inf" }), site(), "fontSize")
            .expect("literal");
        assert_eq!(literal, Binding::Literal(f64::INFINITY));

        let property: Binding<String> =
            decode_binding(&json!({ "property": "title" }), site(), "text").expect("property");
        assert_eq!(property, Binding::property("title"));

        let path: Binding<String> =
            decode_binding(&json!({ "dataPath": "user.name" }), site(), "text").expect("path");
        assert_eq!(path, Binding::DataPath(DataPath::parse("user.name").expect("parse")));
        assert_eq!(encode_binding(&path), json!({ "dataPath": "user.name" }));
    }

    #[test]
    fn binding_literal_type_mismatch_is_malformed() {
        let err = decode_binding::<f64>(&json!({ "literal": "big" }), site(), "fontSize")
            .unwrap_err();
        assert!(matches!(err, DecodeError::MalformedValue { field: "fontSize", .. }));

        let err = decode_binding::<String>(&json!({ "dataPath": "a..b" }), site(), "text")
            .unwrap_err();
        assert!(err.to_string().contains("invalid data path"), "{err}");
    }

    #[test]
    fn rgba_alpha_defaults_to_opaque() {
        let rgba = decode_rgba(&json!({ "r": 1, "g": 0.5, "b": 0 }), site(), "color").expect("rgba");
        assert_eq!(rgba, Rgba::new(1.0, 0.5, 0.0, 1.0));
        assert!(decode_rgba(&json!({ "r": 1 }), site(), "color").is_err());
    }
}
