// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Version-gated field decoders.
//!
//! Every versioned field has one public entry point that picks a branch from the record's
//! document version, plus one function per on-disk shape (`_v0` for the oldest, `_vNN` for the
//! shape introduced in version `NN`). Legacy branches return exactly what the current branch
//! returns; a shape from the wrong era is a [`DecodeError::VersionGap`].

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use super::coordinator::{LinkSlot, NodeScope};
use super::record::{as_object, has, kind_of, opt_array, opt_bool, opt_f64, opt_str, req_str, Site};
use super::value_codec::{
    decode_binding, decode_color_value, decode_fill, decode_override_value, decode_property_value,
    deferred_node_ref, property_name, ScalarCodec, BINDING_CASES, VALUE_CASES,
};
use super::variant::case_of;
use super::versions;
use super::DecodeError;
use crate::model::{
    Action, Axis, Binding, ColorValue, ComponentReference, ContentMode, Fill, OverrideValue,
    PreviewConfig, PropertyName, PropertyValue, Rgba,
};

fn upgraded(site: Site<'_>, field: &'static str) {
    debug!(
        node = site.node.map(|id| id.as_str()).unwrap_or_default(),
        type_name = site.type_name,
        field,
        version = site.version,
        "upgraded legacy field shape"
    );
}

fn is_binding_record(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|record| BINDING_CASES.iter().any(|case| record.contains_key(*case)))
}

fn name_from_key(raw: &str, site: Site<'_>, field: &'static str) -> Result<PropertyName, DecodeError> {
    if raw.is_empty() {
        return Err(site.malformed(field, "property name must not be empty"));
    }
    Ok(PropertyName::new(raw))
}

fn present<'v>(record: &'v Map<String, Value>, key: &str) -> Option<&'v Value> {
    record.get(key).filter(|value| !value.is_null())
}

// ---------------------------------------------------------------------------------------------
// Bindings
// ---------------------------------------------------------------------------------------------

/// Decodes a bound scalar field, using `default` when the field is absent.
pub(crate) fn bound<T: ScalarCodec>(
    record: &Map<String, Value>,
    key: &'static str,
    scope: &NodeScope<'_>,
    default: Option<T>,
) -> Result<Binding<T>, DecodeError> {
    let site = scope.site();
    match present(record, key) {
        Some(value) => bound_value(value, key, site),
        None => default
            .map(Binding::Literal)
            .ok_or_else(|| site.malformed(key, "required field is missing")),
    }
}

pub(crate) fn bound_value<T: ScalarCodec>(
    value: &Value,
    field: &'static str,
    site: Site<'_>,
) -> Result<Binding<T>, DecodeError> {
    if site.is_before(versions::BINDINGS) {
        bound_scalar_v0(value, field, site)
    } else {
        bound_scalar_v17(value, field, site)
    }
}

/// Raw scalar, lifted to a literal.
pub(crate) fn bound_scalar_v0<T: ScalarCodec>(
    value: &Value,
    field: &'static str,
    site: Site<'_>,
) -> Result<Binding<T>, DecodeError> {
    if is_binding_record(value) {
        return Err(site.gap(field));
    }
    let literal = T::decode_raw(value, site, field)?;
    upgraded(site, field);
    Ok(Binding::Literal(literal))
}

pub(crate) fn bound_scalar_v17<T: ScalarCodec>(
    value: &Value,
    field: &'static str,
    site: Site<'_>,
) -> Result<Binding<T>, DecodeError> {
    if !value.is_object() {
        return Err(site.gap(field));
    }
    decode_binding(value, site, field)
}

// ---------------------------------------------------------------------------------------------
// Stack
// ---------------------------------------------------------------------------------------------

pub(crate) fn stack_axis(record: &Map<String, Value>, scope: &NodeScope<'_>) -> Result<Axis, DecodeError> {
    if scope.site().is_before(versions::STACK_AXIS) {
        stack_axis_v0(record, scope.site())
    } else {
        stack_axis_v11(record, scope.site())
    }
}

pub(crate) fn stack_axis_v0(record: &Map<String, Value>, site: Site<'_>) -> Result<Axis, DecodeError> {
    if has(record, "axis") {
        return Err(site.gap("axis"));
    }
    let horizontal = opt_bool(record, "isHorizontal", site)?;
    if horizontal.is_some() {
        upgraded(site, "axis");
    }
    Ok(match horizontal {
        Some(true) => Axis::Horizontal,
        _ => Axis::Vertical,
    })
}

pub(crate) fn stack_axis_v11(record: &Map<String, Value>, site: Site<'_>) -> Result<Axis, DecodeError> {
    match opt_str(record, "axis", site)? {
        Some(raw) => Axis::parse(raw)
            .ok_or_else(|| site.malformed("axis", format!("unknown axis {raw:?}"))),
        None if has(record, "isHorizontal") => Err(site.gap("axis")),
        None => Ok(Axis::default()),
    }
}

// ---------------------------------------------------------------------------------------------
// Paints
// ---------------------------------------------------------------------------------------------

fn hex_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"^#([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})?$").ok()
        })
        .as_ref()
}

/// Parses `#RRGGBB` or `#RRGGBBAA`.
pub(crate) fn hex_color(raw: &str, field: &'static str, site: Site<'_>) -> Result<Rgba, DecodeError> {
    let invalid = || site.malformed(field, format!("invalid hex color {raw:?}"));
    let captures = hex_pattern().and_then(|re| re.captures(raw)).ok_or_else(invalid)?;
    let channel = |index: usize| -> Result<u8, DecodeError> {
        match captures.get(index) {
            Some(m) => u8::from_str_radix(m.as_str(), 16).map_err(|_| invalid()),
            None => Ok(u8::MAX),
        }
    };
    Ok(Rgba::from_rgba8(channel(1)?, channel(2)?, channel(3)?, channel(4)?))
}

pub(crate) fn fill(
    record: &Map<String, Value>,
    key: &'static str,
    scope: &mut NodeScope<'_>,
) -> Result<Option<Fill>, DecodeError> {
    let Some(value) = present(record, key) else {
        return Ok(None);
    };
    if scope.site().is_before(versions::TAGGED_FILLS) {
        solid_v0(value, key, scope.site()).map(|rgba| Some(Fill::Solid(rgba)))
    } else {
        fill_v13(value, key, scope).map(Some)
    }
}

/// A `#RRGGBB[AA]` string.
pub(crate) fn solid_v0(value: &Value, field: &'static str, site: Site<'_>) -> Result<Rgba, DecodeError> {
    match value {
        Value::String(raw) => {
            let rgba = hex_color(raw, field, site)?;
            upgraded(site, field);
            Ok(rgba)
        }
        Value::Object(_) => Err(site.gap(field)),
        other => Err(site.malformed(field, format!("expected a hex color, found {}", kind_of(other)))),
    }
}

pub(crate) fn fill_v13(
    value: &Value,
    field: &'static str,
    scope: &mut NodeScope<'_>,
) -> Result<Fill, DecodeError> {
    if value.is_string() {
        return Err(scope.site().gap(field));
    }
    decode_fill(value, scope, field)
}

pub(crate) fn color(
    record: &Map<String, Value>,
    key: &'static str,
    scope: &mut NodeScope<'_>,
) -> Result<Option<ColorValue>, DecodeError> {
    let Some(value) = present(record, key) else {
        return Ok(None);
    };
    if scope.site().is_before(versions::TAGGED_FILLS) {
        solid_v0(value, key, scope.site()).map(|rgba| Some(ColorValue::Solid(rgba)))
    } else {
        color_v13(value, key, scope).map(Some)
    }
}

pub(crate) fn color_v13(
    value: &Value,
    field: &'static str,
    scope: &mut NodeScope<'_>,
) -> Result<ColorValue, DecodeError> {
    if value.is_string() {
        return Err(scope.site().gap(field));
    }
    decode_color_value(value, scope, field)
}

// ---------------------------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------------------------

const ACTION_CASES: &[&str] = &["navigate", "openURL", "dismiss"];

pub(crate) fn button_actions(
    record: &Map<String, Value>,
    scope: &mut NodeScope<'_>,
) -> Result<Vec<Action>, DecodeError> {
    if scope.site().is_before(versions::BUTTON_ACTION_LIST) {
        button_actions_v0(record, scope)
    } else {
        button_actions_v14(record, scope)
    }
}

/// A single flat `action` record, or none.
pub(crate) fn button_actions_v0(
    record: &Map<String, Value>,
    scope: &mut NodeScope<'_>,
) -> Result<Vec<Action>, DecodeError> {
    let site = scope.site();
    if has(record, "actions") {
        return Err(site.gap("actions"));
    }
    let Some(value) = present(record, "action") else {
        return Ok(Vec::new());
    };
    let flat = as_object(value, site, "action")?;
    let action = match req_str(flat, "type", site)? {
        "navigate" => {
            let destination = flat
                .get("destination")
                .ok_or_else(|| site.malformed("action", "navigate action has no destination"))?;
            let destination =
                deferred_node_ref(destination, scope, LinkSlot::NavigateDestination(0), "action")?;
            Action::Navigate { destination }
        }
        "openURL" => {
            let url = flat
                .get("url")
                .ok_or_else(|| site.malformed("action", "openURL action has no url"))?;
            Action::OpenUrl {
                url: bound_value(url, "action", site)?,
            }
        }
        "dismiss" => Action::Dismiss,
        other => return Err(site.malformed("action", format!("unknown action type {other:?}"))),
    };
    upgraded(site, "actions");
    Ok(vec![action])
}

pub(crate) fn button_actions_v14(
    record: &Map<String, Value>,
    scope: &mut NodeScope<'_>,
) -> Result<Vec<Action>, DecodeError> {
    let site = scope.site();
    if has(record, "action") && !has(record, "actions") {
        return Err(site.gap("actions"));
    }
    opt_array(record, "actions", site)?
        .iter()
        .enumerate()
        .map(|(index, value)| action(value, index, scope))
        .collect()
}

fn action(value: &Value, index: usize, scope: &mut NodeScope<'_>) -> Result<Action, DecodeError> {
    let site = scope.site();
    let (case, payload) = case_of(value, ACTION_CASES, site, "actions")?;
    let payload = as_object(payload, site, "actions")?;
    Ok(match case {
        "navigate" => {
            let destination = payload
                .get("destination")
                .ok_or_else(|| site.malformed("actions", "navigate action has no destination"))?;
            Action::Navigate {
                destination: deferred_node_ref(
                    destination,
                    scope,
                    LinkSlot::NavigateDestination(index),
                    "actions",
                )?,
            }
        }
        "openURL" => {
            let url = payload
                .get("url")
                .ok_or_else(|| site.malformed("actions", "openURL action has no url"))?;
            Action::OpenUrl {
                url: bound_value(url, "actions", site)?,
            }
        }
        _ => Action::Dismiss,
    })
}

// ---------------------------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------------------------

pub(crate) fn content_mode(record: &Map<String, Value>, site: Site<'_>) -> Result<ContentMode, DecodeError> {
    match opt_str(record, "contentMode", site)? {
        Some(raw) => ContentMode::parse(raw)
            .ok_or_else(|| site.malformed("contentMode", format!("unknown content mode {raw:?}"))),
        None => Ok(ContentMode::default()),
    }
}

// ---------------------------------------------------------------------------------------------
// MainComponent
// ---------------------------------------------------------------------------------------------

pub(crate) fn component_properties(
    record: &Map<String, Value>,
    scope: &mut NodeScope<'_>,
) -> Result<IndexMap<PropertyName, PropertyValue>, DecodeError> {
    if scope.site().is_before(versions::PROPERTY_LIST) {
        component_properties_v0(record, scope)
    } else {
        component_properties_v16(record, scope)
    }
}

/// An object keyed by property name, in file order.
pub(crate) fn component_properties_v0(
    record: &Map<String, Value>,
    scope: &mut NodeScope<'_>,
) -> Result<IndexMap<PropertyName, PropertyValue>, DecodeError> {
    let site = scope.site();
    let Some(value) = present(record, "properties") else {
        return Ok(IndexMap::new());
    };
    let Value::Object(entries) = value else {
        return Err(if value.is_array() {
            site.gap("properties")
        } else {
            site.malformed("properties", format!("expected an object, found {}", kind_of(value)))
        });
    };

    let mut properties = IndexMap::with_capacity(entries.len());
    for (raw_name, value) in entries {
        let name = name_from_key(raw_name, site, "properties")?;
        let default = decode_property_value(
            value,
            scope,
            LinkSlot::PropertyDefault(name.clone()),
            "properties",
        )?;
        properties.insert(name, default);
    }
    if !properties.is_empty() {
        upgraded(site, "properties");
    }
    Ok(properties)
}

pub(crate) fn component_properties_v16(
    record: &Map<String, Value>,
    scope: &mut NodeScope<'_>,
) -> Result<IndexMap<PropertyName, PropertyValue>, DecodeError> {
    let site = scope.site();
    if present(record, "properties").is_some_and(Value::is_object) {
        return Err(site.gap("properties"));
    }

    let entries = opt_array(record, "properties", site)?;
    let mut properties = IndexMap::with_capacity(entries.len());
    for entry in entries {
        let entry = as_object(entry, site, "properties")?;
        let name = property_name(
            entry.get("name").unwrap_or(&Value::Null),
            site,
            "properties",
        )?;
        if properties.contains_key(&name) {
            return Err(site.malformed("properties", format!("property {name:?} is declared twice")));
        }
        let value = entry
            .get("value")
            .ok_or_else(|| site.malformed("properties", format!("property {name:?} has no value")))?;
        let default = decode_property_value(
            value,
            scope,
            LinkSlot::PropertyDefault(name.clone()),
            "properties",
        )?;
        properties.insert(name, default);
    }
    Ok(properties)
}

pub(crate) fn preview(record: &Map<String, Value>, site: Site<'_>) -> Result<PreviewConfig, DecodeError> {
    let Some(value) = present(record, "preview") else {
        return Ok(PreviewConfig::default());
    };
    let preview = as_object(value, site, "preview")?;
    Ok(PreviewConfig {
        data: preview.get("data").cloned(),
        width: opt_f64(preview, "width", site)?,
        height: opt_f64(preview, "height", site)?,
    })
}

// ---------------------------------------------------------------------------------------------
// ComponentInstance
// ---------------------------------------------------------------------------------------------

const REFERENCE_CASES: &[&str] = &["component", "property"];

pub(crate) fn instance_value(
    record: &Map<String, Value>,
    scope: &mut NodeScope<'_>,
) -> Result<ComponentReference, DecodeError> {
    if scope.site().is_before(versions::INSTANCE_VALUE_REFERENCE) {
        instance_value_v0(record, scope)
    } else {
        instance_value_v12(record, scope)
    }
}

/// A bare `component` id.
pub(crate) fn instance_value_v0(
    record: &Map<String, Value>,
    scope: &mut NodeScope<'_>,
) -> Result<ComponentReference, DecodeError> {
    let site = scope.site();
    let Some(target) = present(record, "component") else {
        return Err(if has(record, "value") {
            site.gap("value")
        } else {
            site.malformed("component", "required field is missing")
        });
    };
    let key = deferred_node_ref(target, scope, LinkSlot::InstanceValue, "value")?;
    upgraded(site, "value");
    Ok(ComponentReference::Main(key))
}

pub(crate) fn instance_value_v12(
    record: &Map<String, Value>,
    scope: &mut NodeScope<'_>,
) -> Result<ComponentReference, DecodeError> {
    let site = scope.site();
    let Some(value) = present(record, "value") else {
        return Err(if has(record, "component") {
            site.gap("value")
        } else {
            site.malformed("value", "required field is missing")
        });
    };
    let (case, payload) = case_of(value, REFERENCE_CASES, site, "value")?;
    match case {
        "component" => deferred_node_ref(payload, scope, LinkSlot::InstanceValue, "value")
            .map(ComponentReference::Main),
        _ => property_name(payload, site, "value").map(ComponentReference::Property),
    }
}

pub(crate) fn instance_overrides(
    record: &Map<String, Value>,
    scope: &mut NodeScope<'_>,
) -> Result<IndexMap<PropertyName, OverrideValue>, DecodeError> {
    let site = scope.site();
    let Some(value) = present(record, "overrides") else {
        return Ok(IndexMap::new());
    };
    let entries = as_object(value, site, "overrides")?;
    let legacy = site.is_before(versions::OVERRIDE_BINDINGS);

    let mut overrides = IndexMap::with_capacity(entries.len());
    for (raw_name, value) in entries {
        let name = name_from_key(raw_name, site, "overrides")?;
        let decoded = if legacy {
            override_v0(value, &name, scope)?
        } else {
            override_v19(value, &name, scope)?
        };
        overrides.insert(name, decoded);
    }
    if legacy && !overrides.is_empty() {
        upgraded(site, "overrides");
    }
    Ok(overrides)
}

/// A plain property value, lifted to a literal binding.
pub(crate) fn override_v0(
    value: &Value,
    name: &PropertyName,
    scope: &mut NodeScope<'_>,
) -> Result<OverrideValue, DecodeError> {
    let site = scope.site();
    let (_, payload) = case_of(value, VALUE_CASES, site, "overrides")?;
    if is_binding_record(payload) {
        return Err(site.gap("overrides"));
    }
    let value = decode_property_value(
        value,
        scope,
        LinkSlot::OverrideComponent(name.clone()),
        "overrides",
    )?;
    Ok(OverrideValue::from(value))
}

pub(crate) fn override_v19(
    value: &Value,
    name: &PropertyName,
    scope: &mut NodeScope<'_>,
) -> Result<OverrideValue, DecodeError> {
    let site = scope.site();
    let (_, payload) = case_of(value, VALUE_CASES, site, "overrides")?;
    if !payload.is_object() {
        return Err(site.gap("overrides"));
    }
    decode_override_value(value, scope, name, "overrides")
}
