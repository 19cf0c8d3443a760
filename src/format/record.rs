// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Typed accessors over raw JSON records, plus the textual encoding of non-finite floats.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::DecodeError;
use crate::model::NodeId;

/// Where a value is being decoded, for error reporting and version gating.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Site<'a> {
    pub type_name: &'static str,
    pub node: Option<&'a NodeId>,
    pub version: u32,
}

impl<'a> Site<'a> {
    pub fn malformed(&self, field: &'static str, reason: impl Into<String>) -> DecodeError {
        DecodeError::MalformedValue {
            type_name: self.type_name,
            field,
            node: self.node.cloned(),
            reason: reason.into(),
        }
    }

    pub fn gap(&self, field: &'static str) -> DecodeError {
        DecodeError::VersionGap {
            type_name: self.type_name,
            field,
            version: self.version,
            node: self.node.cloned(),
        }
    }

    pub fn is_before(&self, version: u32) -> bool {
        self.version < version
    }
}

pub(crate) const INF: &str = "inf";
pub(crate) const NEG_INF: &str = "-inf";
pub(crate) const NAN: &str = "nan";

/// Reads a float written either as a JSON number or as one of the non-finite spellings.
pub(crate) fn float_from_json(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.as_str() {
            INF => Some(f64::INFINITY),
            NEG_INF => Some(f64::NEG_INFINITY),
            NAN => Some(f64::NAN),
            _ => None,
        },
        _ => None,
    }
}

pub(crate) fn float_to_json(value: f64) -> Value {
    if value.is_nan() {
        Value::String(NAN.to_owned())
    } else if value == f64::INFINITY {
        Value::String(INF.to_owned())
    } else if value == f64::NEG_INFINITY {
        Value::String(NEG_INF.to_owned())
    } else {
        serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

/// Serde adapter for floats inside derive-based records (metadata and palettes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct JsonFloat(pub f64);

impl<'de> Deserialize<'de> for JsonFloat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        float_from_json(&value).map(JsonFloat).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "expected a number or one of \"{INF}\", \"{NEG_INF}\", \"{NAN}\", found {value}"
            ))
        })
    }
}

impl Serialize for JsonFloat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        float_to_json(self.0).serialize(serializer)
    }
}

pub(crate) fn as_object<'v>(
    value: &'v Value,
    site: Site<'_>,
    field: &'static str,
) -> Result<&'v Map<String, Value>, DecodeError> {
    value
        .as_object()
        .ok_or_else(|| site.malformed(field, format!("expected an object, found {}", kind_of(value))))
}

pub(crate) fn opt_str<'v>(
    record: &'v Map<String, Value>,
    key: &'static str,
    site: Site<'_>,
) -> Result<Option<&'v str>, DecodeError> {
    match record.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(site.malformed(key, format!("expected a string, found {}", kind_of(other)))),
    }
}

pub(crate) fn req_str<'v>(
    record: &'v Map<String, Value>,
    key: &'static str,
    site: Site<'_>,
) -> Result<&'v str, DecodeError> {
    opt_str(record, key, site)?.ok_or_else(|| site.malformed(key, "required field is missing"))
}

pub(crate) fn opt_f64(
    record: &Map<String, Value>,
    key: &'static str,
    site: Site<'_>,
) -> Result<Option<f64>, DecodeError> {
    match record.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => float_from_json(value)
            .map(Some)
            .ok_or_else(|| site.malformed(key, format!("expected a number, found {}", kind_of(value)))),
    }
}

pub(crate) fn opt_bool(
    record: &Map<String, Value>,
    key: &'static str,
    site: Site<'_>,
) -> Result<Option<bool>, DecodeError> {
    match record.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(site.malformed(key, format!("expected a boolean, found {}", kind_of(other)))),
    }
}

pub(crate) fn opt_array<'v>(
    record: &'v Map<String, Value>,
    key: &'static str,
    site: Site<'_>,
) -> Result<&'v [Value], DecodeError> {
    match record.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(site.malformed(key, format!("expected a list, found {}", kind_of(other)))),
    }
}

/// Present and not `null`.
pub(crate) fn has(record: &Map<String, Value>, key: &str) -> bool {
    record.get(key).is_some_and(|v| !v.is_null())
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
