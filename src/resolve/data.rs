// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Evaluation of data paths against loosely typed external data.

use serde_json::Value;

use crate::model::{DataPath, ImageRef, NodeKey, PathSegment};

/// Walks `path` through `data`. `None` when a segment does not exist or addresses the wrong
/// kind of value (a key into a list, an index into an object).
pub fn evaluate<'v>(data: &'v Value, path: &DataPath) -> Option<&'v Value> {
    path.segments()
        .iter()
        .try_fold(data, |current, segment| match (segment, current) {
            (PathSegment::Key(key), Value::Object(record)) => record.get(key.as_str()),
            (PathSegment::Index(index), Value::Array(items)) => items.get(*index),
            _ => None,
        })
}

/// Conversion from external data into a property scalar. Never fails loudly: `None` means the
/// caller falls back to its default.
pub trait CoerceFromData: Sized {
    fn coerce(value: &Value) -> Option<Self>;
}

impl CoerceFromData for String {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl CoerceFromData for f64 {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl CoerceFromData for bool {
    fn coerce(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl CoerceFromData for ImageRef {
    fn coerce(value: &Value) -> Option<Self> {
        value
            .as_str()
            .filter(|s| !s.is_empty())
            .map(ImageRef::new)
    }
}

/// Component references never come from external data.
impl CoerceFromData for NodeKey {
    fn coerce(_: &Value) -> Option<Self> {
        None
    }
}
