// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Property values, bindings, and component overrides.

use std::fmt;

use smol_str::SmolStr;

use super::data_path::DataPath;
use super::ids::NodeKey;

/// Name of a property declared on a main component.
pub type PropertyName = SmolStr;

/// Name of an image in the document's asset catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Text,
    Number,
    Boolean,
    Image,
    Component,
}

impl PropertyKind {
    /// The case key used for this kind in variant-tagged records.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Image => "image",
            Self::Component => "component",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Number(f64),
    Boolean(bool),
    Image(ImageRef),
    /// A main component, by arena key.
    Component(NodeKey),
}

impl PropertyValue {
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Text(_) => PropertyKind::Text,
            Self::Number(_) => PropertyKind::Number,
            Self::Boolean(_) => PropertyKind::Boolean,
            Self::Image(_) => PropertyKind::Image,
            Self::Component(_) => PropertyKind::Component,
        }
    }
}

/// How a scalar is sourced.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding<T> {
    Literal(T),
    /// Pass-through to a property of the enclosing component.
    Property(PropertyName),
    /// Looked up in external data when the value is resolved.
    DataPath(DataPath),
}

impl<T> Binding<T> {
    pub fn property(name: impl Into<PropertyName>) -> Self {
        Self::Property(name.into())
    }

    pub fn as_literal(&self) -> Option<&T> {
        match self {
            Self::Literal(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<T> for Binding<T> {
    fn from(value: T) -> Self {
        Self::Literal(value)
    }
}

/// An instance-local replacement or rebinding of one declared property.
#[derive(Debug, Clone, PartialEq)]
pub enum OverrideValue {
    Text(Binding<String>),
    Number(Binding<f64>),
    Boolean(Binding<bool>),
    Image(Binding<ImageRef>),
    Component(Binding<NodeKey>),
}

impl OverrideValue {
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Text(_) => PropertyKind::Text,
            Self::Number(_) => PropertyKind::Number,
            Self::Boolean(_) => PropertyKind::Boolean,
            Self::Image(_) => PropertyKind::Image,
            Self::Component(_) => PropertyKind::Component,
        }
    }
}

impl From<PropertyValue> for OverrideValue {
    fn from(value: PropertyValue) -> Self {
        match value {
            PropertyValue::Text(v) => Self::Text(Binding::Literal(v)),
            PropertyValue::Number(v) => Self::Number(Binding::Literal(v)),
            PropertyValue::Boolean(v) => Self::Boolean(Binding::Literal(v)),
            PropertyValue::Image(v) => Self::Image(Binding::Literal(v)),
            PropertyValue::Component(v) => Self::Component(Binding::Literal(v)),
        }
    }
}

/// What a component instance places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentReference {
    Main(NodeKey),
    /// The `component`-typed property of the instance's enclosing component.
    Property(PropertyName),
}

/// A scalar that can live inside a [`PropertyValue`].
pub trait PropertyScalar: Clone {
    const KIND: PropertyKind;

    fn from_property(value: &PropertyValue) -> Option<Self>;

    fn into_property(self) -> PropertyValue;
}

impl PropertyScalar for String {
    const KIND: PropertyKind = PropertyKind::Text;

    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Text(v) => Some(v.clone()),
            _ => None,
        }
    }

    fn into_property(self) -> PropertyValue {
        PropertyValue::Text(self)
    }
}

impl PropertyScalar for f64 {
    const KIND: PropertyKind = PropertyKind::Number;

    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    fn into_property(self) -> PropertyValue {
        PropertyValue::Number(self)
    }
}

impl PropertyScalar for bool {
    const KIND: PropertyKind = PropertyKind::Boolean;

    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    fn into_property(self) -> PropertyValue {
        PropertyValue::Boolean(self)
    }
}

impl PropertyScalar for ImageRef {
    const KIND: PropertyKind = PropertyKind::Image;

    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Image(v) => Some(v.clone()),
            _ => None,
        }
    }

    fn into_property(self) -> PropertyValue {
        PropertyValue::Image(self)
    }
}

impl PropertyScalar for NodeKey {
    const KIND: PropertyKind = PropertyKind::Component;

    fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Component(v) => Some(*v),
            _ => None,
        }
    }

    fn into_property(self) -> PropertyValue {
        PropertyValue::Component(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{Binding, ImageRef, OverrideValue, PropertyKind, PropertyScalar, PropertyValue};

    #[test]
    fn property_scalar_only_accepts_matching_kind() {
        let number = PropertyValue::Number(5.0);
        assert_eq!(f64::from_property(&number), Some(5.0));
        assert_eq!(String::from_property(&number), None);
        assert_eq!(<bool as PropertyScalar>::KIND, PropertyKind::Boolean);
    }

    #[test]
    fn literal_property_values_lift_to_overrides() {
        let lifted = OverrideValue::from(PropertyValue::Image(ImageRef::new("hero")));
        assert_eq!(
            lifted,
            OverrideValue::Image(Binding::Literal(ImageRef::new("hero")))
        );
        assert_eq!(lifted.kind(), PropertyKind::Image);
    }
}
