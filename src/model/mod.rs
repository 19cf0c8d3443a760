// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-memory document model.
//!
//! A document owns a flat node arena; the tree is expressed by parent/children keys inside it and
//! cross-references (component instances, navigation targets) are keys into the same arena.

pub mod action;
pub mod data_path;
pub mod document;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod node;
pub mod palette;
pub mod tree;
pub mod value;

pub use action::Action;
pub use data_path::{DataPath, ParseDataPathError, PathSegment};
pub use document::{
    Document, Metadata, NodeArena, TreeError, COMPATIBILITY_VERSION, CURRENT_DOCUMENT_VERSION,
};
pub use ids::{ColorId, GradientId, Id, IdError, NodeId, NodeKey};
pub use node::{
    Axis, Button, ComponentInstance, ContentMode, Image, MainComponent, Node, NodeKind,
    PreviewConfig, Rectangle, Screen, Spacer, Stack, Text, DEFAULT_FONT_SIZE,
    DEFAULT_STACK_SPACING,
};
pub use palette::{ColorValue, DocumentColor, DocumentGradient, Fill, GradientStop, Rgba};
pub use value::{
    Binding, ComponentReference, ImageRef, OverrideValue, PropertyKind, PropertyName,
    PropertyScalar, PropertyValue,
};
