// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Document versions at which on-disk field shapes changed.
//!
//! Each constant is the first version that writes the new shape; records older than it are read
//! through the matching legacy function in [`super::fields`].

pub use crate::model::{COMPATIBILITY_VERSION, CURRENT_DOCUMENT_VERSION};

/// `Stack.axis` replaced the `isHorizontal` flag (and gained `depth`).
pub const STACK_AXIS: u32 = 11;

/// `ComponentInstance.value` became a tagged component reference; before it was a bare
/// `component` id.
pub const INSTANCE_VALUE_REFERENCE: u32 = 12;

/// Colors and fills became tagged records able to point into the document palette; before they
/// were `#RRGGBB[AA]` strings.
pub const TAGGED_FILLS: u32 = 13;

/// `Button.actions` (a list of tagged actions) replaced the single flat `action` record.
pub const BUTTON_ACTION_LIST: u32 = 14;

/// `MainComponent.properties` became an ordered list of `{name, value}` entries.
pub const PROPERTY_LIST: u32 = 16;

/// Scalar fields became bindings (`literal` / `property` / `dataPath`).
pub const BINDINGS: u32 = 17;

/// Instance overrides gained bindings.
pub const OVERRIDE_BINDINGS: u32 = 19;
