// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tessera: the document layer of a no-code UI authoring tool.
//!
//! - [`model`] holds the node tree, palettes and component properties.
//! - [`format`] reads every historical document shape and writes the current one.
//! - [`resolve`] computes effective values for bindings and component instances.
//! - [`store`] loads and saves documents on disk.

pub mod format;
pub mod model;
pub mod resolve;
pub mod store;
