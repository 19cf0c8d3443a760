// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for documents on disk.
//!
//! A document is one JSON file. Reads decode it through [`crate::format`]; writes always produce
//! the current shape and replace the file atomically.

pub mod document_file;

pub use document_file::{DocumentFile, StoreError, WriteDurability};
