// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tracing::{debug, info};

use crate::format::{decode_slice, to_vec_pretty, DecodeError, DecodeOptions, Decoded, EncodeError};
use crate::model::Document;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
    #[error("cannot encode document for {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },
    #[error("refusing to write through symlink at {}", path.display())]
    SymlinkRefused { path: PathBuf },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not fsync.
    #[default]
    BestEffort,

    /// Flushes the file contents and the rename to stable storage where the platform allows.
    Durable,
}

/// One document file on disk.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    path: PathBuf,
    durability: WriteDurability,
    options: DecodeOptions,
}

impl DocumentFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            durability: WriteDurability::default(),
            options: DecodeOptions::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn with_decode_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn decode_options(&self) -> DecodeOptions {
        self.options
    }

    /// Reads and fully decodes the file.
    pub fn load(&self) -> Result<Decoded, StoreError> {
        let bytes = fs::read(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "read document file");

        decode_slice(&bytes, self.options).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    /// Encodes `document` in the current shape and atomically replaces the file.
    pub fn save(&self, document: &Document) -> Result<(), StoreError> {
        let contents = to_vec_pretty(document).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;
        write_atomic(&self.path, &contents, self.durability)?;
        info!(
            path = %self.path.display(),
            bytes = contents.len(),
            nodes = document.nodes().len(),
            durability = ?self.durability,
            "saved document"
        );
        Ok(())
    }
}

include!("document_file/helpers.rs");

#[cfg(test)]
mod tests;
