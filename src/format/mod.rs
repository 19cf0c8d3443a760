// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The on-disk JSON format.
//!
//! Decoding is all-or-nothing: a [`Decoded`] document is fully linked, and any fatal error
//! discards everything built so far. Unknown node types are the one non-fatal case; they are
//! dropped and listed in the [`DecodeReport`].

mod coordinator;
mod document_json;
mod encode;
mod fields;
mod record;
mod registry;
mod value_codec;
mod variant;
pub mod versions;


use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub use coordinator::{DecodeReport, UnknownVariant};
pub use encode::{encode_node, encode_value, to_string_pretty, to_vec_pretty, EncodeError};
pub use registry::KNOWN_TAGS;

use crate::model::{Document, IdError, NodeId};
use coordinator::DecodingCoordinator;
use document_json::{metadata_from_json, palettes_from_json, DocumentJson, MetadataJson};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("missing required `{record}` record")]
    Structural { record: &'static str },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document needs compatibility version {found}; this build reads up to {supported}")]
    IncompatibleDocument { found: u32, supported: u32 },
    #[error("malformed {type_name}.{field}{}: {reason}", at_node(.node.as_ref()))]
    MalformedValue {
        type_name: &'static str,
        field: &'static str,
        node: Option<NodeId>,
        reason: String,
    },
    #[error("node id {0} appears more than once")]
    DuplicateId(NodeId),
    #[error("invalid {field} {value:?}: {source}")]
    InvalidId {
        field: &'static str,
        value: String,
        #[source]
        source: IdError,
    },
    #[error("node {node}: `{field}` references {target_kind} {target}, which does not exist")]
    UnresolvedReference {
        node: NodeId,
        field: &'static str,
        target_kind: &'static str,
        target: String,
    },
    #[error("node {node}: `{field}` must reference a {expected}, but {target} is a {found}")]
    ReferenceKindMismatch {
        node: NodeId,
        field: &'static str,
        target: NodeId,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{type_name}.{field}{} has a shape that document version {version} does not use", at_node(.node.as_ref()))]
    VersionGap {
        type_name: &'static str,
        field: &'static str,
        version: u32,
        node: Option<NodeId>,
    },
}

fn at_node(node: Option<&NodeId>) -> String {
    node.map(|id| format!(" (node {id})")).unwrap_or_default()
}

/// Decoder configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject unknown node types instead of dropping them.
    pub strict_unknown_variants: bool,
}

/// A fully linked document and what was noticed while decoding it.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub document: Document,
    pub report: DecodeReport,
}

pub fn decode_slice(bytes: &[u8], options: DecodeOptions) -> Result<Decoded, DecodeError> {
    let value: Value = serde_json::from_slice(bytes)?;
    decode_value(&value, options)
}

pub fn decode_str(text: &str, options: DecodeOptions) -> Result<Decoded, DecodeError> {
    let value: Value = serde_json::from_str(text)?;
    decode_value(&value, options)
}

pub fn decode_value(value: &Value, options: DecodeOptions) -> Result<Decoded, DecodeError> {
    let records = value
        .as_object()
        .ok_or(DecodeError::Structural { record: "metadata" })?;
    let metadata_json = records
        .get("metadata")
        .ok_or(DecodeError::Structural { record: "metadata" })?;
    let document_json = records
        .get("document")
        .ok_or(DecodeError::Structural { record: "document" })?;

    let metadata = metadata_from_json(MetadataJson::deserialize(metadata_json)?);
    if metadata.compatibility_version > versions::COMPATIBILITY_VERSION {
        return Err(DecodeError::IncompatibleDocument {
            found: metadata.compatibility_version,
            supported: versions::COMPATIBILITY_VERSION,
        });
    }

    let DocumentJson {
        nodes,
        colors,
        gradients,
    } = DocumentJson::deserialize(document_json)?;
    let mut document = Document::with_metadata(metadata);
    palettes_from_json(colors, gradients, &mut document)?;

    let mut coordinator = DecodingCoordinator::new(document, options);
    for node in &nodes {
        coordinator.decode_root(node)?;
    }
    coordinator.finish()
}
