// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use indexmap::IndexMap;
use thiserror::Error;

use super::ids::{ColorId, GradientId, NodeId, NodeKey};
use super::node::Node;
use super::palette::{DocumentColor, DocumentGradient};

/// Newest on-disk shape this crate reads and the only one it writes.
pub const CURRENT_DOCUMENT_VERSION: u32 = 21;

/// Documents with a higher compatibility version use shapes this crate cannot read.
pub const COMPATIBILITY_VERSION: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub document_version: u32,
    pub compatibility_version: u32,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            document_version: CURRENT_DOCUMENT_VERSION,
            compatibility_version: COMPATIBILITY_VERSION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node {0} is not part of this document")]
    UnknownNode(NodeKey),
    #[error("node id {0} is already used in this document")]
    DuplicateId(NodeId),
    #[error("attaching {node} under {parent} would create a cycle")]
    WouldCycle { node: NodeKey, parent: NodeKey },
    #[error("node {0} is already attached; detach it first")]
    AlreadyAttached(NodeKey),
}

/// The flat node table: every node of a document, addressed by [`NodeKey`].
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    slots: Vec<Option<Node>>,
    by_id: HashMap<NodeId, NodeKey>,
}

impl NodeArena {
    pub fn insert(&mut self, node: Node) -> Result<NodeKey, TreeError> {
        if self.by_id.contains_key(node.id()) {
            return Err(TreeError::DuplicateId(node.id().clone()));
        }
        let key = NodeKey::from_index(self.slots.len());
        self.by_id.insert(node.id().clone(), key);
        self.slots.push(Some(node));
        Ok(key)
    }

    pub fn get(&self, key: NodeKey) -> Option<&Node> {
        self.slots.get(key.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.slots.get_mut(key.index()).and_then(Option::as_mut)
    }

    pub fn key_of(&self, id: &str) -> Option<NodeKey> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.get(key).is_some()
    }

    /// Tombstones a slot. The key is never handed out again.
    pub(crate) fn take(&mut self, key: NodeKey) -> Option<Node> {
        let node = self.slots.get_mut(key.index())?.take()?;
        self.by_id.remove(node.id());
        Some(node)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Live nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &Node)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|node| (NodeKey::from_index(index), node)))
    }
}

/// A decoded (or freshly authored) document: the node tree plus its palettes.
#[derive(Debug, Clone, Default)]
pub struct Document {
    metadata: Metadata,
    pub(crate) nodes: NodeArena,
    pub(crate) roots: Vec<NodeKey>,
    colors: IndexMap<ColorId, DocumentColor>,
    gradients: IndexMap<GradientId, DocumentGradient>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(metadata: Metadata) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }

    pub fn metadata(&self) -> Metadata {
        self.metadata
    }

    pub fn nodes(&self) -> &NodeArena {
        &self.nodes
    }

    pub fn roots(&self) -> &[NodeKey] {
        &self.roots
    }

    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    pub fn find(&self, id: &str) -> Option<NodeKey> {
        self.nodes.key_of(id)
    }

    pub fn colors(&self) -> &IndexMap<ColorId, DocumentColor> {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut IndexMap<ColorId, DocumentColor> {
        &mut self.colors
    }

    pub fn gradients(&self) -> &IndexMap<GradientId, DocumentGradient> {
        &self.gradients
    }

    pub fn gradients_mut(&mut self) -> &mut IndexMap<GradientId, DocumentGradient> {
        &mut self.gradients
    }

    pub(crate) fn require(&self, key: NodeKey) -> Result<&Node, TreeError> {
        self.nodes.get(key).ok_or(TreeError::UnknownNode(key))
    }
}
