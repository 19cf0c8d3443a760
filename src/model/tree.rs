// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Hierarchy operations over a [`Document`]: attach/detach, traversal, cloning, minimal root
//! sets, and transitive component discovery.

use indexmap::IndexSet;

use super::document::{Document, TreeError};
use super::ids::{NodeId, NodeKey};
use super::node::{Node, NodeKind};
use super::value::{Binding, ComponentReference, OverrideValue, PropertyValue};

impl Document {
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes.get(key).map(Node::children).unwrap_or(&[])
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(Node::parent)
    }

    pub fn insert_root(&mut self, node: Node) -> Result<NodeKey, TreeError> {
        let key = self.nodes.insert(node)?;
        self.roots.push(key);
        Ok(key)
    }

    pub fn append_child(&mut self, parent: NodeKey, node: Node) -> Result<NodeKey, TreeError> {
        self.require(parent)?;
        let key = self.nodes.insert(node)?;
        self.link_child(parent, key);
        Ok(key)
    }

    /// Attaches a detached node (for example a fresh clone) as the last root.
    pub fn attach_root(&mut self, key: NodeKey) -> Result<(), TreeError> {
        self.ensure_detached(key)?;
        self.roots.push(key);
        Ok(())
    }

    /// Attaches a detached node as the last child of `parent`.
    pub fn attach(&mut self, parent: NodeKey, key: NodeKey) -> Result<(), TreeError> {
        self.require(parent)?;
        self.ensure_detached(key)?;
        if parent == key || self.is_ancestor(key, parent) {
            return Err(TreeError::WouldCycle { node: key, parent });
        }
        self.link_child(parent, key);
        Ok(())
    }

    /// Unlinks a node from its parent (or the root list). The subtree stays in the document.
    pub fn detach(&mut self, key: NodeKey) -> Result<(), TreeError> {
        let parent = self.require(key)?.parent;
        match parent {
            Some(parent) => {
                if let Some(parent_node) = self.nodes.get_mut(parent) {
                    parent_node.children.retain(|child| *child != key);
                }
                if let Some(node) = self.nodes.get_mut(key) {
                    node.parent = None;
                }
            }
            None => self.roots.retain(|root| *root != key),
        }
        Ok(())
    }

    /// Removes a node and its whole subtree from the document, returning the removed nodes in
    /// pre-order.
    pub fn remove_subtree(&mut self, key: NodeKey) -> Result<Vec<Node>, TreeError> {
        self.detach(key)?;
        let mut keys = vec![key];
        keys.extend(self.descendants(key));
        Ok(keys.into_iter().filter_map(|k| self.nodes.take(k)).collect())
    }

    /// Parent first, root last.
    pub fn ancestors(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut current = self.parent(key);
        while let Some(ancestor) = current {
            out.push(ancestor);
            current = self.parent(ancestor);
        }
        out
    }

    /// Every node below `key`, in pre-order, excluding `key` itself.
    pub fn descendants(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut stack = self.children(key).iter().rev().copied().collect::<Vec<_>>();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// `true` when `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: NodeKey, node: NodeKey) -> bool {
        let mut current = self.parent(node);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// The given nodes plus all of their descendants, without repeats.
    pub fn flatten(&self, keys: &[NodeKey]) -> IndexSet<NodeKey> {
        let mut out = IndexSet::new();
        for &key in keys {
            if !self.nodes.contains(key) || !out.insert(key) {
                continue;
            }
            out.extend(self.descendants(key));
        }
        out
    }

    /// Deep-copies a subtree under freshly minted ids and returns the detached copy.
    ///
    /// References held by the copied nodes (instance values, component-typed values, navigation
    /// destinations) keep pointing at the original targets.
    pub fn clone_subtree(&mut self, key: NodeKey) -> Result<NodeKey, TreeError> {
        let source = self.require(key)?;
        let mut copy = source.clone();
        copy.set_id(NodeId::mint());
        copy.parent = None;
        copy.children.clear();
        let source_children = source.children.clone();

        let copy_key = self.nodes.insert(copy)?;
        for child in source_children {
            let child_copy = self.clone_subtree(child)?;
            self.link_child(copy_key, child_copy);
        }
        Ok(copy_key)
    }

    /// Reduces a node set to the minimal subset whose subtrees cover every input node.
    ///
    /// No returned node is a descendant of another; input order is kept for the survivors.
    pub fn root_nodes(&self, keys: &[NodeKey]) -> Vec<NodeKey> {
        let mut result = IndexSet::<NodeKey>::new();
        for &candidate in keys {
            if result.contains(&candidate) {
                continue;
            }
            if self.ancestors(candidate).iter().any(|a| result.contains(a)) {
                continue;
            }
            result.retain(|existing| !self.is_ancestor(candidate, *existing));
            result.insert(candidate);
        }
        result.into_iter().collect()
    }

    /// Every main component transitively reachable from `keys`.
    ///
    /// Follows instance values, `component`-typed property defaults and `component` overrides,
    /// and descends into each reached component's own subtree. A single visited set guards every
    /// edge kind, so self- and mutually-referencing components terminate.
    pub fn referenced_components(&self, keys: &[NodeKey]) -> IndexSet<NodeKey> {
        let mut found = IndexSet::<NodeKey>::new();
        let mut scanned = IndexSet::<NodeKey>::new();
        let mut work = self.flatten(keys).into_iter().collect::<Vec<_>>();
        work.reverse();

        while let Some(key) = work.pop() {
            if !scanned.insert(key) {
                continue;
            }
            let Some(node) = self.nodes.get(key) else {
                continue;
            };

            let mut targets = Vec::new();
            match node.kind() {
                NodeKind::ComponentInstance(instance) => {
                    if let ComponentReference::Main(target) = instance.value {
                        targets.push(target);
                    }
                    for value in instance.overrides.values() {
                        if let OverrideValue::Component(Binding::Literal(target)) = value {
                            targets.push(*target);
                        }
                    }
                }
                NodeKind::MainComponent(component) => {
                    for value in component.properties().values() {
                        if let PropertyValue::Component(target) = value {
                            targets.push(*target);
                        }
                    }
                }
                _ => {}
            }

            for target in targets {
                let is_component = self
                    .nodes
                    .get(target)
                    .is_some_and(|n| matches!(n.kind(), NodeKind::MainComponent(_)));
                if !is_component || !found.insert(target) {
                    continue;
                }
                for reached in self.flatten(&[target]).into_iter().rev() {
                    if !scanned.contains(&reached) {
                        work.push(reached);
                    }
                }
            }
        }

        found
    }

    fn link_child(&mut self, parent: NodeKey, child: NodeKey) {
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(child);
        }
    }

    fn ensure_detached(&self, key: NodeKey) -> Result<(), TreeError> {
        let node = self.require(key)?;
        if node.parent.is_some() || self.roots.contains(&key) {
            return Err(TreeError::AlreadyAttached(key));
        }
        Ok(())
    }
}
