// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Two-phase decode: build every node first, then link cross-references.
//!
//! Field decoders never look a referenced node up. They write [`NodeKey::UNRESOLVED`] and record
//! a [`PendingLink`] in the node's [`NodeScope`]; once the node is in the arena the coordinator
//! turns each link into a deferred action. All actions run exactly once, in registration order,
//! after the last record has been decoded. The first miss fails the whole decode.

use serde_json::Value;
use tracing::{info, warn};

use super::record::{opt_array, Site};
use super::registry::NodeTag;
use super::{DecodeError, DecodeOptions, Decoded};
use crate::model::{
    Action, Binding, ColorId, ComponentReference, Document, GradientId, Metadata, Node, NodeId,
    NodeKey, NodeKind, OverrideValue, PropertyName, PropertyValue, TreeError,
};

/// Which reference field of the owning node a link patches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LinkSlot {
    InstanceValue,
    PropertyDefault(PropertyName),
    OverrideComponent(PropertyName),
    /// Index into `Button.actions`.
    NavigateDestination(usize),
}

impl LinkSlot {
    fn expected(&self) -> TargetKind {
        match self {
            Self::NavigateDestination(_) => TargetKind::Screen,
            _ => TargetKind::MainComponent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetKind {
    MainComponent,
    Screen,
}

impl TargetKind {
    fn type_name(self) -> &'static str {
        match self {
            Self::MainComponent => "MainComponent",
            Self::Screen => "Screen",
        }
    }

    fn matches(self, kind: &NodeKind) -> bool {
        matches!(
            (self, kind),
            (Self::MainComponent, NodeKind::MainComponent(_)) | (Self::Screen, NodeKind::Screen(_))
        )
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PendingLink {
    pub slot: LinkSlot,
    pub target: NodeId,
    pub field: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PaletteTarget {
    Color(ColorId),
    Gradient(GradientId),
}

#[derive(Debug, Clone)]
struct PaletteRef {
    owner: NodeId,
    target: PaletteTarget,
    field: &'static str,
}

/// Per-record decode state: where we are, plus the references the record makes.
pub(crate) struct NodeScope<'a> {
    site: Site<'a>,
    links: Vec<PendingLink>,
    palette: Vec<(PaletteTarget, &'static str)>,
}

impl<'a> NodeScope<'a> {
    pub fn new(site: Site<'a>) -> Self {
        Self {
            site,
            links: Vec::new(),
            palette: Vec::new(),
        }
    }

    pub fn site(&self) -> Site<'a> {
        self.site
    }

    pub fn defer_link(&mut self, slot: LinkSlot, target: NodeId, field: &'static str) {
        self.links.push(PendingLink { slot, target, field });
    }

    pub fn defer_palette(&mut self, target: PaletteTarget, field: &'static str) {
        self.palette.push((target, field));
    }

    fn into_parts(self) -> (Vec<PendingLink>, Vec<(PaletteTarget, &'static str)>) {
        (self.links, self.palette)
    }
}

/// A record whose `__typeName` was not recognised and was dropped with its subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub tag: String,
    /// The record's `id`, when it had a readable one.
    pub id: Option<String>,
    /// `None` for a dropped root.
    pub parent: Option<NodeId>,
}

/// Non-fatal observations collected during a successful decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub source_version: u32,
    pub unknown_variants: Vec<UnknownVariant>,
    pub links_resolved: usize,
}

impl DecodeReport {
    /// Whether the source predates the current format version, so saving it writes a newer
    /// shape. This holds even when no record carried a legacy field.
    pub fn was_upgraded(&self) -> bool {
        self.source_version < super::versions::CURRENT_DOCUMENT_VERSION
    }
}

/// Mutable view of the document handed to deferred actions.
pub(crate) struct LinkContext<'d> {
    document: &'d mut Document,
}

impl LinkContext<'_> {
    fn lookup(&self, owner: &NodeId, link: &PendingLink) -> Result<NodeKey, DecodeError> {
        let expected = link.slot.expected();
        let key = self
            .document
            .find(link.target.as_str())
            .ok_or_else(|| DecodeError::UnresolvedReference {
                node: owner.clone(),
                field: link.field,
                target_kind: "node",
                target: link.target.to_string(),
            })?;
        let found = self
            .document
            .node(key)
            .map(|node| node.kind())
            .ok_or_else(|| DecodeError::UnresolvedReference {
                node: owner.clone(),
                field: link.field,
                target_kind: "node",
                target: link.target.to_string(),
            })?;
        if !expected.matches(found) {
            return Err(DecodeError::ReferenceKindMismatch {
                node: owner.clone(),
                field: link.field,
                target: link.target.clone(),
                expected: expected.type_name(),
                found: found.type_name(),
            });
        }
        Ok(key)
    }

    /// Resolves `link` and writes the target key into the owning node.
    fn link(&mut self, owner_key: NodeKey, owner: &NodeId, link: PendingLink) -> Result<(), DecodeError> {
        let target = self.lookup(owner, &link)?;
        let missing_slot = || DecodeError::MalformedValue {
            type_name: "node",
            field: link.field,
            node: Some(owner.clone()),
            reason: format!("reference slot {:?} vanished before linking", link.slot),
        };

        let kind = self
            .document
            .node_mut(owner_key)
            .map(Node::kind_mut)
            .ok_or_else(missing_slot)?;
        let patched = match (&link.slot, kind) {
            (LinkSlot::InstanceValue, NodeKind::ComponentInstance(instance)) => {
                instance.value = ComponentReference::Main(target);
                true
            }
            (LinkSlot::PropertyDefault(name), NodeKind::MainComponent(component)) => {
                match component.property_mut(name) {
                    Some(slot @ PropertyValue::Component(_)) => {
                        *slot = PropertyValue::Component(target);
                        true
                    }
                    _ => false,
                }
            }
            (LinkSlot::OverrideComponent(name), NodeKind::ComponentInstance(instance)) => {
                match instance.overrides.get_mut(name) {
                    Some(OverrideValue::Component(binding @ Binding::Literal(_))) => {
                        *binding = Binding::Literal(target);
                        true
                    }
                    _ => false,
                }
            }
            (LinkSlot::NavigateDestination(index), NodeKind::Button(button)) => {
                match button.actions.get_mut(*index) {
                    Some(Action::Navigate { destination }) => {
                        *destination = target;
                        true
                    }
                    _ => false,
                }
            }
            _ => false,
        };
        if patched {
            Ok(())
        } else {
            Err(missing_slot())
        }
    }
}

type DeferredAction = Box<dyn FnOnce(&mut LinkContext<'_>) -> Result<(), DecodeError>>;

/// Owns the partially built document for the duration of one decode.
pub(crate) struct DecodingCoordinator {
    document: Document,
    options: DecodeOptions,
    version: u32,
    deferred: Vec<DeferredAction>,
    palette_refs: Vec<PaletteRef>,
    report: DecodeReport,
}

impl DecodingCoordinator {
    pub fn new(document: Document, options: DecodeOptions) -> Self {
        let Metadata {
            document_version, ..
        } = document.metadata();
        Self {
            document,
            options,
            version: document_version,
            deferred: Vec::new(),
            palette_refs: Vec::new(),
            report: DecodeReport {
                source_version: document_version,
                ..DecodeReport::default()
            },
        }
    }

    pub fn decode_root(&mut self, value: &Value) -> Result<(), DecodeError> {
        self.decode_node(value, None).map(|_| ())
    }

    fn decode_node(
        &mut self,
        value: &Value,
        parent: Option<NodeKey>,
    ) -> Result<Option<NodeKey>, DecodeError> {
        let outer = Site {
            type_name: "node",
            node: None,
            version: self.version,
        };
        let record = super::record::as_object(value, outer, "nodes")?;
        let raw_tag = super::record::req_str(record, "__typeName", outer)?;

        let Some(tag) = NodeTag::parse(raw_tag) else {
            return self.skip_unknown(raw_tag, record, parent).map(|()| None);
        };

        let raw_id = super::record::req_str(record, "id", outer)?;
        let id = NodeId::new(raw_id).map_err(|source| DecodeError::InvalidId {
            field: "id",
            value: raw_id.to_owned(),
            source,
        })?;
        let site = Site {
            type_name: tag.as_str(),
            node: Some(&id),
            version: self.version,
        };
        let name = super::record::opt_str(record, "name", site)?;

        let mut scope = NodeScope::new(site);
        let kind = tag.decode(record, &mut scope)?;
        let (links, palette) = scope.into_parts();

        let mut node = Node::new(id.clone(), kind);
        if let Some(name) = name {
            node = node.with_name(name);
        }
        let inserted = match parent {
            Some(parent) => self.document.append_child(parent, node),
            None => self.document.insert_root(node),
        };
        let key = inserted.map_err(|err| match err {
            TreeError::DuplicateId(id) => DecodeError::DuplicateId(id),
            other => site.malformed("children", other.to_string()),
        })?;

        for link in links {
            let owner = id.clone();
            self.deferred
                .push(Box::new(move |cx: &mut LinkContext<'_>| cx.link(key, &owner, link)));
        }
        self.palette_refs
            .extend(palette.into_iter().map(|(target, field)| PaletteRef {
                owner: id.clone(),
                target,
                field,
            }));

        for child in opt_array(record, "children", site)? {
            self.decode_node(child, Some(key))?;
        }
        Ok(Some(key))
    }

    fn skip_unknown(
        &mut self,
        tag: &str,
        record: &serde_json::Map<String, Value>,
        parent: Option<NodeKey>,
    ) -> Result<(), DecodeError> {
        let id = record.get("id").and_then(Value::as_str).map(str::to_owned);
        if self.options.strict_unknown_variants {
            return Err(DecodeError::MalformedValue {
                type_name: "node",
                field: "__typeName",
                node: id.and_then(|id| NodeId::new(id).ok()),
                reason: format!("unknown node type {tag:?}"),
            });
        }

        let parent = parent
            .and_then(|key| self.document.node(key))
            .map(|node| node.id().clone());
        warn!(
            tag,
            id = id.as_deref().unwrap_or_default(),
            parent = parent.as_ref().map(NodeId::as_str).unwrap_or_default(),
            "skipping node with unknown type"
        );
        self.report.unknown_variants.push(UnknownVariant {
            tag: tag.to_owned(),
            id,
            parent,
        });
        Ok(())
    }

    /// Runs the link phase and hands out the finished document.
    pub fn finish(self) -> Result<Decoded, DecodeError> {
        let Self {
            mut document,
            deferred,
            palette_refs,
            mut report,
            version,
            ..
        } = self;

        report.links_resolved = deferred.len();
        let mut cx = LinkContext {
            document: &mut document,
        };
        for action in deferred {
            action(&mut cx)?;
        }

        for PaletteRef {
            owner,
            target,
            field,
        } in palette_refs
        {
            let (known, target_kind, target) = match target {
                PaletteTarget::Color(id) => {
                    (document.colors().contains_key(&id), "color", id.into_string())
                }
                PaletteTarget::Gradient(id) => (
                    document.gradients().contains_key(&id),
                    "gradient",
                    id.into_string(),
                ),
            };
            if !known {
                return Err(DecodeError::UnresolvedReference {
                    node: owner,
                    field,
                    target_kind,
                    target,
                });
            }
        }

        info!(
            nodes = document.nodes().len(),
            links = report.links_resolved,
            unknown = report.unknown_variants.len(),
            version,
            "decoded document"
        );
        Ok(Decoded { document, report })
    }
}
