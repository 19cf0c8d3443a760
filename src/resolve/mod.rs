// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Property and override resolution.
//!
//! Resolution is a pure function of the document, a [`Scope`] and the external data it carries.
//! Nothing is cached: resolving again after the scope changes picks up the new values. Absent,
//! mismatched or unresolvable values fall back to declared defaults; resolution never fails.

mod assets;
mod data;

#[cfg(test)]
mod tests;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

pub use assets::{AssetProvider, InMemoryAssets, MissingAssets};
pub use data::{evaluate, CoerceFromData};

use crate::model::{
    Binding, ComponentInstance, ComponentReference, Document, ImageRef, MainComponent, NodeKey,
    NodeKind, OverrideValue, PropertyName, PropertyScalar, PropertyValue,
};

/// The resolved properties of the enclosing component, in declaration order.
pub type Environment = IndexMap<PropertyName, PropertyValue>;

/// Everything a binding can draw from.
#[derive(Clone, Copy)]
pub struct Scope<'a> {
    pub environment: &'a Environment,
    pub data: Option<&'a Value>,
    /// Asset provider plus the locale used for translations.
    pub assets: Option<(&'a dyn AssetProvider, &'a str)>,
}

impl<'a> Scope<'a> {
    pub fn new(environment: &'a Environment) -> Self {
        Self {
            environment,
            data: None,
            assets: None,
        }
    }

    pub fn with_data(mut self, data: &'a Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_assets(mut self, assets: &'a dyn AssetProvider, locale: &'a str) -> Self {
        self.assets = Some((assets, locale));
        self
    }

    /// Same data and assets, different environment.
    pub fn nested<'b>(&self, environment: &'b Environment) -> Scope<'b>
    where
        'a: 'b,
    {
        Scope {
            environment,
            data: self.data,
            assets: self.assets,
        }
    }
}

impl std::fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("environment", self.environment)
            .field("data", &self.data)
            .field("locale", &self.assets.map(|(_, locale)| locale))
            .finish()
    }
}

/// A scalar a [`Binding`] can resolve to.
pub trait Resolvable: PropertyScalar + CoerceFromData {
    /// Last step of resolution, where host assets may replace the value.
    fn with_assets(self, _fallback: &Self, _scope: &Scope<'_>) -> Self {
        self
    }
}

impl Resolvable for String {
    /// Text is treated as a translation key for the scope locale.
    fn with_assets(self, _fallback: &Self, scope: &Scope<'_>) -> Self {
        match scope.assets {
            Some((assets, locale)) => assets
                .translation(locale, &self)
                .map(str::to_owned)
                .unwrap_or(self),
            None => self,
        }
    }
}

impl Resolvable for f64 {}

impl Resolvable for bool {}

impl Resolvable for ImageRef {
    /// An image the host has no bytes for falls back to the default.
    fn with_assets(self, fallback: &Self, scope: &Scope<'_>) -> Self {
        match scope.assets {
            Some((assets, _)) if assets.image(&self).is_none() => fallback.clone(),
            _ => self,
        }
    }
}

impl Resolvable for NodeKey {}

impl<T: Resolvable> Binding<T> {
    /// Resolves the binding, returning `fallback` whenever the source is absent or has the wrong
    /// type.
    pub fn resolve(&self, fallback: &T, scope: &Scope<'_>) -> T {
        let value = match self {
            Self::Literal(value) => Some(value.clone()),
            Self::Property(name) => scope.environment.get(name).and_then(T::from_property),
            Self::DataPath(path) => scope
                .data
                .and_then(|data| evaluate(data, path))
                .and_then(T::coerce),
        };
        match value {
            Some(value) => value.with_assets(fallback, scope),
            None => fallback.clone(),
        }
    }
}

fn resolve_as<T: Resolvable>(
    binding: &Binding<T>,
    default: &PropertyValue,
    scope: &Scope<'_>,
) -> Option<PropertyValue> {
    let fallback = T::from_property(default)?;
    Some(binding.resolve(&fallback, scope).into_property())
}

/// The value an instance supplies for one declared property.
///
/// Overrides whose kind differs from the declaration are ignored.
pub fn resolve_override(
    override_value: Option<&OverrideValue>,
    default: &PropertyValue,
    scope: &Scope<'_>,
) -> PropertyValue {
    let resolved = match override_value {
        Some(value) if value.kind() == default.kind() => match value {
            OverrideValue::Text(b) => resolve_as(b, default, scope),
            OverrideValue::Number(b) => resolve_as(b, default, scope),
            OverrideValue::Boolean(b) => resolve_as(b, default, scope),
            OverrideValue::Image(b) => resolve_as(b, default, scope),
            OverrideValue::Component(b) => resolve_as(b, default, scope),
        },
        _ => None,
    };
    resolved.unwrap_or_else(|| default.clone())
}

/// One expanded component instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInstance {
    pub instance: NodeKey,
    pub component: NodeKey,
    /// Effective property values inside this placement of the component.
    pub environment: Environment,
    /// Instances inside the component's subtree, resolved against `environment`.
    pub nested: Vec<ResolvedInstance>,
    /// The component is already being expanded further up; `nested` was not expanded again.
    pub recursive: bool,
}

impl ResolvedInstance {
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.environment.get(name)
    }

    /// Depth-first search for the expansion of `instance`.
    pub fn find(&self, instance: NodeKey) -> Option<&ResolvedInstance> {
        if self.instance == instance {
            return Some(self);
        }
        self.nested.iter().find_map(|nested| nested.find(instance))
    }
}

/// Scope for previewing a component on its own.
#[derive(Debug, Clone)]
pub struct Preview<'c> {
    pub environment: Environment,
    pub data: Option<&'c Value>,
}

impl Preview<'_> {
    pub fn scope(&self) -> Scope<'_> {
        Scope {
            environment: &self.environment,
            data: self.data,
            assets: None,
        }
    }
}

/// Computes effective property values for component instances.
#[derive(Debug, Clone, Copy)]
pub struct OverrideResolver<'d> {
    document: &'d Document,
}

impl<'d> OverrideResolver<'d> {
    pub fn new(document: &'d Document) -> Self {
        Self { document }
    }

    /// The main component an instance places, if it resolves to one.
    pub fn component_of(&self, instance: &ComponentInstance, scope: &Scope<'_>) -> Option<NodeKey> {
        let key = match &instance.value {
            ComponentReference::Main(key) => *key,
            ComponentReference::Property(name) => match scope.environment.get(name) {
                Some(PropertyValue::Component(key)) => *key,
                _ => return None,
            },
        };
        self.main_component(key).map(|_| key)
    }

    fn main_component(&self, key: NodeKey) -> Option<&'d MainComponent> {
        self.document.node(key).and_then(|node| node.as_main_component())
    }

    /// Effective values of every declared property of `component` as placed by `instance`.
    pub fn resolve_properties(
        &self,
        component: &MainComponent,
        instance: &ComponentInstance,
        scope: &Scope<'_>,
    ) -> Environment {
        component
            .properties()
            .iter()
            .map(|(name, default)| {
                let value = resolve_override(instance.overrides.get(name), default, scope);
                (name.clone(), value)
            })
            .collect()
    }

    /// Expands the instance at `instance`, including every instance nested in its component.
    ///
    /// `None` when `instance` is not a component instance or its component does not resolve.
    pub fn environment_for(&self, instance: NodeKey, scope: &Scope<'_>) -> Option<ResolvedInstance> {
        let mut chain = Vec::new();
        self.expand(instance, scope, &mut chain)
    }

    fn expand(
        &self,
        instance_key: NodeKey,
        scope: &Scope<'_>,
        chain: &mut Vec<NodeKey>,
    ) -> Option<ResolvedInstance> {
        let NodeKind::ComponentInstance(instance) = self.document.node(instance_key)?.kind() else {
            return None;
        };
        let component_key = self.component_of(instance, scope)?;
        let component = self.main_component(component_key)?;
        let environment = self.resolve_properties(component, instance, scope);

        if chain.contains(&component_key) {
            debug!(
                instance = %instance_key,
                component = %component_key,
                "component already on the expansion chain"
            );
            return Some(ResolvedInstance {
                instance: instance_key,
                component: component_key,
                environment,
                nested: Vec::new(),
                recursive: true,
            });
        }

        chain.push(component_key);
        let inner = scope.nested(&environment);
        let nested = self
            .document
            .descendants(component_key)
            .into_iter()
            .filter_map(|key| self.expand(key, &inner, chain))
            .collect();
        chain.pop();

        Some(ResolvedInstance {
            instance: instance_key,
            component: component_key,
            environment,
            nested,
            recursive: false,
        })
    }

    /// The component's defaults as environment, plus its preview data as external data.
    pub fn preview_scope(component: &MainComponent) -> Preview<'_> {
        Preview {
            environment: component.properties().clone(),
            data: component.preview.data.as_ref(),
        }
    }
}
