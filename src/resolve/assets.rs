// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use indexmap::IndexSet;

use crate::model::{Binding, Document, ImageRef, NodeKind, OverrideValue, PropertyValue};

/// Images, fonts and translations supplied by the host.
///
/// Resolution only consults a provider as a fallback source; a document resolves without one.
pub trait AssetProvider {
    fn image(&self, image: &ImageRef) -> Option<&[u8]>;

    fn font(&self, family: &str) -> Option<&[u8]>;

    fn translation(&self, locale: &str, key: &str) -> Option<&str>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryAssets {
    images: HashMap<ImageRef, Vec<u8>>,
    fonts: HashMap<String, Vec<u8>>,
    translations: HashMap<String, HashMap<String, String>>,
}

impl InMemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, image: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.images.insert(ImageRef::new(image), bytes.into());
        self
    }

    pub fn with_font(mut self, family: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.fonts.insert(family.into(), bytes.into());
        self
    }

    pub fn with_translation(
        mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.translations
            .entry(locale.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }
}

impl AssetProvider for InMemoryAssets {
    fn image(&self, image: &ImageRef) -> Option<&[u8]> {
        self.images.get(image).map(Vec::as_slice)
    }

    fn font(&self, family: &str) -> Option<&[u8]> {
        self.fonts.get(family).map(Vec::as_slice)
    }

    fn translation(&self, locale: &str, key: &str) -> Option<&str> {
        self.translations
            .get(locale)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }
}

/// Literal asset references a provider cannot satisfy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingAssets {
    pub images: IndexSet<ImageRef>,
    pub fonts: IndexSet<String>,
}

impl MissingAssets {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.fonts.is_empty()
    }
}

impl Document {
    /// Lists the literal image references and font families in the document that `provider`
    /// has no bytes for. Bound values are skipped; they are only known at resolution time.
    pub fn missing_assets(&self, provider: &dyn AssetProvider) -> MissingAssets {
        let mut missing = MissingAssets::default();
        let mut check_image = |image: &ImageRef| {
            if provider.image(image).is_none() {
                missing.images.insert(image.clone());
            }
        };

        let mut fonts = Vec::new();
        for (_, node) in self.nodes().iter() {
            match node.kind() {
                NodeKind::Image(image) => {
                    if let Binding::Literal(image) = &image.image {
                        check_image(image);
                    }
                }
                NodeKind::Text(text) => fonts.extend(text.font_family.iter()),
                NodeKind::MainComponent(component) => {
                    for value in component.properties().values() {
                        if let PropertyValue::Image(image) = value {
                            check_image(image);
                        }
                    }
                }
                NodeKind::ComponentInstance(instance) => {
                    for value in instance.overrides.values() {
                        if let OverrideValue::Image(Binding::Literal(image)) = value {
                            check_image(image);
                        }
                    }
                }
                _ => {}
            }
        }

        for family in fonts {
            if provider.font(family).is_none() {
                missing.fonts.insert(family.clone());
            }
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::{AssetProvider, InMemoryAssets};
    use crate::model::{fixtures, ImageRef};

    #[test]
    fn in_memory_lookups() {
        let assets = InMemoryAssets::new()
            .with_image("hero", vec![1, 2, 3])
            .with_font("Inter", b"font".to_vec())
            .with_translation("de", "Welcome", "Willkommen");

        assert_eq!(assets.image(&ImageRef::new("hero")), Some(&[1u8, 2, 3][..]));
        assert_eq!(assets.image(&ImageRef::new("logo")), None);
        assert_eq!(assets.font("Inter"), Some(&b"font"[..]));
        assert_eq!(assets.translation("de", "Welcome"), Some("Willkommen"));
        assert_eq!(assets.translation("fr", "Welcome"), None);
    }

    #[test]
    fn missing_assets_lists_unsupplied_literals() {
        let doc = fixtures::card_screen();
        let missing = doc.missing_assets(&InMemoryAssets::new().with_image("hero", vec![0]));

        let images = missing.images.iter().map(ImageRef::as_str).collect::<Vec<_>>();
        assert_eq!(images, ["placeholder"]);
        assert!(missing.fonts.is_empty());

        let complete = InMemoryAssets::new()
            .with_image("hero", vec![0])
            .with_image("placeholder", vec![0]);
        assert!(doc.missing_assets(&complete).is_empty());
    }
}
