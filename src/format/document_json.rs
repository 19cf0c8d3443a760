// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Fixed-shape records (metadata and palettes), decoded through serde derive.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::record::JsonFloat;
use super::DecodeError;
use crate::model::{
    ColorId, Document, DocumentColor, DocumentGradient, GradientId, GradientStop, Metadata, Rgba,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MetadataJson {
    pub document_version: u32,
    pub compatibility_version: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DocumentJson {
    #[serde(default)]
    pub nodes: Vec<Value>,
    #[serde(default)]
    pub colors: Vec<ColorJson>,
    #[serde(default)]
    pub gradients: Vec<GradientJson>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct RgbaJson {
    r: JsonFloat,
    g: JsonFloat,
    b: JsonFloat,
    #[serde(default = "opaque")]
    a: JsonFloat,
}

fn opaque() -> JsonFloat {
    JsonFloat(1.0)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ColorJson {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    color: RgbaJson,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct GradientJson {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default = "zero")]
    angle: JsonFloat,
    #[serde(default)]
    stops: Vec<GradientStopJson>,
}

fn zero() -> JsonFloat {
    JsonFloat(0.0)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct GradientStopJson {
    location: JsonFloat,
    color: RgbaJson,
}

pub(crate) fn metadata_from_json(metadata_json: MetadataJson) -> Metadata {
    Metadata {
        document_version: metadata_json.document_version,
        compatibility_version: metadata_json.compatibility_version,
    }
}

pub(crate) fn metadata_to_json(metadata: Metadata) -> MetadataJson {
    MetadataJson {
        document_version: metadata.document_version,
        compatibility_version: metadata.compatibility_version,
    }
}

fn rgba_from_json(rgba_json: RgbaJson) -> Rgba {
    Rgba::new(rgba_json.r.0, rgba_json.g.0, rgba_json.b.0, rgba_json.a.0)
}

fn rgba_to_json(rgba: Rgba) -> RgbaJson {
    RgbaJson {
        r: JsonFloat(rgba.r),
        g: JsonFloat(rgba.g),
        b: JsonFloat(rgba.b),
        a: JsonFloat(rgba.a),
    }
}

/// Moves the palettes of a `document` record into `document`.
pub(crate) fn palettes_from_json(
    colors: Vec<ColorJson>,
    gradients: Vec<GradientJson>,
    document: &mut Document,
) -> Result<(), DecodeError> {
    for color_json in colors {
        let id = ColorId::new(color_json.id.clone()).map_err(|source| DecodeError::InvalidId {
            field: "colors[].id",
            value: color_json.id,
            source,
        })?;
        let color = DocumentColor {
            name: color_json.name,
            color: rgba_from_json(color_json.color),
        };
        document.colors_mut().insert(id, color);
    }

    for gradient_json in gradients {
        let id =
            GradientId::new(gradient_json.id.clone()).map_err(|source| DecodeError::InvalidId {
                field: "gradients[].id",
                value: gradient_json.id,
                source,
            })?;
        let gradient = DocumentGradient {
            name: gradient_json.name,
            angle: gradient_json.angle.0,
            stops: gradient_json
                .stops
                .into_iter()
                .map(|stop| GradientStop {
                    location: stop.location.0,
                    color: rgba_from_json(stop.color),
                })
                .collect(),
        };
        document.gradients_mut().insert(id, gradient);
    }
    Ok(())
}

pub(crate) fn colors_to_json(document: &Document) -> Vec<ColorJson> {
    document
        .colors()
        .iter()
        .map(|(id, color)| ColorJson {
            id: id.to_string(),
            name: color.name.clone(),
            color: rgba_to_json(color.color),
        })
        .collect()
}

pub(crate) fn gradients_to_json(document: &Document) -> Vec<GradientJson> {
    document
        .gradients()
        .iter()
        .map(|(id, gradient)| GradientJson {
            id: id.to_string(),
            name: gradient.name.clone(),
            angle: JsonFloat(gradient.angle),
            stops: gradient
                .stops
                .iter()
                .map(|stop| GradientStopJson {
                    location: JsonFloat(stop.location),
                    color: rgba_to_json(stop.color),
                })
                .collect(),
        })
        .collect()
}
