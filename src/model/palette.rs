// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Document-level color and gradient palettes, and the fill/color values that point into them.

use super::ids::{ColorId, GradientId};

/// Straight (non-premultiplied) RGBA, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            f64::from(a) / 255.0,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentColor {
    pub name: Option<String>,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub location: f64,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentGradient {
    pub name: Option<String>,
    /// Degrees, clockwise from the leading edge.
    pub angle: f64,
    pub stops: Vec<GradientStop>,
}

/// A color that is either fixed or taken from the document palette.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorValue {
    Solid(Rgba),
    Document(ColorId),
}

/// A paint for backgrounds and shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Rgba),
    DocumentColor(ColorId),
    DocumentGradient(GradientId),
}
