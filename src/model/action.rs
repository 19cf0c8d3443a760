// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tessera-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tessera and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::NodeKey;
use super::value::Binding;

/// What a button does when tapped.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Push the destination screen.
    Navigate { destination: NodeKey },
    OpenUrl { url: Binding<String> },
    /// Pop the current screen.
    Dismiss,
}

impl Action {
    pub fn case_name(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "navigate",
            Self::OpenUrl { .. } => "openURL",
            Self::Dismiss => "dismiss",
        }
    }
}
