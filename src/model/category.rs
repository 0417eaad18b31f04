// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Content category assigned by the classifier; drives template selection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum DiagramCategory {
    OrderProcessing,
    Checkout,
    Registration,
    Login,
    ApiRequest,
    Unclassified,
}

impl DiagramCategory {
    pub const ALL: [DiagramCategory; 6] = [
        DiagramCategory::OrderProcessing,
        DiagramCategory::Checkout,
        DiagramCategory::Registration,
        DiagramCategory::Login,
        DiagramCategory::ApiRequest,
        DiagramCategory::Unclassified,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OrderProcessing => "order-processing",
            Self::Checkout => "checkout",
            Self::Registration => "registration",
            Self::Login => "login",
            Self::ApiRequest => "api-request",
            Self::Unclassified => "unclassified",
        }
    }

    pub fn is_classified(self) -> bool {
        self != Self::Unclassified
    }
}

impl fmt::Display for DiagramCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown diagram category: {value:?}")]
pub struct ParseDiagramCategoryError {
    value: String,
}

impl FromStr for DiagramCategory {
    type Err = ParseDiagramCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ParseDiagramCategoryError { value: s.to_owned() })
    }
}
