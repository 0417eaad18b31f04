// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::DiagramSource;

/// A rejected render, classified by whether the fallback path is still open.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagramError {
    /// The renderer rejected a generated source; repair or a template may still help.
    #[error("diagram grammar error: {message}")]
    Grammar { message: String },
    /// A repaired or template source was rejected as well.
    #[error("diagram grammar error after fallback: {message}")]
    UnrecoverableGrammar { message: String, diagram: DiagramSource },
}

impl DiagramError {
    pub fn message(&self) -> &str {
        match self {
            Self::Grammar { message } | Self::UnrecoverableGrammar { message, .. } => message,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Grammar { .. })
    }
}
