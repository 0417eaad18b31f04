// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mermaid flowchart parsing, exporting and reply unwrapping.

pub mod fence;
pub mod flowchart;
mod ident;
pub(crate) mod syntax;

pub use fence::extract_diagram_source;
pub use flowchart::{
    export_flowchart, parse_flowchart, MermaidFlowchartExportError, MermaidFlowchartParseError,
};
