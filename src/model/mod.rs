// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core value types shared by the repair engine, the classifier and the renderer boundary.

pub mod category;
pub mod flow_ast;
pub mod source;

pub use category::{DiagramCategory, ParseDiagramCategoryError};
pub use flow_ast::{FlowDirection, FlowEdge, FlowNode, FlowchartAst, NodeShape};
pub use source::{DiagramSource, Orientation, ParseOrientationError};
