// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The renderer boundary.
//!
//! A [`Renderer`] turns a [`DiagramSource`] into a [`RenderOutcome`]. The real drawing happens in
//! a browser; [`MermaidRenderer`] accepts exactly the grammar the browser accepts and produces a
//! plain-text outline in place of the picture.

use std::future::Future;

use log::debug;

use crate::format::mermaid::parse_flowchart;
use crate::model::{DiagramSource, FlowchartAst};

mod outline;

pub use outline::{render_outline, OutlineOptions};

/// What a successful render produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderArtifact {
    ast: FlowchartAst,
    outline: String,
}

impl RenderArtifact {
    pub fn new(ast: FlowchartAst, outline: impl Into<String>) -> Self {
        Self { ast, outline: outline.into() }
    }

    pub fn ast(&self) -> &FlowchartAst {
        &self.ast
    }

    pub fn outline(&self) -> &str {
        &self.outline
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(RenderArtifact),
    /// The renderer's error message, verbatim.
    Failed(String),
}

impl RenderOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

/// External renderer. Completion may arrive after the caller has moved on; the controller
/// discards stale completions by generation.
pub trait Renderer {
    fn render(&self, source: &DiagramSource) -> impl Future<Output = RenderOutcome>;
}

/// Grammar-equivalent stand-in for the browser renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidRenderer {
    options: OutlineOptions,
}

impl MermaidRenderer {
    pub fn new(options: OutlineOptions) -> Self {
        Self { options }
    }

    /// Synchronous core of [`Renderer::render`].
    pub fn render_now(&self, source: &DiagramSource) -> RenderOutcome {
        match parse_flowchart(source.as_str()) {
            Ok(ast) => {
                debug!(nodes = ast.nodes().len(), edges = ast.edges().len(); "Flowchart accepted");
                let outline = render_outline(&ast, &self.options);
                RenderOutcome::Rendered(RenderArtifact::new(ast, outline))
            }
            Err(err) => {
                debug!(line_no:? = err.line_no(); "Flowchart rejected: {err}");
                RenderOutcome::Failed(err.to_string())
            }
        }
    }
}

impl Renderer for MermaidRenderer {
    async fn render(&self, source: &DiagramSource) -> RenderOutcome {
        self.render_now(source)
    }
}
