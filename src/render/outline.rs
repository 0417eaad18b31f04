// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::Write as _;

use crate::model::{FlowNode, FlowchartAst};

const DEFAULT_MAX_LABEL_LEN: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineOptions {
    /// Labels longer than this many chars are cut with `…`. `0` disables truncation.
    pub max_label_len: usize,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self { max_label_len: DEFAULT_MAX_LABEL_LEN }
    }
}

fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 || text.chars().count() <= max_len {
        return text.to_owned();
    }
    if max_len == 1 {
        return "…".to_owned();
    }

    let mut out: String = text.chars().take(max_len - 1).collect();
    out.push('…');
    out
}

fn node_label(node_id: &str, node: Option<&FlowNode>, options: &OutlineOptions) -> String {
    match node {
        Some(node) if node.has_explicit_label() => {
            let (open, close) = node.shape().delimiters();
            format!(
                "{node_id} {open}{}{close}",
                truncate_with_ellipsis(node.label(), options.max_label_len)
            )
        }
        _ => node_id.to_owned(),
    }
}

fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Plain-text outline of a flowchart: every node in id order, each followed by its outgoing edges.
///
/// ```text
/// graph TD (3 nodes, 2 edges)
/// A [Start]
///   --> B
/// B
///   -->|ok| C [Done]
/// C [Done]
/// ```
pub fn render_outline(ast: &FlowchartAst, options: &OutlineOptions) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "graph {} ({}, {})",
        ast.direction(),
        count(ast.nodes().len(), "node"),
        count(ast.edges().len(), "edge")
    );

    for (node_id, node) in ast.nodes() {
        out.push('\n');
        out.push_str(&node_label(node_id, Some(node), options));

        for edge in ast.edges().iter().filter(|edge| edge.from() == node_id) {
            out.push_str("\n  ");
            out.push_str(edge.connector());
            if let Some(label) = edge.label() {
                out.push('|');
                out.push_str(&truncate_with_ellipsis(label, options.max_label_len));
                out.push('|');
            }
            out.push(' ');
            out.push_str(&node_label(edge.to(), ast.nodes().get(edge.to()), options));
        }
    }

    out
}
