// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use archwize::format::mermaid::export_flowchart;
use archwize::model::{FlowDirection, FlowEdge, FlowNode, FlowchartAst, NodeShape};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DagParams {
    pub layers: usize,
    pub nodes_per_layer: usize,
    pub fanout: usize,
    pub label_len: usize,
}

impl DagParams {
    pub const fn new(
        layers: usize,
        nodes_per_layer: usize,
        fanout: usize,
        label_len: usize,
    ) -> Self {
        Self { layers, nodes_per_layer, fanout, label_len }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    MediumDense,
    LargeLongLabels,
}

impl Case {
    pub const ALL: [Case; 3] = [Case::Small, Case::MediumDense, Case::LargeLongLabels];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumDense => "medium_dense",
            Self::LargeLongLabels => "large_long_labels",
        }
    }

    pub const fn params(self) -> DagParams {
        match self {
            Self::Small => DagParams::new(6, 10, 2, 12),
            Self::MediumDense => DagParams::new(12, 20, 4, 12),
            Self::LargeLongLabels => DagParams::new(24, 35, 4, 64),
        }
    }
}

fn ascii_repeat_to_len(prefix: &str, fill: char, target_len: usize) -> String {
    if prefix.len() >= target_len {
        return prefix[..target_len].to_owned();
    }

    let mut out = String::with_capacity(target_len);
    out.push_str(prefix);
    while out.len() < target_len {
        out.push(fill);
    }
    out
}

fn node_id(layer: usize, idx: usize) -> String {
    format!("l{layer:02}_n{idx:04}")
}

fn node_label(layer: usize, idx: usize, label_len: usize) -> String {
    ascii_repeat_to_len(&format!("Node {}", node_id(layer, idx)), 'x', label_len)
}

/// Deterministic layered DAG; every third node is a decision.
pub fn dag(params: DagParams) -> FlowchartAst {
    assert!(params.layers >= 2, "layers must be >= 2");
    assert!(params.nodes_per_layer >= 1, "nodes_per_layer must be >= 1");

    let mut ast = FlowchartAst::new(FlowDirection::TopDown);
    for layer in 0..params.layers {
        for idx in 0..params.nodes_per_layer {
            let shape = if idx % 3 == 0 { NodeShape::Diamond } else { NodeShape::Rect };
            let label = node_label(layer, idx, params.label_len);
            ast.nodes_mut().insert(node_id(layer, idx), FlowNode::new_with(label, shape));
        }
    }

    let fanout = params.fanout.clamp(1, params.nodes_per_layer);
    for layer in 0..params.layers - 1 {
        for idx in 0..params.nodes_per_layer {
            for k in 0..fanout {
                let to_idx = (idx + k) % params.nodes_per_layer;
                let edge = FlowEdge::new(node_id(layer, idx), node_id(layer + 1, to_idx))
                    .with_label((k == 1).then_some("yes"));
                ast.edges_mut().push(edge);
            }
        }
    }
    ast
}

pub fn valid_source(case: Case) -> String {
    export_flowchart(&dag(case.params())).expect("export_flowchart")
}

/// The same graph written the way a sloppy model reply would: no header, no terminators,
/// declarations side by side on one line, operators glued to ids and doubled label pipes.
pub fn broken_source(case: Case) -> String {
    let params = case.params();
    let fanout = params.fanout.clamp(1, params.nodes_per_layer);
    let mut out = String::new();

    for layer in 0..params.layers {
        for pair in (0..params.nodes_per_layer).collect::<Vec<_>>().chunks(2) {
            let decls: Vec<String> = pair
                .iter()
                .map(|&idx| {
                    format!("{}[{}]", node_id(layer, idx), node_label(layer, idx, params.label_len))
                })
                .collect();
            out.push_str(&decls.join(" "));
            out.push('\n');
        }
    }

    for layer in 0..params.layers - 1 {
        for idx in 0..params.nodes_per_layer {
            for k in 0..fanout {
                let to = node_id(layer + 1, (idx + k) % params.nodes_per_layer);
                if k == 1 {
                    out.push_str(&format!("{}-->||yes||{to}\n", node_id(layer, idx)));
                } else {
                    out.push_str(&format!("{}-->{to}\n", node_id(layer, idx)));
                }
            }
        }
    }
    out
}

pub fn checksum_flowchart(ast: &FlowchartAst) -> u64 {
    let mut acc = 0u64;
    for (node_id, node) in ast.nodes() {
        acc = acc.wrapping_mul(131).wrapping_add(node_id.len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(node.label().len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(node.shape().as_str().len() as u64);
    }
    for edge in ast.edges() {
        acc = acc.wrapping_mul(131).wrapping_add(edge.from().len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(edge.to().len() as u64);
        if let Some(label) = edge.label() {
            acc = acc.wrapping_mul(131).wrapping_add(label.len() as u64);
        }
    }
    acc
}
