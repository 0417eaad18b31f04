// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use super::source::Orientation;

/// Direction declared by a flowchart header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlowDirection {
    #[default]
    TopDown,
    TopBottom,
    LeftRight,
    RightLeft,
    BottomTop,
}

impl FlowDirection {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "TD" => Some(Self::TopDown),
            "TB" => Some(Self::TopBottom),
            "LR" => Some(Self::LeftRight),
            "RL" => Some(Self::RightLeft),
            "BT" => Some(Self::BottomTop),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::TopDown => "TD",
            Self::TopBottom => "TB",
            Self::LeftRight => "LR",
            Self::RightLeft => "RL",
            Self::BottomTop => "BT",
        }
    }

    /// The supported orientation this direction declares, if any.
    pub fn orientation(self) -> Option<Orientation> {
        Orientation::from_header_token(self.token())
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl From<Orientation> for FlowDirection {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::TopDown => Self::TopDown,
            Orientation::LeftRight => Self::LeftRight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeShape {
    Rect,
    Round,
    Diamond,
}

impl NodeShape {
    pub fn delimiters(self) -> (char, char) {
        match self {
            Self::Rect => ('[', ']'),
            Self::Round => ('(', ')'),
            Self::Diamond => ('{', '}'),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Round => "round",
            Self::Diamond => "diamond",
        }
    }
}

/// Parsed flowchart: nodes keyed by their Mermaid id, edges in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowchartAst {
    direction: FlowDirection,
    nodes: BTreeMap<String, FlowNode>,
    edges: Vec<FlowEdge>,
}

impl FlowchartAst {
    pub fn new(direction: FlowDirection) -> Self {
        Self { direction, ..Self::default() }
    }

    pub fn direction(&self) -> FlowDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: FlowDirection) {
        self.direction = direction;
    }

    pub fn nodes(&self) -> &BTreeMap<String, FlowNode> {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut BTreeMap<String, FlowNode> {
        &mut self.nodes
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut Vec<FlowEdge> {
        &mut self.edges
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowNode {
    label: String,
    shape: NodeShape,
    explicit_label: bool,
}

impl FlowNode {
    /// A node referenced only by id; its label defaults to the id.
    pub fn implicit(mermaid_id: impl Into<String>) -> Self {
        Self { label: mermaid_id.into(), shape: NodeShape::Rect, explicit_label: false }
    }

    pub fn new_with(label: impl Into<String>, shape: NodeShape) -> Self {
        Self { label: label.into(), shape, explicit_label: true }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn shape(&self) -> NodeShape {
        self.shape
    }

    pub fn has_explicit_label(&self) -> bool {
        self.explicit_label
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEdge {
    from: String,
    to: String,
    label: Option<String>,
    connector: String,
}

impl FlowEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into(), label: None, connector: "-->".to_owned() }
    }

    pub fn with_label<T: Into<String>>(mut self, label: Option<T>) -> Self {
        self.label = label.map(Into::into);
        self
    }

    pub fn with_connector(mut self, connector: impl Into<String>) -> Self {
        self.connector = connector.into();
        self
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn connector(&self) -> &str {
        &self.connector
    }
}
