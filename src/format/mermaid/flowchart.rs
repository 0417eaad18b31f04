// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ident::validate_mermaid_ident;
pub use super::ident::MermaidIdentError;
use super::syntax::{
    closing_delimiter, edge_operator_len, is_ident_char, line_kind, node_declaration_len,
    scan_line, split_statements, LineKind, ScannedChar,
};

use crate::model::{FlowDirection, FlowEdge, FlowNode, FlowchartAst, NodeShape};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MermaidFlowchartParseError {
    #[error("expected 'graph' or 'flowchart' as the first statement")]
    MissingHeader,
    #[error("invalid flowchart direction on line {line_no}: {direction} (expected TD/TB/LR/RL/BT)")]
    InvalidDirection { line_no: usize, direction: String },
    #[error("duplicate flowchart header on line {line_no}")]
    DuplicateHeader { line_no: usize },
    #[error("unsupported Mermaid syntax on line {line_no}: {line}")]
    UnsupportedSyntax { line_no: usize, line: String },
    #[error("invalid node id on line {line_no}: {name} ({reason})")]
    InvalidNodeId { line_no: usize, name: String, reason: MermaidIdentError },
    #[error(
        "unexpected '{token}' after node declaration on line {line_no} (missing edge connector?)"
    )]
    UnexpectedToken { line_no: usize, token: String },
    #[error("unterminated node label on line {line_no}: {token}")]
    UnterminatedNodeLabel { line_no: usize, token: String },
    #[error("empty node label on line {line_no}: {token}")]
    EmptyNodeLabel { line_no: usize, token: String },
    #[error("edge on line {line_no} is missing a node: {line}")]
    DanglingEdge { line_no: usize, line: String },
    #[error("unterminated edge label on line {line_no}: {line}")]
    UnterminatedEdgeLabel { line_no: usize, line: String },
    #[error("empty edge label on line {line_no}: {line}")]
    EmptyEdgeLabel { line_no: usize, line: String },
}

impl MermaidFlowchartParseError {
    /// 1-based line of the offending statement, when the error is tied to one.
    pub fn line_no(&self) -> Option<usize> {
        match self {
            Self::MissingHeader => None,
            Self::InvalidDirection { line_no, .. }
            | Self::DuplicateHeader { line_no }
            | Self::UnsupportedSyntax { line_no, .. }
            | Self::InvalidNodeId { line_no, .. }
            | Self::UnexpectedToken { line_no, .. }
            | Self::UnterminatedNodeLabel { line_no, .. }
            | Self::EmptyNodeLabel { line_no, .. }
            | Self::DanglingEdge { line_no, .. }
            | Self::UnterminatedEdgeLabel { line_no, .. }
            | Self::EmptyEdgeLabel { line_no, .. } => Some(*line_no),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MermaidFlowchartExportError {
    #[error("cannot export node id as Mermaid identifier: {node_id}")]
    InvalidNodeId { node_id: String },
    #[error("cannot export node label for {node_id}: contains unsupported characters: {label:?}")]
    InvalidNodeLabel { node_id: String, label: String },
    #[error("cannot export edge label {from} -> {to}: contains unsupported characters: {label:?}")]
    InvalidEdgeLabel { from: String, to: String, label: String },
    #[error("cannot export edge {from} -> {to}: unsupported connector {connector:?}")]
    InvalidConnector { from: String, to: String, connector: String },
    #[error("edge references missing node id: {node_id}")]
    MissingNode { node_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeDirection {
    Forward,
    Reverse,
}

fn edge_direction(op: &str) -> EdgeDirection {
    let has_left = op.contains('<');
    let has_right = op.contains('>');
    if has_left && !has_right {
        EdgeDirection::Reverse
    } else {
        EdgeDirection::Forward
    }
}

fn is_inline_label_opener(op: &str) -> bool {
    matches!(op, "--" | "==" | "-.")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part<'a> {
    Node(&'a str),
    Link { op: &'a str, label: Option<&'a str> },
}

fn byte_at(chars: &[ScannedChar], pos: usize, len: usize) -> usize {
    chars.get(pos).map(|sc| sc.idx).unwrap_or(len)
}

/// Splits a statement into alternating node segments and links. Always starts and ends with a
/// node segment (possibly empty).
fn split_edge_statement(
    statement: &str,
    line_no: usize,
) -> Result<Vec<Part<'_>>, MermaidFlowchartParseError> {
    let chars = scan_line(statement);
    let mut parts = Vec::new();
    let mut segment_start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let Some(len) = edge_operator_len(&chars, i) else {
            i += 1;
            continue;
        };

        let op_start = chars[i].idx;
        let op_end = byte_at(&chars, i + len, statement.len());
        parts.push(Part::Node(&statement[segment_start..op_start]));

        let mut next = i + len;
        while chars.get(next).is_some_and(|sc| !sc.opaque && sc.ch.is_whitespace()) {
            next += 1;
        }

        let mut label = None;
        if chars.get(next).is_some_and(|sc| !sc.opaque && sc.ch == '|') {
            let open = next;
            let close = (open + 1..chars.len())
                .find(|&k| !chars[k].opaque && chars[k].ch == '|')
                .ok_or_else(|| MermaidFlowchartParseError::UnterminatedEdgeLabel {
                    line_no,
                    line: statement.trim().to_owned(),
                })?;
            label = Some(&statement[chars[open].idx + 1..chars[close].idx]);
            next = close + 1;
        } else {
            next = i + len;
        }

        parts.push(Part::Link { op: &statement[op_start..op_end], label });
        segment_start = byte_at(&chars, next, statement.len());
        i = next;
    }

    parts.push(Part::Node(&statement[segment_start..]));
    Ok(parts)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeSpec {
    mermaid_id: String,
    label: Option<String>,
    shape: NodeShape,
}

fn strip_quotes(label: &str) -> &str {
    if label.len() >= 2 && label.starts_with('"') && label.ends_with('"') {
        &label[1..label.len() - 1]
    } else {
        label
    }
}

fn parse_node_spec(
    token: &str,
    line_no: usize,
    statement: &str,
) -> Result<NodeSpec, MermaidFlowchartParseError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(MermaidFlowchartParseError::DanglingEdge {
            line_no,
            line: statement.trim().to_owned(),
        });
    }

    let chars = scan_line(trimmed);
    let Some(len) = node_declaration_len(&chars, 0) else {
        let id_end = chars
            .iter()
            .position(|sc| sc.opaque || !is_ident_char(sc.ch))
            .unwrap_or(chars.len());
        if id_end > 0 && chars.get(id_end).is_some_and(|sc| closing_delimiter(sc.ch).is_some()) {
            return Err(MermaidFlowchartParseError::UnterminatedNodeLabel {
                line_no,
                token: trimmed.to_owned(),
            });
        }
        let name = &trimmed[..byte_at(&chars, id_end, trimmed.len())];
        let reason = validate_mermaid_ident(name).err().unwrap_or(MermaidIdentError::InvalidChar {
            ch: chars.get(id_end).map(|sc| sc.ch).unwrap_or('?'),
        });
        return Err(MermaidFlowchartParseError::InvalidNodeId {
            line_no,
            name: trimmed.to_owned(),
            reason,
        });
    };

    if len < chars.len() {
        return Err(MermaidFlowchartParseError::UnexpectedToken {
            line_no,
            token: trimmed[chars[len].idx..].trim().to_owned(),
        });
    }

    let Some(open) = chars.iter().find(|sc| sc.opaque) else {
        return Ok(NodeSpec { mermaid_id: trimmed.to_owned(), label: None, shape: NodeShape::Rect });
    };

    let shape = match open.ch {
        '(' => NodeShape::Round,
        '{' => NodeShape::Diamond,
        _ => NodeShape::Rect,
    };
    let mermaid_id = &trimmed[..open.idx];
    validate_mermaid_ident(mermaid_id).map_err(|reason| {
        MermaidFlowchartParseError::InvalidNodeId { line_no, name: mermaid_id.to_owned(), reason }
    })?;

    // Delimiters are ASCII, so both ends are one byte wide.
    let label = strip_quotes(trimmed[open.idx + 1..trimmed.len() - 1].trim()).trim();
    if label.is_empty() {
        return Err(MermaidFlowchartParseError::EmptyNodeLabel {
            line_no,
            token: trimmed.to_owned(),
        });
    }

    Ok(NodeSpec { mermaid_id: mermaid_id.to_owned(), label: Some(label.to_owned()), shape })
}

fn ensure_node(ast: &mut FlowchartAst, spec: NodeSpec) -> String {
    let NodeSpec { mermaid_id, label, shape } = spec;
    match label {
        // A later explicit declaration refines an earlier one, as in Mermaid.
        Some(label) => {
            ast.nodes_mut().insert(mermaid_id.clone(), FlowNode::new_with(label, shape));
        }
        None => {
            ast.nodes_mut()
                .entry(mermaid_id.clone())
                .or_insert_with(|| FlowNode::implicit(mermaid_id.clone()));
        }
    }
    mermaid_id
}

fn parse_header(
    statement: &str,
    line_no: usize,
) -> Result<FlowDirection, MermaidFlowchartParseError> {
    let mut words = statement.split_whitespace();
    match words.next() {
        Some("graph" | "flowchart") => {}
        _ => return Err(MermaidFlowchartParseError::MissingHeader),
    }

    let direction = match words.next() {
        None => FlowDirection::TopBottom,
        Some(token) => FlowDirection::from_token(token).ok_or_else(|| {
            MermaidFlowchartParseError::InvalidDirection { line_no, direction: token.to_owned() }
        })?,
    };

    if words.next().is_some() {
        return Err(MermaidFlowchartParseError::UnsupportedSyntax {
            line_no,
            line: statement.trim().to_owned(),
        });
    }

    Ok(direction)
}

fn parse_statement(
    ast: &mut FlowchartAst,
    statement: &str,
    line_no: usize,
) -> Result<(), MermaidFlowchartParseError> {
    let parts = split_edge_statement(statement, line_no)?;
    let unsupported = || MermaidFlowchartParseError::UnsupportedSyntax {
        line_no,
        line: statement.trim().to_owned(),
    };

    let Some(Part::Node(first)) = parts.first() else {
        return Err(unsupported());
    };
    if parts.len() == 1 {
        let spec = parse_node_spec(first, line_no, statement)?;
        ensure_node(ast, spec);
        return Ok(());
    }

    let mut current = parse_node_spec(first, line_no, statement)?;
    let mut idx = 1usize;
    while idx < parts.len() {
        let Part::Link { op, label } = parts[idx] else {
            return Err(unsupported());
        };

        let (op, label, rhs_idx) = if label.is_none() && is_inline_label_opener(op) {
            // `<lhs> -- <label> --> <rhs>`
            let (Some(Part::Node(text)), Some(Part::Link { op: closing, label: None })) =
                (parts.get(idx + 1), parts.get(idx + 2))
            else {
                return Err(unsupported());
            };
            (*closing, Some(*text), idx + 3)
        } else {
            (op, label, idx + 1)
        };

        let label = match label.map(str::trim) {
            Some("") => {
                return Err(MermaidFlowchartParseError::EmptyEdgeLabel {
                    line_no,
                    line: statement.trim().to_owned(),
                })
            }
            other => other.map(str::to_owned),
        };

        let Some(Part::Node(rhs_raw)) = parts.get(rhs_idx) else {
            return Err(unsupported());
        };
        let rhs = parse_node_spec(rhs_raw, line_no, statement)?;

        let (from_spec, to_spec) = match edge_direction(op) {
            EdgeDirection::Forward => (current.clone(), rhs.clone()),
            EdgeDirection::Reverse => (rhs.clone(), current.clone()),
        };
        let from = ensure_node(ast, from_spec);
        let to = ensure_node(ast, to_spec);
        ast.edges_mut().push(FlowEdge::new(from, to).with_label(label).with_connector(op));

        current = rhs;
        idx = rhs_idx + 1;
    }

    Ok(())
}

/// Parse the Mermaid `flowchart` subset the renderer accepts.
///
/// Supported:
/// - `graph`/`flowchart` header with optional direction (`TD`, `TB`, `LR`, `RL`, `BT`)
/// - `;` statement terminators, including several statements on one line
/// - comment lines starting with `%%`
/// - node declarations: `<id>`, `<id>[<label>]`, `<id>(<label>)`, `<id>{<label>}`; labels may
///   be wrapped in double quotes
/// - edges with any `-`/`=`/`.` operator, `|label|` and `-- label -->` labels, and chains
/// - `subgraph`/`end`/`style`/`classDef`/`class`/`click`/`linkStyle`/`direction` statements are
///   accepted and ignored
///
/// Anything else is rejected with an error naming the line.
pub fn parse_flowchart(input: &str) -> Result<FlowchartAst, MermaidFlowchartParseError> {
    let mut ast: Option<FlowchartAst> = None;

    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with("%%") {
            continue;
        }

        for statement in split_statements(trimmed) {
            let statement = statement.trim();
            match ast.as_mut() {
                None => ast = Some(FlowchartAst::new(parse_header(statement, line_no)?)),
                Some(current) => match line_kind(statement) {
                    LineKind::Header => {
                        return Err(MermaidFlowchartParseError::DuplicateHeader { line_no })
                    }
                    LineKind::Keyword | LineKind::Blank | LineKind::Comment => {}
                    LineKind::Statement => parse_statement(current, statement, line_no)?,
                },
            }
        }
    }

    ast.ok_or(MermaidFlowchartParseError::MissingHeader)
}

fn is_exportable_connector(op: &str) -> bool {
    let chars = scan_line(op);
    !chars.is_empty() && edge_operator_len(&chars, 0) == Some(chars.len())
}

/// Export a flowchart to canonical Mermaid text.
///
/// Export is deterministic: the header, then every node declaration in id order, then edges in
/// their stored order. Every statement is terminated with `;` and labels are quoted.
pub fn export_flowchart(ast: &FlowchartAst) -> Result<String, MermaidFlowchartExportError> {
    let mut out = String::new();
    out.push_str("graph ");
    out.push_str(ast.direction().token());
    out.push_str(";\n");

    for (node_id, node) in ast.nodes() {
        validate_mermaid_ident(node_id)
            .map_err(|_| MermaidFlowchartExportError::InvalidNodeId { node_id: node_id.clone() })?;

        out.push_str("    ");
        out.push_str(node_id);
        if node.has_explicit_label() {
            let label = node.label();
            if label.contains('"') || label.contains('\n') || label.contains('\r') {
                return Err(MermaidFlowchartExportError::InvalidNodeLabel {
                    node_id: node_id.clone(),
                    label: label.to_owned(),
                });
            }
            let (open, close) = node.shape().delimiters();
            out.push(open);
            out.push('"');
            out.push_str(label);
            out.push('"');
            out.push(close);
        }
        out.push_str(";\n");
    }

    for edge in ast.edges() {
        for node_id in [edge.from(), edge.to()] {
            if !ast.nodes().contains_key(node_id) {
                return Err(MermaidFlowchartExportError::MissingNode {
                    node_id: node_id.to_owned(),
                });
            }
        }

        if !is_exportable_connector(edge.connector()) {
            return Err(MermaidFlowchartExportError::InvalidConnector {
                from: edge.from().to_owned(),
                to: edge.to().to_owned(),
                connector: edge.connector().to_owned(),
            });
        }

        out.push_str("    ");
        out.push_str(edge.from());
        out.push(' ');
        out.push_str(edge.connector());
        if let Some(label) = edge.label() {
            if label.contains('|') || label.contains('\n') || label.contains('\r') {
                return Err(MermaidFlowchartExportError::InvalidEdgeLabel {
                    from: edge.from().to_owned(),
                    to: edge.to().to_owned(),
                    label: label.to_owned(),
                });
            }
            out.push('|');
            out.push_str(label);
            out.push('|');
        }
        out.push(' ');
        out.push_str(edge.to());
        out.push_str(";\n");
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{export_flowchart, parse_flowchart, MermaidFlowchartParseError};
    use crate::model::{FlowDirection, FlowEdge, FlowNode, FlowchartAst, NodeShape};

    type FlowNodeSemanticView = BTreeMap<String, (String, &'static str)>;
    type FlowEdgeSemanticView = BTreeMap<(String, String, Option<String>), usize>;

    fn semantic_view(ast: &FlowchartAst) -> (FlowNodeSemanticView, FlowEdgeSemanticView) {
        let nodes = ast
            .nodes()
            .iter()
            .map(|(id, node)| (id.clone(), (node.label().to_owned(), node.shape().as_str())))
            .collect::<BTreeMap<_, _>>();

        let mut edges = FlowEdgeSemanticView::new();
        for edge in ast.edges() {
            let key =
                (edge.from().to_owned(), edge.to().to_owned(), edge.label().map(str::to_owned));
            *edges.entry(key).or_insert(0) += 1;
        }

        (nodes, edges)
    }

    #[test]
    fn parses_generated_style_flowchart() {
        let input = r#"
            graph TD;
              Start["User Begins Registration"] --> EnterDetails["Enter User Details"];
              EnterDetails --> Validate{"Validate Input"};
              Validate -->|Valid| Success["Account Created"];
              Validate -->|Invalid| EnterDetails;
        "#;

        let ast = parse_flowchart(input).expect("parse");
        let (nodes, edges) = semantic_view(&ast);

        assert_eq!(ast.direction(), FlowDirection::TopDown);
        assert_eq!(nodes.len(), 4);
        assert_eq!(
            nodes.get("Validate"),
            Some(&("Validate Input".to_owned(), "diamond"))
        );
        assert_eq!(
            edges.get(&("Validate".to_owned(), "Success".to_owned(), Some("Valid".to_owned()))),
            Some(&1)
        );
        assert_eq!(ast.edges().len(), 4);
    }

    #[test]
    fn creates_implicit_nodes_from_edges_and_allows_label_upgrade() {
        let ast = parse_flowchart("flowchart\nA --> B\nA[Start]\n").expect("parse");
        let (nodes, _) = semantic_view(&ast);

        assert_eq!(ast.direction(), FlowDirection::TopBottom);
        assert_eq!(nodes.get("A"), Some(&("Start".to_owned(), "rect")));
        assert_eq!(nodes.get("B"), Some(&("B".to_owned(), "rect")));
    }

    #[test]
    fn accepts_several_statements_per_line() {
        let ast = parse_flowchart("graph LR; A --> B; B --> C;").expect("parse");
        assert_eq!(ast.direction(), FlowDirection::LeftRight);
        assert_eq!(ast.edges().len(), 2);
    }

    #[test]
    fn accepts_various_edge_operators_and_inline_labels() {
        let input = r#"
            graph LR
            A --- B
            B -.-> C
            C ==> D
            D <-- E
            E ---o F
            F -- yes --> G
            A --> B --> C
        "#;

        let ast = parse_flowchart(input).expect("parse");
        assert_eq!(ast.nodes().len(), 7);
        assert_eq!(ast.edges().len(), 8);

        let reversed = ast.edges().iter().find(|edge| edge.connector() == "<--").expect("edge");
        assert_eq!((reversed.from(), reversed.to()), ("E", "D"));
        let labeled = ast.edges().iter().find(|edge| edge.label().is_some()).expect("edge");
        assert_eq!(labeled.label(), Some("yes"));
    }

    #[test]
    fn ignores_comments_and_styling_statements() {
        let input = "%%{init: {}}%%\ngraph TD\nsubgraph Shop\nA --> B\nend\nstyle A fill:#f9f\n";
        let ast = parse_flowchart(input).expect("parse");
        assert_eq!(ast.edges().len(), 1);
    }

    #[test]
    fn rejects_missing_header() {
        let err = parse_flowchart("A --> B\n").unwrap_err();
        assert_eq!(err, MermaidFlowchartParseError::MissingHeader);
        assert_eq!(err.line_no(), None);
    }

    #[test]
    fn rejects_unknown_direction() {
        let err = parse_flowchart("graph XY\nA --> B").unwrap_err();
        assert!(matches!(err, MermaidFlowchartParseError::InvalidDirection { line_no: 1, .. }));
    }

    #[test]
    fn rejects_adjacent_node_declarations() {
        let err = parse_flowchart("graph TD\nStart[A] Validate[B]").unwrap_err();
        assert_eq!(
            err,
            MermaidFlowchartParseError::UnexpectedToken {
                line_no: 2,
                token: "Validate[B]".to_owned()
            }
        );

        let err = parse_flowchart("graph TD\nConfirmPayPal ReviewOrder;").unwrap_err();
        assert!(matches!(err, MermaidFlowchartParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn rejects_doubled_label_delimiters() {
        let err = parse_flowchart("graph TD\nA -->||Yes|| B").unwrap_err();
        assert!(matches!(err, MermaidFlowchartParseError::EmptyEdgeLabel { line_no: 2, .. }));
    }

    #[test]
    fn rejects_dangling_edges_and_truncated_labels() {
        let err = parse_flowchart("graph TD\nA -->").unwrap_err();
        assert!(matches!(err, MermaidFlowchartParseError::DanglingEdge { .. }));

        let err = parse_flowchart("graph TD\nA[Start --> B").unwrap_err();
        assert!(matches!(err, MermaidFlowchartParseError::UnterminatedNodeLabel { .. }));

        let err = parse_flowchart("graph TD\nA -->|yes B").unwrap_err();
        assert!(matches!(err, MermaidFlowchartParseError::UnterminatedEdgeLabel { .. }));
    }

    #[test]
    fn rejects_second_header() {
        let err = parse_flowchart("graph TD\nA --> B\ngraph LR").unwrap_err();
        assert_eq!(err, MermaidFlowchartParseError::DuplicateHeader { line_no: 3 });
    }

    #[test]
    fn semantic_roundtrip_parse_export_parse() {
        let input = r#"
            graph LR
            A{Decide} -->|maybe| B(Run)
            B -.-> C
        "#;

        let ast1 = parse_flowchart(input).expect("parse 1");
        let out = export_flowchart(&ast1).expect("export");
        let ast2 = parse_flowchart(&out).expect("parse 2");

        assert_eq!(semantic_view(&ast1), semantic_view(&ast2));
        assert_eq!(ast2.direction(), FlowDirection::LeftRight);
        assert!(out.starts_with("graph LR;\n"));
    }

    #[test]
    fn export_rejects_labels_that_cannot_be_quoted() {
        let mut ast = FlowchartAst::new(FlowDirection::TopDown);
        ast.nodes_mut().insert("A".to_owned(), FlowNode::new_with("say \"hi\"", NodeShape::Rect));
        ast.nodes_mut().insert("B".to_owned(), FlowNode::implicit("B"));
        ast.edges_mut().push(FlowEdge::new("A", "B"));
        assert!(export_flowchart(&ast).is_err());
    }
}
