// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use log::{debug, warn};

use super::{GenerateError, Generator};
use crate::classify::classify_text;
use crate::format::mermaid::export_flowchart;
use crate::model::{
    DiagramCategory, FlowDirection, FlowEdge, FlowNode, FlowchartAst, NodeShape, Orientation,
};

type NodeSpec = (&'static str, &'static str, NodeShape);
type EdgeSpec = (&'static str, &'static str, Option<&'static str>);

struct FlowSpec {
    nodes: &'static [NodeSpec],
    edges: &'static [EdgeSpec],
}

const LOGIN_FLOW: FlowSpec = FlowSpec {
    nodes: &[
        ("Start", "User Begins Login", NodeShape::Round),
        ("EnterCredentials", "Enter Credentials", NodeShape::Rect),
        ("ValidateCredentials", "Validate Credentials", NodeShape::Diamond),
        ("Success", "Login Successful", NodeShape::Rect),
        ("Retry", "Retry Login", NodeShape::Rect),
        ("End", "User Authenticated", NodeShape::Round),
    ],
    edges: &[
        ("Start", "EnterCredentials", None),
        ("EnterCredentials", "ValidateCredentials", None),
        ("ValidateCredentials", "Success", Some("Valid")),
        ("ValidateCredentials", "Retry", Some("Invalid")),
        ("Retry", "EnterCredentials", None),
        ("Success", "End", None),
    ],
};

const REGISTRATION_FLOW: FlowSpec = FlowSpec {
    nodes: &[
        ("Start", "User Begins Registration", NodeShape::Round),
        ("EnterDetails", "Enter User Details", NodeShape::Rect),
        ("ValidateDetails", "Validate Details", NodeShape::Diamond),
        ("CreateAccount", "Create Account", NodeShape::Rect),
        ("FixDetails", "Correct Details", NodeShape::Rect),
        ("End", "Registration Complete", NodeShape::Round),
    ],
    edges: &[
        ("Start", "EnterDetails", None),
        ("EnterDetails", "ValidateDetails", None),
        ("ValidateDetails", "CreateAccount", Some("Valid")),
        ("ValidateDetails", "FixDetails", Some("Invalid")),
        ("FixDetails", "EnterDetails", None),
        ("CreateAccount", "End", None),
    ],
};

const CHECKOUT_FLOW: FlowSpec = FlowSpec {
    nodes: &[
        ("Start", "User Begins Checkout", NodeShape::Round),
        ("ReviewCart", "Review Cart Items", NodeShape::Rect),
        ("EnterPayment", "Enter Payment Details", NodeShape::Rect),
        ("ValidatePayment", "Validate Payment", NodeShape::Diamond),
        ("PlaceOrder", "Place Order", NodeShape::Rect),
        ("RetryPayment", "Update Payment", NodeShape::Rect),
        ("End", "Order Complete", NodeShape::Round),
    ],
    edges: &[
        ("Start", "ReviewCart", None),
        ("ReviewCart", "EnterPayment", None),
        ("EnterPayment", "ValidatePayment", None),
        ("ValidatePayment", "PlaceOrder", Some("Valid")),
        ("ValidatePayment", "RetryPayment", Some("Invalid")),
        ("RetryPayment", "EnterPayment", None),
        ("PlaceOrder", "End", None),
    ],
};

const ORDER_PROCESSING_FLOW: FlowSpec = FlowSpec {
    nodes: &[
        ("Start", "User Submits Order", NodeShape::Round),
        ("Validate", "Validate Order", NodeShape::Diamond),
        ("Publish", "Publish Order Event", NodeShape::Rect),
        ("Bus", "Event Bus", NodeShape::Rect),
        ("Execute", "Execute Trade", NodeShape::Rect),
        ("Reject", "Reject Order", NodeShape::Rect),
        ("End", "Order Settled", NodeShape::Round),
    ],
    edges: &[
        ("Start", "Validate", None),
        ("Validate", "Publish", Some("Valid")),
        ("Validate", "Reject", Some("Invalid")),
        ("Publish", "Bus", None),
        ("Bus", "Execute", None),
        ("Execute", "End", None),
        ("Reject", "End", None),
    ],
};

const API_REQUEST_FLOW: FlowSpec = FlowSpec {
    nodes: &[
        ("Start", "Client Sends Request", NodeShape::Round),
        ("ValidateRequest", "Validate Request", NodeShape::Diamond),
        ("ProcessRequest", "Process Request", NodeShape::Rect),
        ("RejectRequest", "Reject Request", NodeShape::Rect),
        ("GenerateResponse", "Generate Response", NodeShape::Rect),
        ("End", "Send Response to Client", NodeShape::Round),
        ("EndError", "Return Error Response", NodeShape::Round),
    ],
    edges: &[
        ("Start", "ValidateRequest", None),
        ("ValidateRequest", "ProcessRequest", Some("Valid")),
        ("ValidateRequest", "RejectRequest", Some("Invalid")),
        ("ProcessRequest", "GenerateResponse", None),
        ("GenerateResponse", "End", None),
        ("RejectRequest", "EndError", None),
    ],
};

const DECISION_WORDS: &[&str] =
    &["if", "validate", "check", "verify", "decide", "determine", "assess", "evaluate"];

const GENERIC_FLOW: FlowSpec = FlowSpec {
    nodes: &[
        ("Start", "Begin Process", NodeShape::Round),
        ("Input", "Process Input", NodeShape::Rect),
        ("Process", "Process Data", NodeShape::Rect),
        ("Output", "Generate Output", NodeShape::Rect),
        ("End", "Process Complete", NodeShape::Round),
    ],
    edges: &[
        ("Start", "Input", None),
        ("Input", "Process", None),
        ("Process", "Output", None),
        ("Output", "End", None),
    ],
};

const GENERIC_DECISION_FLOW: FlowSpec = FlowSpec {
    nodes: &[
        ("Start", "Begin Process", NodeShape::Round),
        ("Input", "Process Input", NodeShape::Rect),
        ("Validate", "Validate Input", NodeShape::Diamond),
        ("Process", "Process Data", NodeShape::Rect),
        ("Retry", "Retry Input", NodeShape::Rect),
        ("Output", "Generate Output", NodeShape::Rect),
        ("End", "Process Complete", NodeShape::Round),
    ],
    edges: &[
        ("Start", "Input", None),
        ("Input", "Validate", None),
        ("Validate", "Process", Some("Valid")),
        ("Validate", "Retry", Some("Invalid")),
        ("Retry", "Input", None),
        ("Process", "Output", None),
        ("Output", "End", None),
    ],
};

fn prompt_words(prompt: &str) -> impl Iterator<Item = String> + '_ {
    prompt
        .split(|c: char| c.is_whitespace() || c == ',' || c == '.')
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}

fn flow_for(prompt: &str) -> (DiagramCategory, &'static FlowSpec) {
    let category = classify_text(prompt);
    let flow = match category {
        DiagramCategory::Login => &LOGIN_FLOW,
        DiagramCategory::Registration => &REGISTRATION_FLOW,
        DiagramCategory::Checkout => &CHECKOUT_FLOW,
        DiagramCategory::OrderProcessing => &ORDER_PROCESSING_FLOW,
        DiagramCategory::ApiRequest => &API_REQUEST_FLOW,
        DiagramCategory::Unclassified => {
            if prompt_words(prompt).any(|word| DECISION_WORDS.contains(&word.as_str())) {
                &GENERIC_DECISION_FLOW
            } else {
                &GENERIC_FLOW
            }
        }
    };
    (category, flow)
}

fn build_flowchart(flow: &FlowSpec, orientation: Orientation) -> FlowchartAst {
    let mut ast = FlowchartAst::new(FlowDirection::from(orientation));
    for (node_id, label, shape) in flow.nodes {
        ast.nodes_mut().insert((*node_id).to_owned(), FlowNode::new_with(*label, *shape));
    }
    for (from, to, label) in flow.edges {
        ast.edges_mut().push(FlowEdge::new(*from, *to).with_label(*label));
    }
    ast
}

/// Keyword-driven generator used when no model is reachable.
///
/// Picks a flow by classifying the prompt and emits it as canonical Mermaid text.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

impl OfflineGenerator {
    pub fn generate_now(
        &self,
        prompt: &str,
        orientation: Orientation,
    ) -> Result<String, GenerateError> {
        let (category, flow) = flow_for(prompt);
        debug!(category:% = category, orientation:% = orientation; "Generating offline flowchart");

        export_flowchart(&build_flowchart(flow, orientation)).map_err(|err| {
            warn!("Offline flowchart could not be exported: {err}");
            GenerateError::UpstreamUnavailable { reason: err.to_string() }
        })
    }
}

impl Generator for OfflineGenerator {
    async fn generate(
        &self,
        prompt: &str,
        orientation: Orientation,
    ) -> Result<String, GenerateError> {
        self.generate_now(prompt, orientation)
    }
}
