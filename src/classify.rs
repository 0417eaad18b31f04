// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Keyword classification of diagram sources and prompts.
//!
//! One rule table serves every caller: the retry path, template suggestions and the offline
//! generator all see the same categories for the same text.

use crate::model::{DiagramCategory, DiagramSource};

const TRADE_TERMS: &[&str] =
    &["buy order", "sell order", "brokerage", "broker", "trade", "trading", "stock", "portfolio"];
const EVENT_BUS_TERMS: &[&str] = &[
    "event bus",
    "eventbus",
    "message bus",
    "message queue",
    "kafka",
    "pub/sub",
    "publish",
    "subscribe",
    "topic",
];
const CHECKOUT_TERMS: &[&str] = &["shopping cart", "checkout", "payment", "paypal", "order"];
const REGISTRATION_TERMS: &[&str] = &["registration", "register", "sign up", "signup"];
const LOGIN_TERMS: &[&str] = &["login", "log in", "sign in", "signin", "credentials"];
const API_REQUEST_TERMS: &[&str] =
    &["api request", "api call", "rest api", "endpoint", "http request"];

/// A row of the rule table: every term group must have at least one hit.
struct CategoryRule {
    category: DiagramCategory,
    required: &'static [&'static [&'static str]],
}

impl CategoryRule {
    fn matches(&self, haystack: &str) -> bool {
        self.required.iter().all(|terms| terms.iter().any(|term| haystack.contains(term)))
    }
}

/// Priority order; the first matching row wins.
const RULES: &[CategoryRule] = &[
    CategoryRule {
        category: DiagramCategory::OrderProcessing,
        required: &[TRADE_TERMS, EVENT_BUS_TERMS],
    },
    CategoryRule { category: DiagramCategory::Checkout, required: &[CHECKOUT_TERMS] },
    CategoryRule { category: DiagramCategory::Registration, required: &[REGISTRATION_TERMS] },
    CategoryRule { category: DiagramCategory::Login, required: &[LOGIN_TERMS] },
    CategoryRule { category: DiagramCategory::ApiRequest, required: &[API_REQUEST_TERMS] },
];

/// Classify free text (a prompt or a diagram body).
pub fn classify_text(text: &str) -> DiagramCategory {
    let haystack = text.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&haystack))
        .map(|rule| rule.category)
        .unwrap_or(DiagramCategory::Unclassified)
}

pub fn classify(source: &DiagramSource) -> DiagramCategory {
    classify_text(source.as_str())
}
