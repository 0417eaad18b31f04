// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Curated, known-good flowcharts keyed by category.
//!
//! Templates ignore the user's content entirely; they only honor the requested orientation.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::model::{DiagramCategory, DiagramSource, Orientation};

pub type TemplateFn = fn(Orientation) -> DiagramSource;

const CHECKOUT_BODY: &str = r#"  Start["User Begins Checkout"] --> ReviewCart["Review Cart Items"];
  ReviewCart --> EnterPayment["Enter Payment Details"];
  EnterPayment --> ChooseMethod{"Payment Method"};
  ChooseMethod -->|Card| ValidatePayment["Validate Payment"];
  ChooseMethod -->|PayPal| ConfirmPayPal["Confirm with PayPal"];
  ConfirmPayPal --> ValidatePayment;
  ValidatePayment -->|Valid| PlaceOrder["Place Order"];
  ValidatePayment -->|Invalid| RetryPayment["Update Payment"];
  RetryPayment --> EnterPayment;
  PlaceOrder --> End["Order Complete"];
"#;

const ORDER_PROCESSING_BODY: &str = r#"  Start["User Submits Buy Order"] --> Validate{"Validate Order"};
  Validate -->|Invalid| Reject["Reject Order"];
  Validate -->|Valid| Publish["Publish OrderPlaced Event"];
  Publish --> Bus["Event Bus"];
  Bus --> Broker["Brokerage Service"];
  Broker --> Execute["Execute Trade"];
  Execute --> Confirm["Publish TradeExecuted Event"];
  Confirm --> Bus;
  Bus --> Portfolio["Update Portfolio"];
  Bus --> Notify["Notify User"];
  Reject --> End["Order Closed"];
  Notify --> End;
"#;

const REGISTRATION_BODY: &str = r#"  Start["User Begins Registration"] --> EnterDetails["Enter User Details"];
  EnterDetails --> ValidateDetails{"Validate Details"};
  ValidateDetails -->|Valid| CreateAccount["Create Account"];
  ValidateDetails -->|Invalid| FixDetails["Correct Details"];
  FixDetails --> EnterDetails;
  CreateAccount --> End["Registration Complete"];
"#;

const LOGIN_BODY: &str = r#"  Start["User Begins Login"] --> EnterCredentials["Enter Credentials"];
  EnterCredentials --> ValidateCredentials{"Validate Credentials"};
  ValidateCredentials -->|Valid| Success["Login Successful"];
  ValidateCredentials -->|Invalid| Retry["Retry Login"];
  Retry --> EnterCredentials;
  Success --> End["User Authenticated"];
"#;

const API_REQUEST_BODY: &str = r#"  Start["Client Sends Request"] --> ValidateRequest{"Validate Request"};
  ValidateRequest -->|Valid| ProcessRequest["Process Request"];
  ValidateRequest -->|Invalid| RejectRequest["Reject Request"];
  ProcessRequest --> GenerateResponse["Generate Response"];
  GenerateResponse --> End["Send Response to Client"];
  RejectRequest --> EndError["Return Error Response"];
"#;

fn with_header(orientation: Orientation, body: &str) -> DiagramSource {
    DiagramSource::new(format!("graph {};\n{body}", orientation.token()))
}

pub fn checkout_template(orientation: Orientation) -> DiagramSource {
    with_header(orientation, CHECKOUT_BODY)
}

pub fn order_processing_template(orientation: Orientation) -> DiagramSource {
    with_header(orientation, ORDER_PROCESSING_BODY)
}

pub fn registration_template(orientation: Orientation) -> DiagramSource {
    with_header(orientation, REGISTRATION_BODY)
}

pub fn login_template(orientation: Orientation) -> DiagramSource {
    with_header(orientation, LOGIN_BODY)
}

pub fn api_request_template(orientation: Orientation) -> DiagramSource {
    with_header(orientation, API_REQUEST_BODY)
}

/// Category → template factory.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<DiagramCategory, TemplateFn>,
}

impl TemplateRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(DiagramCategory::Checkout, checkout_template);
        registry.register(DiagramCategory::OrderProcessing, order_processing_template);
        registry.register(DiagramCategory::Registration, registration_template);
        registry.register(DiagramCategory::Login, login_template);
        registry.register(DiagramCategory::ApiRequest, api_request_template);
        registry
    }

    /// Registers (or replaces) the template for `category`. `Unclassified` is never registered.
    pub fn register(&mut self, category: DiagramCategory, template: TemplateFn) -> bool {
        if !category.is_classified() {
            return false;
        }
        self.templates.insert(category, template);
        true
    }

    pub fn template_for(
        &self,
        category: DiagramCategory,
        orientation: Orientation,
    ) -> Option<DiagramSource> {
        self.templates.get(&category).map(|template| template(orientation))
    }

    pub fn contains(&self, category: DiagramCategory) -> bool {
        self.templates.contains_key(&category)
    }

    pub fn categories(&self) -> impl Iterator<Item = DiagramCategory> + '_ {
        self.templates.keys().copied()
    }
}

fn builtin_registry() -> &'static TemplateRegistry {
    static REGISTRY: OnceLock<TemplateRegistry> = OnceLock::new();
    REGISTRY.get_or_init(TemplateRegistry::builtin)
}

/// Built-in template for `category`, if one exists.
pub fn template_for(category: DiagramCategory, orientation: Orientation) -> Option<DiagramSource> {
    builtin_registry().template_for(category, orientation)
}

#[cfg(test)]
mod tests {
    use super::{template_for, TemplateRegistry};
    use crate::model::{DiagramCategory, Orientation};

    #[test]
    fn unclassified_has_no_template() {
        for orientation in Orientation::ALL {
            assert_eq!(template_for(DiagramCategory::Unclassified, orientation), None);
        }
    }

    #[test]
    fn templates_start_with_requested_header() {
        let source =
            template_for(DiagramCategory::Checkout, Orientation::LeftRight).expect("template");
        assert!(source.as_str().starts_with("graph LR;\n"));
        assert!(source.as_str().contains("ConfirmPayPal"));
    }

    #[test]
    fn registry_lists_every_classified_category() {
        let registry = TemplateRegistry::builtin();
        let categories = registry.categories().collect::<Vec<_>>();
        let expected = DiagramCategory::ALL
            .into_iter()
            .filter(|category| category.is_classified())
            .collect::<Vec<_>>();
        assert_eq!(categories, expected);
    }

    #[test]
    fn unclassified_cannot_be_registered() {
        let mut registry = TemplateRegistry::empty();
        assert!(!registry.register(DiagramCategory::Unclassified, super::login_template));
        assert!(!registry.contains(DiagramCategory::Unclassified));
        assert!(registry.register(DiagramCategory::Login, super::login_template));
        assert!(registry.template_for(DiagramCategory::Login, Orientation::TopDown).is_some());
    }
}
