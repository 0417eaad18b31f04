// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use crate::error::DiagramError;
use crate::generate::{GenerateError, OfflineGenerator, ReplayGenerator};
use crate::model::{DiagramCategory, DiagramSource, FlowchartAst, Orientation};
use crate::render::{MermaidRenderer, RenderArtifact};
use crate::templates::TemplateRegistry;

use super::{
    AvailableActions, Controller, ControllerError, ControllerEvent, ControllerState,
    DiagramSession, RenderOrigin, RenderRequest, RetryPolicy, SessionError, Transition,
};

const ADJACENT_DECLARATIONS: &str = "graph TD\nStart[A] Validate[B]";
const CHECKOUT_SOURCE: &str =
    "graph TD\nCart[Shopping Cart] --> Pay[Payment]\nConfirmPayPal ReviewOrder";
const CHECKOUT_REPLY: &str =
    "```mermaid\ngraph TD\nCart[Shopping Cart] --> Pay[Payment]\nConfirmPayPal ReviewOrder\n```";

fn artifact() -> RenderArtifact {
    RenderArtifact::new(FlowchartAst::default(), "")
}

fn succeeded(generation: u64) -> ControllerEvent {
    ControllerEvent::RendererSucceeded { generation, artifact: artifact() }
}

fn generate(source: &str) -> ControllerEvent {
    ControllerEvent::Generate {
        source: DiagramSource::new(source),
        orientation: Orientation::TopDown,
    }
}

fn expect_render(transition: Transition) -> RenderRequest {
    match transition {
        Transition::Render(request) => request,
        other => panic!("expected render request, got {other:?}"),
    }
}

fn failed(controller: &mut Controller, source: &str) -> RenderRequest {
    let request = expect_render(controller.handle(generate(source)).expect("generate"));
    let transition = controller
        .handle(ControllerEvent::RendererFailed {
            generation: request.generation,
            message: "parse error".to_owned(),
        })
        .expect("failure");
    assert_eq!(transition, Transition::Settled);
    request
}

#[fixture]
fn controller() -> Controller {
    Controller::default()
}

#[fixture]
fn session() -> DiagramSession<ReplayGenerator, MermaidRenderer> {
    DiagramSession::new(
        ReplayGenerator::default(),
        MermaidRenderer::default(),
        Controller::default(),
    )
}

// ===================
// Controller
// ===================

#[rstest]
fn generate_requests_first_generation(mut controller: Controller) {
    let request = expect_render(controller.handle(generate("graph TD;")).expect("generate"));
    assert_eq!(request.generation, 1);
    assert_eq!(request.origin, RenderOrigin::Generated);
    assert_eq!(controller.state().name(), "rendering");
}

#[rstest]
fn success_settles_with_artifact(mut controller: Controller) {
    let request = expect_render(controller.handle(generate("graph TD;")).expect("generate"));
    let transition = controller.handle(succeeded(request.generation)).expect("success");

    assert_eq!(transition, Transition::Settled);
    let ControllerState::Succeeded(success) = controller.state() else {
        panic!("expected success state");
    };
    assert_eq!(success.source.as_str(), "graph TD;");
    assert_eq!(controller.available_actions(), AvailableActions::default());
}

#[rstest]
fn generated_failure_is_recoverable(mut controller: Controller) {
    failed(&mut controller, ADJACENT_DECLARATIONS);
    let ControllerState::Failed(failure) = controller.state() else {
        panic!("expected failed state");
    };
    assert_eq!(failure.error, DiagramError::Grammar { message: "parse error".to_owned() });
}

#[rstest]
fn newer_generate_supersedes_pending_render(mut controller: Controller) {
    let first = expect_render(controller.handle(generate("graph TD;\nA --> B;")).expect("first"));
    let second = expect_render(controller.handle(generate("graph TD;\nC --> D;")).expect("second"));
    assert!(second.generation > first.generation);

    let stale = controller
        .handle(ControllerEvent::RendererFailed {
            generation: first.generation,
            message: "late failure".to_owned(),
        })
        .expect("stale completion");
    assert_eq!(stale, Transition::Stale);
    let ControllerState::Rendering(pending) = controller.state() else {
        panic!("stale completion must not settle the state");
    };
    assert_eq!(pending.generation, second.generation);

    let settled = controller.handle(succeeded(second.generation)).expect("current completion");
    assert_eq!(settled, Transition::Settled);
    assert_eq!(
        controller.state().source().map(DiagramSource::as_str),
        Some("graph TD;\nC --> D;")
    );
}

#[rstest]
fn duplicate_completion_after_settling_is_stale(mut controller: Controller) {
    let request = failed(&mut controller, "graph TD;");
    let transition = controller.handle(succeeded(request.generation)).expect("duplicate");
    assert_eq!(transition, Transition::Stale);
    assert_eq!(controller.state().name(), "failed");
}

#[rstest]
#[case(ControllerEvent::Retry, "retry")]
#[case(ControllerEvent::UseTemplate(DiagramCategory::Checkout), "use-template")]
fn fallback_events_require_failed_state(
    mut controller: Controller,
    #[case] event: ControllerEvent,
    #[case] event_name: &'static str,
) {
    let err = controller.handle(event).unwrap_err();
    assert_eq!(err, ControllerError::InvalidEvent { state: "idle", event: event_name });
    assert_eq!(controller.state(), &ControllerState::Idle);
}

#[rstest]
fn retry_repairs_unclassified_source(mut controller: Controller) {
    failed(&mut controller, ADJACENT_DECLARATIONS);
    let request = expect_render(controller.handle(ControllerEvent::Retry).expect("retry"));
    assert_eq!(request.origin, RenderOrigin::Repaired);
    assert_eq!(request.source.as_str(), "graph TD\nStart[A] --> Validate[B];");
}

#[rstest]
fn retry_prefers_template_for_checkout(mut controller: Controller) {
    failed(&mut controller, CHECKOUT_SOURCE);
    assert_eq!(
        controller.available_actions(),
        AvailableActions { retry: true, suggested_template: Some(DiagramCategory::Checkout) }
    );

    let request = expect_render(controller.handle(ControllerEvent::Retry).expect("retry"));
    assert_eq!(request.origin, RenderOrigin::Template(DiagramCategory::Checkout));
    assert!(request.source.as_str().starts_with("graph TD;\n"));
}

#[rstest]
fn retry_policy_is_configurable() {
    let mut controller = Controller::new(TemplateRegistry::builtin(), RetryPolicy::new([]));
    failed(&mut controller, CHECKOUT_SOURCE);
    let request = expect_render(controller.handle(ControllerEvent::Retry).expect("retry"));
    assert_eq!(request.origin, RenderOrigin::Repaired);
}

#[rstest]
fn failed_template_falls_back_to_repair() {
    fn broken(_: Orientation) -> DiagramSource {
        DiagramSource::new("graph TD\nCheckout Payment")
    }
    let mut templates = TemplateRegistry::empty();
    templates.register(DiagramCategory::Checkout, broken);
    let mut controller = Controller::new(templates, RetryPolicy::default());

    failed(&mut controller, "graph TD\ncheckout payment");
    let event = ControllerEvent::UseTemplate(DiagramCategory::Checkout);
    let request = expect_render(controller.handle(event).expect("template"));
    controller
        .handle(ControllerEvent::RendererFailed {
            generation: request.generation,
            message: "bad".to_owned(),
        })
        .expect("template failure");

    let ControllerState::Failed(failure) = controller.state() else {
        panic!("expected failed state");
    };
    assert!(!failure.error.is_recoverable());

    let retry = expect_render(controller.handle(ControllerEvent::Retry).expect("retry"));
    assert_eq!(retry.origin, RenderOrigin::Repaired);
    assert_eq!(retry.source.as_str(), "graph TD\nCheckout --> Payment;");
}

#[rstest]
fn use_template_without_template_keeps_failure(mut controller: Controller) {
    failed(&mut controller, "asdf qwer zxcv");
    let before = controller.state().clone();

    let event = ControllerEvent::UseTemplate(DiagramCategory::Unclassified);
    let err = controller.handle(event).unwrap_err();
    assert_eq!(
        err,
        ControllerError::TemplateUnavailable { category: DiagramCategory::Unclassified }
    );
    assert_eq!(controller.state(), &before);
    assert_eq!(
        controller.available_actions(),
        AvailableActions { retry: true, suggested_template: None }
    );
}

// ===================
// Session
// ===================

#[rstest]
#[tokio::test]
async fn repair_recovers_adjacent_declarations(
    mut session: DiagramSession<ReplayGenerator, MermaidRenderer>,
) {
    let view =
        session.accept_reply(ADJACENT_DECLARATIONS, Orientation::TopDown).await.expect("reply");
    assert_eq!(view.state, "failed");
    assert_eq!(view.actions, AvailableActions { retry: true, suggested_template: None });

    let view = session.retry().await.expect("retry");
    assert_eq!(view.state, "succeeded");
    assert_eq!(view.origin, Some(RenderOrigin::Repaired));
    assert!(view.outline.is_some_and(|outline| outline.contains("Start [A]")));
}

#[rstest]
#[tokio::test]
async fn checkout_failure_retries_with_template(
    mut session: DiagramSession<ReplayGenerator, MermaidRenderer>,
) {
    session.generator().push(CHECKOUT_REPLY);
    let view = session
        .generate("shopping cart with paypal", Orientation::LeftRight)
        .await
        .expect("generate");
    assert_eq!(view.state, "failed");
    assert_eq!(view.actions.suggested_template, Some(DiagramCategory::Checkout));

    let view = session.retry().await.expect("retry");
    assert_eq!(view.state, "succeeded");
    assert_eq!(view.origin, Some(RenderOrigin::Template(DiagramCategory::Checkout)));
    assert!(view.source.is_some_and(|source| source.as_str().starts_with("graph LR;")));
}

#[rstest]
#[tokio::test]
async fn valid_left_right_reply_renders_first_time(
    mut session: DiagramSession<ReplayGenerator, MermaidRenderer>,
) {
    let view =
        session.accept_reply("graph LR;\n  A --> B;", Orientation::LeftRight).await.expect("reply");
    assert_eq!(view.state, "succeeded");
    assert_eq!(view.origin, Some(RenderOrigin::Generated));
}

#[rstest]
#[tokio::test]
async fn gibberish_offers_retry_only(
    mut session: DiagramSession<ReplayGenerator, MermaidRenderer>,
) {
    let view = session.accept_reply("asdf qwer zxcv", Orientation::TopDown).await.expect("reply");
    assert_eq!(view.state, "failed");
    assert!(view.error.is_some());

    let err = session.use_template(DiagramCategory::Unclassified).await.unwrap_err();
    assert_eq!(
        err,
        SessionError::Controller(ControllerError::TemplateUnavailable {
            category: DiagramCategory::Unclassified
        })
    );

    let view = session.view();
    assert_eq!(view.state, "failed");
    assert_eq!(view.actions, AvailableActions { retry: true, suggested_template: None });
}

#[rstest]
#[case("")]
#[case("```mermaid\n  \n```")]
#[tokio::test]
async fn blank_reply_fails_to_render(
    mut session: DiagramSession<ReplayGenerator, MermaidRenderer>,
    #[case] reply: &str,
) {
    let view = session.accept_reply(reply, Orientation::TopDown).await.expect("reply");
    assert_eq!(view.state, "failed");
    assert_eq!(view.source.map(|source| source.as_str()), Some(""));
    assert_eq!(view.actions, AvailableActions { retry: true, suggested_template: None });
}

#[rstest]
#[tokio::test]
async fn generator_failure_leaves_controller_idle(
    mut session: DiagramSession<ReplayGenerator, MermaidRenderer>,
) {
    let err = session.generate("anything", Orientation::TopDown).await.unwrap_err();
    assert!(matches!(err, SessionError::Generate(GenerateError::UpstreamUnavailable { .. })));
    assert_eq!(session.view().state, "idle");
}

#[rstest]
#[tokio::test]
async fn raw_view_toggle_is_independent_of_state(
    mut session: DiagramSession<ReplayGenerator, MermaidRenderer>,
) {
    session.accept_reply("graph TD;\nA --> B;", Orientation::TopDown).await.expect("reply");
    let rev = session.view().rev;

    let view = session.toggle_raw_view();
    assert!(view.show_raw);
    assert_eq!(view.rev, rev + 1);
    assert_eq!(view.state, "succeeded");
    assert!(!session.toggle_raw_view().show_raw);
}

#[tokio::test]
async fn offline_generator_renders_on_first_attempt() {
    let mut session =
        DiagramSession::new(OfflineGenerator, MermaidRenderer::default(), Controller::default());
    for prompt in ["user login", "checkout", "REST API request", "brew tea"] {
        let view = session.generate(prompt, Orientation::TopDown).await.expect("generate");
        assert_eq!(view.state, "succeeded", "{prompt}");
    }
    assert_eq!(session.controller().generation(), 4);
}
