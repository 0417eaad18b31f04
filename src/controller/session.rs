// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use log::{info, warn};

use super::{
    AvailableActions, Controller, ControllerError, ControllerEvent, ControllerState, RenderOrigin,
    RenderRequest, Transition,
};
use crate::format::mermaid::extract_diagram_source;
use crate::generate::{GenerateError, Generator};
use crate::model::{DiagramCategory, DiagramSource, Orientation};
use crate::render::{RenderOutcome, Renderer};
use crate::ui::ViewState;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Controller(#[from] ControllerError),
}

/// Snapshot of what a front end should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView<'a> {
    pub state: &'static str,
    pub origin: Option<RenderOrigin>,
    pub source: Option<&'a DiagramSource>,
    /// Rendered outline, present after a successful render.
    pub outline: Option<&'a str>,
    pub error: Option<String>,
    pub show_raw: bool,
    pub actions: AvailableActions,
    pub rev: u64,
}

/// Drives one diagram through generation, rendering and the user-requested fallbacks.
#[derive(Debug)]
pub struct DiagramSession<G, R> {
    generator: G,
    renderer: R,
    controller: Controller,
    view: ViewState,
}

impl<G: Generator, R: Renderer> DiagramSession<G, R> {
    pub fn new(generator: G, renderer: R, controller: Controller) -> Self {
        Self { generator, renderer, controller, view: ViewState::default() }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Ask the generator for a diagram and render it.
    ///
    /// Generator failures are returned as-is and leave the controller untouched.
    pub async fn generate(
        &mut self,
        prompt: &str,
        orientation: Orientation,
    ) -> Result<SessionView<'_>, SessionError> {
        let reply = self.generator.generate(prompt, orientation).await.map_err(|err| {
            warn!("Generation failed: {err}");
            err
        })?;
        self.accept_reply(&reply, orientation).await
    }

    /// Render a reply obtained out of band (for example pasted by the user).
    pub async fn accept_reply(
        &mut self,
        reply: &str,
        orientation: Orientation,
    ) -> Result<SessionView<'_>, SessionError> {
        let source = extract_diagram_source(reply);
        if source.is_blank() {
            warn!("Reply contains no diagram text");
        }
        info!(orientation:% = orientation, bytes = source.as_str().len(); "Accepted diagram reply");
        self.dispatch(ControllerEvent::Generate { source, orientation }).await
    }

    pub async fn retry(&mut self) -> Result<SessionView<'_>, SessionError> {
        self.dispatch(ControllerEvent::Retry).await
    }

    pub async fn use_template(
        &mut self,
        category: DiagramCategory,
    ) -> Result<SessionView<'_>, SessionError> {
        self.dispatch(ControllerEvent::UseTemplate(category)).await
    }

    pub fn toggle_raw_view(&mut self) -> SessionView<'_> {
        self.view.toggle_raw();
        self.view()
    }

    pub fn view(&self) -> SessionView<'_> {
        let state = self.controller.state();
        let (origin, outline, error) = match state {
            ControllerState::Idle => (None, None, None),
            ControllerState::Rendering(pending) => (Some(pending.origin), None, None),
            ControllerState::Succeeded(success) => {
                (Some(success.origin), Some(success.artifact.outline()), None)
            }
            ControllerState::Failed(failure) => {
                (Some(failure.origin), None, Some(failure.error.to_string()))
            }
        };

        SessionView {
            state: state.name(),
            origin,
            source: state.source(),
            outline,
            error,
            show_raw: self.view.show_raw(),
            actions: self.controller.available_actions(),
            rev: self.view.rev(),
        }
    }

    async fn dispatch(&mut self, event: ControllerEvent) -> Result<SessionView<'_>, SessionError> {
        match self.controller.handle(event)? {
            Transition::Render(request) => {
                self.view.bump_source_rev();
                self.render(request).await;
            }
            Transition::Settled | Transition::Stale => {}
        }
        Ok(self.view())
    }

    async fn render(&mut self, request: RenderRequest) {
        let RenderRequest { generation, source, .. } = request;
        let completion = match self.renderer.render(&source).await {
            RenderOutcome::Rendered(artifact) => {
                ControllerEvent::RendererSucceeded { generation, artifact }
            }
            RenderOutcome::Failed(message) => {
                ControllerEvent::RendererFailed { generation, message }
            }
        };

        // Completions never fail: they either apply or are reported stale.
        if let Err(err) = self.controller.handle(completion) {
            warn!("Renderer completion rejected: {err}");
        }
    }
}
