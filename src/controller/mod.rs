// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Render attempt controller.
//!
//! The controller is a synchronous state machine. It never talks to the renderer itself: every
//! transition that needs a render returns a [`RenderRequest`], and the caller feeds the outcome
//! back tagged with the request's generation. Completions for any other generation are stale and
//! ignored, which is how a newer `Generate` supersedes an in-flight render.

use std::collections::BTreeSet;
use std::fmt;

use log::{debug, info, warn};

use crate::classify::classify;
use crate::error::DiagramError;
use crate::model::{DiagramCategory, DiagramSource, Orientation};
use crate::render::RenderArtifact;
use crate::repair::repair;
use crate::templates::TemplateRegistry;

mod session;

pub use session::{DiagramSession, SessionError, SessionView};

/// Where the source of a render attempt came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderOrigin {
    Generated,
    Repaired,
    Template(DiagramCategory),
}

impl RenderOrigin {
    pub fn is_template(self) -> bool {
        matches!(self, Self::Template(_))
    }
}

impl fmt::Display for RenderOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated => f.write_str("generated"),
            Self::Repaired => f.write_str("repaired"),
            Self::Template(category) => write!(f, "template:{category}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRender {
    pub generation: u64,
    pub source: DiagramSource,
    pub origin: RenderOrigin,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Success {
    pub generation: u64,
    pub source: DiagramSource,
    pub origin: RenderOrigin,
    pub orientation: Orientation,
    pub artifact: RenderArtifact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub generation: u64,
    pub source: DiagramSource,
    pub origin: RenderOrigin,
    pub orientation: Orientation,
    pub error: DiagramError,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    Rendering(PendingRender),
    Succeeded(Success),
    Failed(Failure),
}

impl ControllerState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Rendering(_) => "rendering",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }

    /// The source the state currently refers to, if any.
    pub fn source(&self) -> Option<&DiagramSource> {
        match self {
            Self::Idle => None,
            Self::Rendering(pending) => Some(&pending.source),
            Self::Succeeded(success) => Some(&success.source),
            Self::Failed(failure) => Some(&failure.source),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    Generate { source: DiagramSource, orientation: Orientation },
    RendererSucceeded { generation: u64, artifact: RenderArtifact },
    RendererFailed { generation: u64, message: String },
    Retry,
    UseTemplate(DiagramCategory),
}

impl ControllerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Generate { .. } => "generate",
            Self::RendererSucceeded { .. } => "renderer-succeeded",
            Self::RendererFailed { .. } => "renderer-failed",
            Self::Retry => "retry",
            Self::UseTemplate(_) => "use-template",
        }
    }
}

/// A render the caller must perform and report back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub generation: u64,
    pub source: DiagramSource,
    pub origin: RenderOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Render(RenderRequest),
    Settled,
    /// A renderer completion for a generation that is no longer pending.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error("event '{event}' is not valid in state '{state}'")]
    InvalidEvent { state: &'static str, event: &'static str },
    #[error("no template available for category '{category}'")]
    TemplateUnavailable { category: DiagramCategory },
}

/// What the user may do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AvailableActions {
    pub retry: bool,
    pub suggested_template: Option<DiagramCategory>,
}

/// Categories for which `Retry` goes straight to the template instead of repairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    template_categories: BTreeSet<DiagramCategory>,
}

impl RetryPolicy {
    pub fn new(template_categories: impl IntoIterator<Item = DiagramCategory>) -> Self {
        Self { template_categories: template_categories.into_iter().collect() }
    }

    pub fn prefers_template(&self, category: DiagramCategory) -> bool {
        self.template_categories.contains(&category)
    }

    pub fn template_categories(&self) -> impl Iterator<Item = DiagramCategory> + '_ {
        self.template_categories.iter().copied()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new([DiagramCategory::Checkout, DiagramCategory::OrderProcessing])
    }
}

#[derive(Debug, Clone)]
pub struct Controller {
    state: ControllerState,
    generation: u64,
    templates: TemplateRegistry,
    policy: RetryPolicy,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(TemplateRegistry::builtin(), RetryPolicy::default())
    }
}

impl Controller {
    pub fn new(templates: TemplateRegistry, policy: RetryPolicy) -> Self {
        Self { state: ControllerState::Idle, generation: 0, templates, policy }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Generation of the most recent render request (0 before the first).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn handle(&mut self, event: ControllerEvent) -> Result<Transition, ControllerError> {
        let event_name = event.name();
        match event {
            ControllerEvent::Generate { source, orientation } => {
                if let ControllerState::Rendering(pending) = &self.state {
                    debug!(superseded = pending.generation; "Generate supersedes pending render");
                }
                Ok(self.start_render(source, RenderOrigin::Generated, orientation))
            }
            ControllerEvent::RendererSucceeded { generation, artifact } => {
                let Some(pending) = self.take_pending(generation) else {
                    return Ok(self.stale(generation, event_name));
                };
                info!(generation, origin:% = pending.origin; "Render succeeded");
                self.state = ControllerState::Succeeded(Success {
                    generation,
                    source: pending.source,
                    origin: pending.origin,
                    orientation: pending.orientation,
                    artifact,
                });
                Ok(Transition::Settled)
            }
            ControllerEvent::RendererFailed { generation, message } => {
                let Some(pending) = self.take_pending(generation) else {
                    return Ok(self.stale(generation, event_name));
                };
                let error = match pending.origin {
                    RenderOrigin::Generated => DiagramError::Grammar { message },
                    RenderOrigin::Repaired | RenderOrigin::Template(_) => {
                        DiagramError::UnrecoverableGrammar {
                            message,
                            diagram: pending.source.clone(),
                        }
                    }
                };
                warn!(generation, origin:% = pending.origin; "Render failed: {error}");
                self.state = ControllerState::Failed(Failure {
                    generation,
                    source: pending.source,
                    origin: pending.origin,
                    orientation: pending.orientation,
                    error,
                });
                Ok(Transition::Settled)
            }
            ControllerEvent::Retry => {
                let ControllerState::Failed(failure) = &self.state else {
                    return Err(self.invalid(event_name));
                };
                let (source, origin) = self.retry_source(failure);
                let orientation = failure.orientation;
                Ok(self.start_render(source, origin, orientation))
            }
            ControllerEvent::UseTemplate(category) => {
                let ControllerState::Failed(failure) = &self.state else {
                    return Err(self.invalid(event_name));
                };
                let orientation = failure.orientation;
                let source = self
                    .templates
                    .template_for(category, orientation)
                    .ok_or(ControllerError::TemplateUnavailable { category })?;
                Ok(self.start_render(source, RenderOrigin::Template(category), orientation))
            }
        }
    }

    /// Retry and template options for the current state.
    pub fn available_actions(&self) -> AvailableActions {
        let ControllerState::Failed(failure) = &self.state else {
            return AvailableActions::default();
        };
        let category = classify(&failure.source);
        AvailableActions {
            retry: true,
            suggested_template: self.templates.contains(category).then_some(category),
        }
    }

    fn retry_source(&self, failure: &Failure) -> (DiagramSource, RenderOrigin) {
        let category = classify(&failure.source);
        if self.policy.prefers_template(category) && !failure.origin.is_template() {
            if let Some(source) = self.templates.template_for(category, failure.orientation) {
                info!(category:% = category; "Retry uses template");
                return (source, RenderOrigin::Template(category));
            }
        }

        info!(category:% = category, origin:% = failure.origin; "Retry repairs source");
        (repair(&failure.source, failure.orientation), RenderOrigin::Repaired)
    }

    fn start_render(
        &mut self,
        source: DiagramSource,
        origin: RenderOrigin,
        orientation: Orientation,
    ) -> Transition {
        self.generation += 1;
        let generation = self.generation;
        debug!(generation, origin:% = origin; "Render requested");

        self.state = ControllerState::Rendering(PendingRender {
            generation,
            source: source.clone(),
            origin,
            orientation,
        });
        Transition::Render(RenderRequest { generation, source, origin })
    }

    /// Takes the pending render if `generation` is the one in flight.
    fn take_pending(&mut self, generation: u64) -> Option<PendingRender> {
        match &self.state {
            ControllerState::Rendering(pending) if pending.generation == generation => {}
            _ => return None,
        }
        match std::mem::take(&mut self.state) {
            ControllerState::Rendering(pending) => Some(pending),
            _ => None,
        }
    }

    fn stale(&self, generation: u64, event: &'static str) -> Transition {
        debug!(generation, current = self.generation, event; "Ignoring stale renderer completion");
        Transition::Stale
    }

    fn invalid(&self, event: &'static str) -> ControllerError {
        ControllerError::InvalidEvent { state: self.state.name(), event }
    }
}

#[cfg(test)]
mod tests;
