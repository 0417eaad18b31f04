// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Archwize: classification and repair of model-generated Mermaid flowcharts.
//!
//! A generated [`model::DiagramSource`] goes to a [`render::Renderer`]. When the renderer
//! rejects it, the [`controller::Controller`] offers a retry, which either runs the
//! [`repair`] pipeline or swaps in a built-in [`templates`] diagram chosen by [`classify`].

pub mod classify;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod generate;
pub mod model;
pub mod render;
pub mod repair;
pub mod templates;
pub mod ui;
