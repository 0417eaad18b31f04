// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command-line front end.

mod args;
mod repl;

pub use args::{Args, Command};

use std::fs;
use std::io::{self, Read, Write};

use log::{debug, info};
use serde::Serialize;
use tokio::io::BufReader;

use crate::classify::classify;
use crate::config::{load_config, AppConfig, ConfigError};
use crate::controller::{Controller, DiagramSession};
use crate::format::mermaid::extract_diagram_source;
use crate::generate::OfflineGenerator;
use crate::model::{DiagramCategory, Orientation};
use crate::render::{MermaidRenderer, RenderOutcome};
use crate::repair::RepairPipeline;
use crate::templates::TemplateRegistry;

const STDIN: &str = "-";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    ReadInput { path: String, source: io::Error },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("diagram rejected: {message}")]
    Rejected { message: String },
    #[error("no template available for category '{category}'")]
    NoTemplate { category: DiagramCategory },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct CheckReport {
    rendered: bool,
    category: DiagramCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    edges: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ClassifyReport {
    category: DiagramCategory,
    has_template: bool,
}

/// Run the command selected by `args`.
///
/// # Errors
///
/// Returns `CliError` for input and output failures, configuration errors, a diagram rejected by
/// `check`, and a category without template in `template`.
pub fn run(args: &Args) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    debug!(command = args.command.name(); "Dispatching command");

    match &args.command {
        Command::Check { input, json } => {
            let text = read_input(input)?;
            check(&text, &config, *json, &mut io::stdout().lock())
        }
        Command::Repair { input, orientation } => {
            let text = read_input(input)?;
            let orientation = orientation.unwrap_or(config.diagram.orientation);
            repair_source(&text, orientation, &mut io::stdout().lock())
        }
        Command::Classify { input, json } => {
            let text = read_input(input)?;
            classify_source(&text, *json, &mut io::stdout().lock())
        }
        Command::Template { category, orientation } => {
            let orientation = orientation.unwrap_or(config.diagram.orientation);
            write_template(*category, orientation, &mut io::stdout().lock())
        }
        Command::Session { orientation } => {
            let orientation = orientation.unwrap_or(config.diagram.orientation);
            run_session(&config, orientation)
        }
    }
}

fn read_input(input: &str) -> Result<String, CliError> {
    let read = if input == STDIN {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        fs::read_to_string(input)
    };
    let text = read.map_err(|source| CliError::ReadInput { path: input.to_owned(), source })?;
    debug!(input, bytes = text.len(); "Read diagram input");
    Ok(text)
}

fn write_source(out: &mut impl Write, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    Ok(())
}

fn check(
    text: &str,
    config: &AppConfig,
    json: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let source = extract_diagram_source(text);
    let category = classify(&source);
    let outcome = MermaidRenderer::new(config.outline_options()).render_now(&source);

    let report = match &outcome {
        RenderOutcome::Rendered(artifact) => CheckReport {
            rendered: true,
            category,
            nodes: Some(artifact.ast().nodes().len()),
            edges: Some(artifact.ast().edges().len()),
            error: None,
        },
        RenderOutcome::Failed(message) => CheckReport {
            rendered: false,
            category,
            nodes: None,
            edges: None,
            error: Some(message.clone()),
        },
    };

    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        match &outcome {
            RenderOutcome::Rendered(artifact) => write_source(out, artifact.outline())?,
            RenderOutcome::Failed(message) => writeln!(out, "rejected: {message}")?,
        }
    }

    match outcome {
        RenderOutcome::Rendered(_) => Ok(()),
        RenderOutcome::Failed(message) => Err(CliError::Rejected { message }),
    }
}

fn repair_source(
    text: &str,
    orientation: Orientation,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let source = extract_diagram_source(text);
    let (repaired, applied) = RepairPipeline::standard().run_with_report(&source, orientation);
    info!(orientation:% = orientation, rules:? = applied; "Repaired diagram");
    write_source(out, repaired.as_str())?;
    Ok(())
}

fn classify_source(text: &str, json: bool, out: &mut impl Write) -> Result<(), CliError> {
    let category = classify(&extract_diagram_source(text));
    if json {
        let report = ClassifyReport {
            category,
            has_template: TemplateRegistry::builtin().contains(category),
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{category}")?;
    }
    Ok(())
}

fn write_template(
    category: DiagramCategory,
    orientation: Orientation,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let source = TemplateRegistry::builtin()
        .template_for(category, orientation)
        .ok_or(CliError::NoTemplate { category })?;
    write_source(out, source.as_str())?;
    Ok(())
}

fn run_session(config: &AppConfig, orientation: Orientation) -> Result<(), CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let controller = Controller::new(TemplateRegistry::builtin(), config.retry_policy());
    let renderer = MermaidRenderer::new(config.outline_options());
    let mut session = DiagramSession::new(OfflineGenerator, renderer, controller);
    info!(orientation:% = orientation; "Starting interactive session");

    runtime.block_on(async {
        let input = BufReader::new(tokio::io::stdin());
        let mut output = tokio::io::stdout();
        repl::run_repl(&mut session, orientation, input, &mut output).await
    })
}
