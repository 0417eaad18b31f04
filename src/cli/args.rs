// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::model::{DiagramCategory, Orientation};

/// Classify, check and repair model-generated Mermaid flowcharts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Render a diagram and report whether the grammar accepts it
    Check {
        /// Input file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,
        /// Print a JSON report instead of the outline
        #[arg(long)]
        json: bool,
    },
    /// Run the repair pipeline and print the repaired source
    Repair {
        /// Input file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,
        /// Orientation the header is repaired to (TD or LR)
        #[arg(short, long)]
        orientation: Option<Orientation>,
    },
    /// Print the content category of a diagram
    Classify {
        /// Input file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the built-in template for a category
    Template {
        /// Category name, e.g. `checkout` or `order-processing`
        category: DiagramCategory,
        #[arg(short, long)]
        orientation: Option<Orientation>,
    },
    /// Interactive session: generate, retry, fall back to templates
    Session {
        #[arg(short, long)]
        orientation: Option<Orientation>,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Check { .. } => "check",
            Self::Repair { .. } => "repair",
            Self::Classify { .. } => "classify",
            Self::Template { .. } => "template",
            Self::Session { .. } => "session",
        }
    }
}
