// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{process, str::FromStr};

use clap::Parser;
use log::{debug, error, info, LevelFilter};

use archwize::cli::Args;

fn main() {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", args.log_level);
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default()).filter_level(log_level).init();

    info!(log_level:?; "Starting Archwize");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = archwize::cli::run(&args) {
        error!(command = args.command.name(); "Command failed");
        eprintln!("error: {err}");
        process::exit(1);
    }

    info!("Completed successfully");
}
