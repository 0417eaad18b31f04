// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Configuration file loading.
//!
//! Search order:
//! 1. Explicit path (`--config`)
//! 2. Local project directory (`archwize/config.toml`)
//! 3. Platform-specific config directory
//! 4. Built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;

use crate::controller::RetryPolicy;
use crate::model::{DiagramCategory, Orientation};
use crate::render::OutlineOptions;

const LOCAL_CONFIG: &str = "archwize/config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("failed to read configuration file {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to parse TOML configuration {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub diagram: DiagramConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagramConfig {
    /// Orientation used when a command does not pass one.
    #[serde(default)]
    pub orientation: Orientation,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    /// Categories whose failures are retried with the template instead of a repair pass.
    #[serde(default = "default_template_categories")]
    pub template_categories: Vec<DiagramCategory>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { template_categories: default_template_categories() }
    }
}

fn default_template_categories() -> Vec<DiagramCategory> {
    RetryPolicy::default().template_categories().collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    #[serde(default = "default_max_label_len")]
    pub max_label_len: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { max_label_len: default_max_label_len() }
    }
}

fn default_max_label_len() -> usize {
    OutlineOptions::default().max_label_len
}

impl AppConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry.template_categories.iter().copied())
    }

    pub fn outline_options(&self) -> OutlineOptions {
        OutlineOptions { max_label_len: self.render.max_label_len }
    }
}

/// Find and load the configuration.
///
/// # Errors
///
/// Fails if an explicit path does not exist, or if a found file cannot be read or parsed.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let system_config = ProjectDirs::from("com", "archwize", "archwize")
        .map(|dirs| dirs.config_dir().join("config.toml"));
    if system_config.is_none() {
        debug!("Could not determine platform-specific config directory");
    }
    load_config_from(explicit_path, Path::new(LOCAL_CONFIG), system_config.as_deref())
}

fn load_config_from(
    explicit_path: Option<&Path>,
    local_config: &Path,
    system_config: Option<&Path>,
) -> Result<AppConfig, ConfigError> {
    if let Some(path) = explicit_path {
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(path) = system_config {
        if path.exists() {
            info!(path = path.display().to_string(); "Loading configuration from system path");
            return load_config_file(path);
        }
        debug!(path = path.display().to_string(); "System configuration file not found");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    parse_config(&content)
        .map_err(|message| ConfigError::Parse { path: path.to_path_buf(), message })
}

fn parse_config(content: &str) -> Result<AppConfig, String> {
    toml::from_str(content).map_err(|err| err.to_string())
}
