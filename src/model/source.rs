// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Diagram text as produced by the generator, a repair pass, or a template.
///
/// No validation happens on construction; a source is only known to be valid once a renderer
/// accepted it. Transformations always produce a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagramSource {
    text: String,
}

impl DiagramSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl fmt::Display for DiagramSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for DiagramSource {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for DiagramSource {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for DiagramSource {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Layout direction requested by the user before generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Orientation {
    #[default]
    TopDown,
    LeftRight,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::TopDown, Orientation::LeftRight];

    /// The direction token written into a graph header.
    pub fn token(self) -> &'static str {
        match self {
            Self::TopDown => "TD",
            Self::LeftRight => "LR",
        }
    }

    /// Maps a header direction token to the orientation it declares.
    ///
    /// `TB` is Mermaid's synonym for `TD`. Tokens are matched exactly; `RL`/`BT` and lowercase
    /// spellings declare no supported orientation.
    pub fn from_header_token(token: &str) -> Option<Self> {
        match token {
            "TD" | "TB" => Some(Self::TopDown),
            "LR" => Some(Self::LeftRight),
            _ => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::TopDown => "top-down",
            Self::LeftRight => "left-to-right",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown orientation: {value:?} (expected TD, TB, LR, top-down or left-right)")]
pub struct ParseOrientationError {
    value: String,
}

impl FromStr for Orientation {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "td" | "tb" | "top-down" | "topdown" => Ok(Self::TopDown),
            "lr" | "left-right" | "leftright" => Ok(Self::LeftRight),
            _ => Err(ParseOrientationError { value: s.to_owned() }),
        }
    }
}

impl Serialize for Orientation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

impl<'de> Deserialize<'de> for Orientation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
