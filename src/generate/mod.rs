// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The upstream generator boundary (the language model).

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;

use crate::model::Orientation;

mod offline;

pub use offline::OfflineGenerator;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("diagram generator unavailable: {reason}")]
    UpstreamUnavailable { reason: String },
}

/// Produces a raw reply (possibly fenced Markdown) for a prompt.
pub trait Generator {
    fn generate(
        &self,
        prompt: &str,
        orientation: Orientation,
    ) -> impl Future<Output = Result<String, GenerateError>>;
}

/// Replays recorded replies in order, then reports the upstream as unavailable.
#[derive(Debug, Default)]
pub struct ReplayGenerator {
    replies: RefCell<VecDeque<String>>,
}

impl ReplayGenerator {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { replies: RefCell::new(replies.into_iter().map(Into::into).collect()) }
    }

    pub fn push(&self, reply: impl Into<String>) {
        self.replies.borrow_mut().push_back(reply.into());
    }

    pub fn remaining(&self) -> usize {
        self.replies.borrow().len()
    }
}

impl Generator for ReplayGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _orientation: Orientation,
    ) -> Result<String, GenerateError> {
        self.replies.borrow_mut().pop_front().ok_or_else(|| GenerateError::UpstreamUnavailable {
            reason: "no recorded replies left".to_owned(),
        })
    }
}
