// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Presentation state that lives next to the controller.
//!
//! Every visible change bumps `rev`, so a front end can redraw only when something moved.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    rev: u64,
    show_raw: bool,
    source_rev: u64,
}

impl ViewState {
    pub fn rev(&self) -> u64 {
        self.rev
    }

    /// Whether the raw diagram text is shown instead of the rendered diagram.
    pub fn show_raw(&self) -> bool {
        self.show_raw
    }

    /// Incremented whenever the current diagram source is replaced.
    pub fn source_rev(&self) -> u64 {
        self.source_rev
    }

    pub fn toggle_raw(&mut self) -> bool {
        self.set_show_raw(!self.show_raw);
        self.show_raw
    }

    pub fn set_show_raw(&mut self, show_raw: bool) {
        if self.show_raw == show_raw {
            return;
        }
        self.show_raw = show_raw;
        self.rev = self.rev.wrapping_add(1);
    }

    pub fn bump_source_rev(&mut self) {
        self.source_rev = self.source_rev.wrapping_add(1);
        self.rev = self.rev.wrapping_add(1);
    }
}
