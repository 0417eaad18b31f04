// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deterministic text repair for model-generated flowchart sources.
//!
//! Repair is an ordered list of [`RepairRule`]s. Each rule is total and idempotent, and the rules
//! only ever look at text outside quotes and bracket groups, so running the whole pipeline twice
//! yields the same text as running it once. The output always carries exactly one
//! `graph`/`flowchart` header declaring the requested orientation.

use std::fmt;
use std::sync::OnceLock;

use log::debug;

use crate::format::mermaid::syntax::{line_kind, LineKind};
use crate::model::{DiagramSource, Orientation};

mod rules;

pub use rules::{
    ConnectorInsertionRule, ConnectorSpacingRule, DelimiterCollapseRule, HeaderRule,
    TerminatorRule,
};

/// One textual fix-up step.
pub trait RepairRule: Send + Sync {
    /// Stable name, used in logs and reports.
    fn name(&self) -> &'static str;

    /// Rewrite `text`. Must never fail and must be idempotent.
    fn apply(&self, text: &str, orientation: Orientation) -> String;
}

/// Ordered collection of repair rules.
pub struct RepairPipeline {
    rules: Vec<Box<dyn RepairRule>>,
}

impl RepairPipeline {
    pub fn new(rules: Vec<Box<dyn RepairRule>>) -> Self {
        Self { rules }
    }

    /// Header, terminators, missing connectors, connector spacing, then delimiter runs.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(HeaderRule),
            Box::new(TerminatorRule),
            Box::new(ConnectorInsertionRule),
            Box::new(ConnectorSpacingRule),
            Box::new(DelimiterCollapseRule),
        ])
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name())
    }

    pub fn run(&self, source: &DiagramSource, orientation: Orientation) -> DiagramSource {
        self.run_with_report(source, orientation).0
    }

    /// Like [`RepairPipeline::run`], also returning the names of the rules that changed the text.
    pub fn run_with_report(
        &self,
        source: &DiagramSource,
        orientation: Orientation,
    ) -> (DiagramSource, Vec<&'static str>) {
        let mut text = source.as_str().to_owned();
        let mut applied = Vec::new();

        for rule in &self.rules {
            let next = rule.apply(&text, orientation);
            if next != text {
                debug!(
                    rule = rule.name(),
                    orientation:% = orientation;
                    "Repair rule rewrote source"
                );
                applied.push(rule.name());
                text = next;
            }
        }

        debug!(rules_applied = applied.len(); "Repair pass finished");
        (DiagramSource::new(text), applied)
    }
}

impl Default for RepairPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for RepairPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rule_names()).finish()
    }
}

fn standard_pipeline() -> &'static RepairPipeline {
    static PIPELINE: OnceLock<RepairPipeline> = OnceLock::new();
    PIPELINE.get_or_init(RepairPipeline::standard)
}

/// Repair `source` for `orientation` with the standard pipeline.
pub fn repair(source: &DiagramSource, orientation: Orientation) -> DiagramSource {
    standard_pipeline().run(source, orientation)
}

/// Rebuilds `text` line by line, keeping a trailing newline if there was one.
pub(crate) fn map_lines<I>(text: &str, lines: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out = String::with_capacity(text.len() + 16);
    for (idx, line) in lines.into_iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(line.as_ref());
    }
    if text.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Applies `fix` to statement lines only.
pub(crate) fn map_statement_lines(text: &str, fix: impl Fn(&str) -> String) -> String {
    map_lines(
        text,
        text.lines().map(|line| match line_kind(line) {
            LineKind::Statement => fix(line),
            _ => line.to_owned(),
        }),
    )
}
