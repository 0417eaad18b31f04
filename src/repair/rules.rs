// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::format::mermaid::syntax::{
    edge_operator_len, has_edge_operator, line_kind, node_declaration_len,
    parse_header_line, scan_line, LineKind, ScannedChar,
};
use crate::model::Orientation;

use super::{map_lines, map_statement_lines, RepairRule};

const CONNECTOR: &str = " --> ";
const SPLIT_INDENT: &str = "  ";

/// Ensures a single header at the top that declares the requested orientation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderRule;

/// Ends every statement line with exactly one `;`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminatorRule;

/// Joins bare node declarations on one line with `-->`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectorInsertionRule;

/// Normalizes whitespace around edge operators and attaches `|label|`s to their operator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectorSpacingRule;

/// Collapses `||`-style delimiter runs to a single `|`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimiterCollapseRule;

/// Splits `graph TD; A --> B` into a header line followed by its trailing statements.
fn push_split_header(line: &str, out: &mut Vec<String>) {
    let Some(header) = parse_header_line(line) else {
        out.push(line.to_owned());
        return;
    };
    if header.rest.is_empty() {
        out.push(line.to_owned());
        return;
    }

    // The header pattern cannot contain `;` before its terminator.
    let Some(terminator) = line.find(';') else {
        out.push(line.to_owned());
        return;
    };
    out.push(line[..=terminator].to_owned());
    push_split_header(&format!("{SPLIT_INDENT}{}", line[terminator + 1..].trim()), out);
}

fn rewrite_header(line: &str, orientation: Orientation) -> String {
    let line = line.trim_start();
    let Some(header) = parse_header_line(line) else {
        return line.to_owned();
    };

    match header.direction {
        Some((start, end)) => {
            if Orientation::from_header_token(&line[start..end]) == Some(orientation) {
                line.to_owned()
            } else {
                format!("{}{}{}", &line[..start], orientation.token(), &line[end..])
            }
        }
        None => {
            let keyword_end = header.keyword.len();
            format!("{} {}{}", &line[..keyword_end], orientation.token(), &line[keyword_end..])
        }
    }
}

impl RepairRule for HeaderRule {
    fn name(&self) -> &'static str {
        "header"
    }

    fn apply(&self, text: &str, orientation: Orientation) -> String {
        let mut lines = Vec::new();
        for line in text.lines() {
            push_split_header(line, &mut lines);
        }

        let prefix_len = lines
            .iter()
            .position(|line| !matches!(line_kind(line), LineKind::Blank | LineKind::Comment))
            .unwrap_or(lines.len());

        let mut out = Vec::with_capacity(lines.len() + 1);
        out.extend(
            lines[..prefix_len]
                .iter()
                .filter(|line| line_kind(line) == LineKind::Comment)
                .cloned(),
        );

        let first_header = lines.iter().position(|line| line_kind(line) == LineKind::Header);
        out.push(match first_header {
            Some(idx) => rewrite_header(&lines[idx], orientation),
            None => format!("graph {};", orientation.token()),
        });
        out.extend(
            lines[prefix_len..]
                .iter()
                .filter(|line| line_kind(line) != LineKind::Header)
                .cloned(),
        );

        map_lines(text, out)
    }
}

/// Char index where trailing whitespace and `;` terminators begin, or `None` when the line ends
/// inside an unterminated quote or bracket group.
fn terminator_start(chars: &[ScannedChar]) -> Option<usize> {
    let mut end = chars.len();
    while end > 0 {
        let sc = chars[end - 1];
        if sc.opaque {
            break;
        }
        if sc.ch.is_whitespace() || sc.ch == ';' {
            end -= 1;
        } else {
            break;
        }
    }

    match end.checked_sub(1).map(|last| chars[last]) {
        Some(last) if last.opaque && !last.closes_group => None,
        _ => Some(end),
    }
}

fn byte_offset(chars: &[ScannedChar], pos: usize, len: usize) -> usize {
    chars.get(pos).map(|sc| sc.idx).unwrap_or(len)
}

impl RepairRule for TerminatorRule {
    fn name(&self) -> &'static str {
        "terminator"
    }

    fn apply(&self, text: &str, _orientation: Orientation) -> String {
        map_statement_lines(text, |line| {
            let chars = scan_line(line);
            match terminator_start(&chars) {
                Some(0) | None => line.to_owned(),
                Some(end) => format!("{};", &line[..byte_offset(&chars, end, line.len())]),
            }
        })
    }
}

fn indentation(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Node declarations separated only by whitespace, or `None` if anything else is on the line.
fn bare_node_declarations(content: &str) -> Option<Vec<&str>> {
    let chars = scan_line(content);
    let mut decls = Vec::new();
    let mut i = 0usize;

    loop {
        while chars.get(i).is_some_and(|sc| !sc.opaque && sc.ch.is_whitespace()) {
            i += 1;
        }
        if i == chars.len() {
            return Some(decls);
        }

        let len = node_declaration_len(&chars, i)?;
        let end = i + len;
        if chars.get(end).is_some_and(|sc| sc.opaque || !sc.ch.is_whitespace()) {
            return None;
        }
        decls.push(&content[chars[i].idx..byte_offset(&chars, end, content.len())]);
        i = end;
    }
}

impl RepairRule for ConnectorInsertionRule {
    fn name(&self) -> &'static str {
        "connector-insertion"
    }

    fn apply(&self, text: &str, _orientation: Orientation) -> String {
        map_statement_lines(text, |line| {
            let chars = scan_line(line);
            if has_edge_operator(&chars) {
                return line.to_owned();
            }
            let Some(end) = terminator_start(&chars) else {
                return line.to_owned();
            };

            let body_end = byte_offset(&chars, end, line.len());
            let (body, tail) = line.split_at(body_end);
            match bare_node_declarations(body) {
                Some(decls) if decls.len() >= 2 => {
                    format!("{}{}{}", indentation(line), decls.join(CONNECTOR), tail)
                }
                _ => line.to_owned(),
            }
        })
    }
}

fn is_edge_body(sc: &ScannedChar) -> bool {
    !sc.opaque && matches!(sc.ch, '<' | '>' | '-' | '=' | '.')
}

fn is_plain(chars: &[ScannedChar], pos: usize, ch: char) -> bool {
    chars.get(pos).is_some_and(|sc| !sc.opaque && sc.ch == ch)
}

fn is_plain_whitespace(chars: &[ScannedChar], pos: usize) -> bool {
    chars.get(pos).is_some_and(|sc| !sc.opaque && sc.ch.is_whitespace())
}

/// Operator starting at `pos`, unless `pos` sits inside a longer run of operator characters.
fn operator_at(chars: &[ScannedChar], pos: usize) -> Option<usize> {
    if pos > 0 && is_edge_body(&chars[pos - 1]) {
        return None;
    }
    edge_operator_len(chars, pos)
}

/// Char range of a complete `|label|` starting at `pos`, pipe runs included.
fn label_span(chars: &[ScannedChar], pos: usize) -> Option<(usize, usize)> {
    if !is_plain(chars, pos, '|') {
        return None;
    }
    let mut open_end = pos;
    while is_plain(chars, open_end, '|') {
        open_end += 1;
    }
    let close = (open_end..chars.len()).find(|&k| is_plain(chars, k, '|'))?;
    let mut close_end = close;
    while is_plain(chars, close_end, '|') {
        close_end += 1;
    }
    Some((pos, close_end))
}

fn space_edges(line: &str) -> String {
    let chars = scan_line(line);
    if !has_edge_operator(&chars) {
        return line.to_owned();
    }

    let mut out = String::with_capacity(line.len() + 8);
    let mut i = 0usize;
    while is_plain_whitespace(&chars, i) {
        out.push(chars[i].ch);
        i += 1;
    }
    let indent_len = out.len();

    while i < chars.len() {
        let Some(len) = operator_at(&chars, i) else {
            out.push(chars[i].ch);
            i += 1;
            continue;
        };

        let kept = out.trim_end().len().max(indent_len);
        out.truncate(kept);
        if out.len() > indent_len {
            out.push(' ');
        }
        out.extend(chars[i..i + len].iter().map(|sc| sc.ch));
        i += len;

        let mut next = i;
        while is_plain_whitespace(&chars, next) {
            next += 1;
        }
        if is_plain(&chars, next, '|') {
            let Some((start, end)) = label_span(&chars, next) else {
                // Unterminated label: leave the remainder alone.
                out.push_str(&line[chars[i].idx..]);
                return out;
            };
            out.extend(chars[start..end].iter().map(|sc| sc.ch));
            next = end;
            while is_plain_whitespace(&chars, next) {
                next += 1;
            }
        }

        if next < chars.len() && !is_plain(&chars, next, ';') {
            out.push(' ');
        }
        i = next;
    }

    out
}

impl RepairRule for ConnectorSpacingRule {
    fn name(&self) -> &'static str {
        "connector-spacing"
    }

    fn apply(&self, text: &str, _orientation: Orientation) -> String {
        map_statement_lines(text, space_edges)
    }
}

impl RepairRule for DelimiterCollapseRule {
    fn name(&self) -> &'static str {
        "delimiter-collapse"
    }

    fn apply(&self, text: &str, _orientation: Orientation) -> String {
        map_statement_lines(text, |line| {
            let chars = scan_line(line);
            let mut out = String::with_capacity(line.len());
            for (pos, sc) in chars.iter().enumerate() {
                if sc.ch == '|' && !sc.opaque && pos > 0 && is_plain(&chars, pos - 1, '|') {
                    continue;
                }
                out.push(sc.ch);
            }
            out
        })
    }
}
