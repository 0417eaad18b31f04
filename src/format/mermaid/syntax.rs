// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Lexical helpers shared by the flowchart parser and the repair rules.
//!
//! Everything here works line by line. Text inside double quotes or inside `[]`, `()` and `{}`
//! groups is *opaque*: operators, pipes and terminators found there are label content.

use std::sync::OnceLock;

use regex::Regex;

const KEYWORDS: [&str; 7] =
    ["subgraph", "direction", "style", "classDef", "class", "click", "linkStyle"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScannedChar {
    pub(crate) idx: usize,
    pub(crate) ch: char,
    pub(crate) opaque: bool,
    /// Set on the character that closes the outermost quote/bracket group.
    pub(crate) closes_group: bool,
}

pub(crate) fn scan_line(line: &str) -> Vec<ScannedChar> {
    let mut out = Vec::with_capacity(line.len());
    let mut closers = Vec::<char>::new();
    let mut in_quote = false;

    for (idx, ch) in line.char_indices() {
        let (opaque, closes_group) = if in_quote {
            if ch == '"' {
                in_quote = false;
            }
            (true, !in_quote && closers.is_empty())
        } else if ch == '"' {
            in_quote = true;
            (true, false)
        } else if let Some(close) = closing_delimiter(ch) {
            closers.push(close);
            (true, false)
        } else if let Some(&expected) = closers.last() {
            if ch == expected {
                closers.pop();
            }
            (true, closers.is_empty())
        } else {
            (false, false)
        };
        out.push(ScannedChar { idx, ch, opaque, closes_group });
    }

    out
}

pub(crate) fn closing_delimiter(open: char) -> Option<char> {
    match open {
        '[' => Some(']'),
        '(' => Some(')'),
        '{' => Some('}'),
        _ => None,
    }
}

pub(crate) fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn is_edge_stroke_char(ch: char) -> bool {
    matches!(ch, '-' | '=' | '.')
}

fn is_edge_body_char(ch: char) -> bool {
    matches!(ch, '<' | '>' | '-' | '=' | '.')
}

/// Length (in chars) of the edge operator starting at `start`, if one starts there.
///
/// An operator is a run of `<>-=.` with at least two strokes, optionally ending in an `o`/`x`
/// decoration that is not glued to a following identifier.
pub(crate) fn edge_operator_len(chars: &[ScannedChar], start: usize) -> Option<usize> {
    let first = chars.get(start)?;
    if first.opaque || !matches!(first.ch, '<' | '-' | '=' | '.') {
        return None;
    }

    let mut end = start;
    let mut strokes = 0usize;
    while let Some(sc) = chars.get(end) {
        if sc.opaque || !is_edge_body_char(sc.ch) {
            break;
        }
        if is_edge_stroke_char(sc.ch) {
            strokes += 1;
        }
        end += 1;
    }
    if strokes < 2 {
        return None;
    }

    if let Some(sc) = chars.get(end) {
        let glued = chars.get(end + 1).is_some_and(|next| is_ident_char(next.ch));
        if !sc.opaque && matches!(sc.ch, 'o' | 'x') && !glued {
            end += 1;
        }
    }

    Some(end - start)
}

/// Whether a line contains at least one edge operator outside opaque text.
pub(crate) fn has_edge_operator(chars: &[ScannedChar]) -> bool {
    (0..chars.len()).any(|i| {
        let preceded_by_op = i > 0 && !chars[i - 1].opaque && is_edge_body_char(chars[i - 1].ch);
        !preceded_by_op && edge_operator_len(chars, i).is_some()
    })
}

/// Length (in chars) of a node declaration starting at `start`: an identifier optionally followed
/// by one closed quote/bracket group.
pub(crate) fn node_declaration_len(chars: &[ScannedChar], start: usize) -> Option<usize> {
    let mut end = start;
    while chars.get(end).is_some_and(|sc| !sc.opaque && is_ident_char(sc.ch)) {
        end += 1;
    }
    if end == start {
        return None;
    }

    match chars.get(end) {
        Some(sc) if sc.opaque && closing_delimiter(sc.ch).is_some() => {
            while chars.get(end).is_some_and(|sc| sc.opaque) {
                let closes = chars[end].closes_group;
                end += 1;
                if closes {
                    return Some(end - start);
                }
            }
            None
        }
        Some(sc) if sc.opaque => None,
        _ => Some(end - start),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    Blank,
    Comment,
    Header,
    Keyword,
    Statement,
}

/// A `graph`/`flowchart` declaration line, split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeaderLine<'a> {
    pub(crate) keyword: &'a str,
    /// Byte range of the direction token within the original line.
    pub(crate) direction: Option<(usize, usize)>,
    /// Statements following the header's `;`, trimmed.
    pub(crate) rest: &'a str,
}

impl HeaderLine<'_> {
    pub(crate) fn direction_token<'l>(&self, line: &'l str) -> Option<&'l str> {
        self.direction.map(|(start, end)| &line[start..end])
    }
}

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(graph|flowchart)(?:\s+([A-Za-z]{2}))?\s*(?:;(.*))?$")
            .expect("header regex")
    })
}

pub(crate) fn parse_header_line(line: &str) -> Option<HeaderLine<'_>> {
    let caps = header_regex().captures(line)?;
    let keyword = caps.get(1)?.as_str();
    let direction = caps.get(2).map(|m| (m.start(), m.end()));
    let rest = caps.get(3);
    Some(HeaderLine {
        keyword,
        direction,
        rest: rest.map(|m| m.as_str().trim()).unwrap_or(""),
    })
}

pub(crate) fn line_kind(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with("%%") {
        return LineKind::Comment;
    }
    if parse_header_line(trimmed).is_some() {
        return LineKind::Header;
    }

    let bare = trimmed.trim_end_matches(';').trim_end();
    if bare == "end" {
        return LineKind::Keyword;
    }
    let first = bare.split_whitespace().next().unwrap_or("");
    if KEYWORDS.contains(&first) {
        return LineKind::Keyword;
    }

    LineKind::Statement
}

/// Splits a line on `;` terminators outside opaque text. Empty statements are dropped.
pub(crate) fn split_statements(line: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0usize;
    for sc in scan_line(line) {
        if !sc.opaque && sc.ch == ';' {
            out.push(&line[start..sc.idx]);
            start = sc.idx + 1;
        }
    }
    out.push(&line[start..]);
    out.retain(|statement| !statement.trim().is_empty());
    out
}
