// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Unwrapping of Markdown code fences around model replies.

use crate::model::DiagramSource;

const FENCE: &str = "```";
const MERMAID_FENCE: &str = "```mermaid";
const INFO_STRING: &str = "mermaid";

/// Pull the diagram body out of a model reply.
///
/// A ```` ```mermaid ```` fence wins over any other fence. Otherwise the body of the first complete
/// fence is used. Either way a leading `mermaid` info string is dropped, in any case and whether it
/// sits on the fence line or the line below. Replies without a complete fence are taken as-is. The
/// result is trimmed; no grammar checks happen here.
pub fn extract_diagram_source(reply: &str) -> DiagramSource {
    let body = if let Some((_, after)) = reply.split_once(MERMAID_FENCE) {
        after.split_once(FENCE).map(|(inner, _)| inner).unwrap_or(after)
    } else {
        let mut parts = reply.splitn(3, FENCE);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(_), Some(inner), Some(_)) => inner,
            _ => return DiagramSource::new(reply.trim()),
        }
    };

    DiagramSource::new(strip_info_string(body))
}

/// Trims `body` and removes a leading standalone `mermaid` word.
fn strip_info_string(body: &str) -> &str {
    let body = body.trim();
    match body.get(..INFO_STRING.len()) {
        Some(word) if word.eq_ignore_ascii_case(INFO_STRING) => {
            let rest = &body[INFO_STRING.len()..];
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                rest.trim_start()
            } else {
                body
            }
        }
        _ => body,
    }
}
