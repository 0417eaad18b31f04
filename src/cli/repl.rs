// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Archwize-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Archwize and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Line-oriented front end for a [`DiagramSession`].

use std::fmt::Write as _;
use std::fs;

use log::{debug, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::CliError;
use crate::controller::{DiagramSession, SessionError, SessionView};
use crate::generate::Generator;
use crate::model::{DiagramCategory, Orientation};
use crate::render::Renderer;

const PASTE_END: &str = ".";

const HELP: &str = "\
commands:
  generate <prompt>     ask the generator for a diagram
  load <path>           render a reply stored in a file
  paste                 render the following lines, ended by a line with a single '.'
  retry                 repair the failed diagram (or use its template)
  template [category]   render a template, defaulting to the suggested one
  raw                   toggle between outline and raw source
  show                  print the current state again
  orientation <TD|LR>   orientation for the next generate/load/paste
  help                  print this help
  quit                  leave the session
";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand<'a> {
    Empty,
    Generate(&'a str),
    Load(&'a str),
    Paste,
    Retry,
    Template(Option<DiagramCategory>),
    Raw,
    Show,
    Orientation(Orientation),
    Help,
    Quit,
}

impl<'a> ReplCommand<'a> {
    fn parse(line: &'a str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "" => Self::Empty,
            "generate" | "gen" if !rest.is_empty() => Self::Generate(rest),
            "generate" | "gen" => return Err("generate needs a prompt".to_owned()),
            "load" if !rest.is_empty() => Self::Load(rest),
            "load" => return Err("load needs a file path".to_owned()),
            "paste" => Self::Paste,
            "retry" => Self::Retry,
            "template" if rest.is_empty() => Self::Template(None),
            "template" => Self::Template(Some(rest.parse().map_err(|err| format!("{err}"))?)),
            "raw" => Self::Raw,
            "show" => Self::Show,
            "orientation" => Self::Orientation(rest.parse().map_err(|err| format!("{err}"))?),
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command '{other}', try 'help'")),
        };
        Ok(command)
    }
}

fn format_view(view: &SessionView<'_>) -> String {
    let mut out = String::new();
    let _ = write!(out, "state: {}", view.state);
    if let Some(origin) = view.origin {
        let _ = write!(out, " ({origin})");
    }
    out.push('\n');

    if let Some(error) = &view.error {
        let _ = writeln!(out, "error: {error}");
    }

    let mut actions = Vec::new();
    if view.actions.retry {
        actions.push("retry".to_owned());
    }
    if let Some(category) = view.actions.suggested_template {
        actions.push(format!("template {category}"));
    }
    if !actions.is_empty() {
        let _ = writeln!(out, "actions: {}", actions.join(", "));
    }

    let body = if view.show_raw {
        view.source.map(|source| source.as_str())
    } else {
        view.outline
    };
    if let Some(body) = body {
        out.push_str(body);
        if !body.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

fn format_result(result: Result<SessionView<'_>, SessionError>) -> String {
    match result {
        Ok(view) => format_view(&view),
        Err(err) => {
            warn!("Session command failed: {err}");
            format!("error: {err}\n")
        }
    }
}

async fn read_paste<I>(lines: &mut tokio::io::Lines<I>) -> Result<String, CliError>
where
    I: AsyncBufRead + Unpin,
{
    let mut reply = String::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == PASTE_END {
            break;
        }
        reply.push_str(&line);
        reply.push('\n');
    }
    Ok(reply)
}

/// Reads commands from `input` until `quit` or end of input, writing every view to `output`.
pub(crate) async fn run_repl<G, R, I, O>(
    session: &mut DiagramSession<G, R>,
    mut orientation: Orientation,
    input: I,
    output: &mut O,
) -> Result<(), CliError>
where
    G: Generator,
    R: Renderer,
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    output.write_all(b"type 'help' for commands\n").await?;
    output.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let command = match ReplCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                output.write_all(format!("error: {message}\n").as_bytes()).await?;
                output.flush().await?;
                continue;
            }
        };
        debug!(command:? = command; "Session command");

        let text = match command {
            ReplCommand::Empty => continue,
            ReplCommand::Quit => break,
            ReplCommand::Help => HELP.to_owned(),
            ReplCommand::Generate(prompt) => {
                format_result(session.generate(prompt, orientation).await)
            }
            ReplCommand::Load(path) => match fs::read_to_string(path) {
                Ok(reply) => format_result(session.accept_reply(&reply, orientation).await),
                Err(err) => format!("error: failed to read {path}: {err}\n"),
            },
            ReplCommand::Paste => {
                let reply = read_paste(&mut lines).await?;
                format_result(session.accept_reply(&reply, orientation).await)
            }
            ReplCommand::Retry => format_result(session.retry().await),
            ReplCommand::Template(category) => {
                match category.or(session.view().actions.suggested_template) {
                    Some(category) => format_result(session.use_template(category).await),
                    None => "error: no template suggested for this diagram\n".to_owned(),
                }
            }
            ReplCommand::Raw => format_view(&session.toggle_raw_view()),
            ReplCommand::Show => format_view(&session.view()),
            ReplCommand::Orientation(next) => {
                orientation = next;
                format!("orientation: {}\n", orientation.description())
            }
        };

        output.write_all(text.as_bytes()).await?;
        output.flush().await?;
    }

    Ok(())
}
