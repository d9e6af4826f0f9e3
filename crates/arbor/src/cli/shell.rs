//! Interactive editing loop for `arbor shell`.
//!
//! Each input line is tokenized and parsed with the same clap definitions as
//! the command line, plus shell-only commands (`undo`, `redo`, `filter`,
//! `open`, `quit`). The session stays open between lines, which is what makes
//! undo history useful. The tree is redrawn after every change.

use super::commands::execute;
use super::render::{print_error, print_messages, print_tree, TreeOptions};
use super::setup::{ShellCommands, ShellInput};
use arborapp::api::ArborApi;
use arborapp::error::Result;
use arborapp::store::StorageBackend;
use clap::Parser;
use std::io::{BufRead, IsTerminal, Write};

const PROMPT: &str = "arbor> ";

pub(super) fn run<B: StorageBackend>(api: &mut ArborApi<B>, input: &mut dyn BufRead) -> Result<()> {
    let interactive = std::io::stdin().is_terminal();
    redraw(api)?;

    loop {
        if interactive {
            print!("{}", PROMPT);
            std::io::stdout().flush()?;
        }

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let words = match tokenize(&line) {
            Ok(words) => words,
            Err(e) => {
                print_error(&e);
                continue;
            }
        };
        if words.is_empty() {
            continue;
        }

        let parsed = match ShellInput::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Also covers `help`, which clap reports as an "error".
                let _ = e.print();
                continue;
            }
        };

        match step(api, parsed.command, input) {
            Ok(Step::Quit) => break,
            Ok(Step::Redraw) => redraw(api)?,
            Ok(Step::Stay) => {}
            Err(e) => print_error(&e),
        }
    }
    Ok(())
}

enum Step {
    Stay,
    Redraw,
    Quit,
}

fn step<B: StorageBackend>(
    api: &mut ArborApi<B>,
    command: ShellCommands,
    input: &mut dyn BufRead,
) -> Result<Step> {
    let result = match command {
        ShellCommands::Quit => return Ok(Step::Quit),
        ShellCommands::Edit(cmd) => {
            return execute(api, cmd, input).map(|changed| {
                if changed {
                    Step::Redraw
                } else {
                    Step::Stay
                }
            })
        }
        ShellCommands::Filter { text } => {
            api.set_filter(&text.join(" "));
            return Ok(Step::Redraw);
        }
        ShellCommands::Undo => api.undo()?,
        ShellCommands::Redo => api.redo()?,
        ShellCommands::Open { name } => api.open_structure(&name)?,
    };

    print_messages(&result.messages);
    Ok(if result.changed {
        Step::Redraw
    } else {
        Step::Stay
    })
}

fn redraw<B: StorageBackend>(api: &mut ArborApi<B>) -> Result<()> {
    let result = api.show(None)?;
    let filter = api.session().filter();
    if !filter.is_empty() {
        println!("{} (filter: {})", api.structure(), filter);
    } else {
        println!("{}", api.structure());
    }
    print_tree(
        &result.listed_nodes,
        TreeOptions {
            show_ids: false,
            filtering: !filter.is_empty(),
        },
    );
    print_messages(&result.messages);
    Ok(())
}

/// Splits a line into words. Single and double quotes group words, and a
/// backslash escapes the next character outside single quotes.
pub(super) fn tokenize(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') | (None, '\\') => match chars.next() {
                Some(next) => {
                    current.push(next);
                    in_word = true;
                }
                None => return Err("Trailing backslash".to_string()),
            },
            (Some(_), c) => current.push(c),
            (None, '"') | (None, '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err("Unterminated quote".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
