//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, prompts)
//! - Installs the log subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Load configuration, pick the backend, open the session
//! 3. **Dispatch**: Route commands to the API
//! 4. **Output Formatting**: Trees, messages, exported files

use super::render::{print_messages, print_structures, print_tree, TreeOptions};
use super::setup::{Cli, Commands, EditCommands, StructureCommands};
use super::{serve, shell};
use arborapp::api::ArborApi;
use arborapp::commands::export::ExportKind;
use arborapp::commands::move_node::DropKind;
use arborapp::config::{ArborConfig, BackendKind};
use arborapp::error::{ArborError, Result};
use arborapp::session::Session;
use arborapp::store::fs_backend::FsBackend;
use arborapp::store::http_backend::HttpBackend;
use arborapp::store::StorageBackend;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// What to do once a session is open.
enum Action {
    Edit(EditCommands),
    Shell,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut config = ArborConfig::load(&cwd)?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(url) = &cli.server {
        config.backend = "http".to_string();
        config.server_url = url.clone();
    }
    if let Some(structure) = &cli.structure {
        config.structure = structure.clone();
    }
    debug!(?config, "configuration loaded");

    let action = match cli.command {
        Some(Commands::Serve { listen }) => {
            let backend = FsBackend::new(config.data_dir(&cwd));
            let listen = listen.unwrap_or_else(|| config.listen.clone());
            return serve::run(backend, &listen);
        }
        Some(Commands::Shell) => Action::Shell,
        Some(Commands::Edit(cmd)) => Action::Edit(cmd),
        None => Action::Edit(EditCommands::Show {
            filter: None,
            ids: false,
        }),
    };

    match config.backend_kind()? {
        BackendKind::Fs => dispatch(FsBackend::new(config.data_dir(&cwd)), &config, action),
        BackendKind::Http => dispatch(HttpBackend::new(config.server_url.clone()), &config, action),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,arborapp=debug,arbor=debug")
    } else {
        EnvFilter::try_from_env("ARBOR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn dispatch<B: StorageBackend>(backend: B, config: &ArborConfig, action: Action) -> Result<()> {
    let session = Session::open(backend, &config.structure)?
        .with_history_limit(config.history_limit)
        .with_default_name(config.default_name.clone());
    let mut api = ArborApi::new(session);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    match action {
        Action::Edit(cmd) => execute(&mut api, cmd, &mut input).map(|_| ()),
        Action::Shell => shell::run(&mut api, &mut input),
    }
}

/// Runs one edit command and prints its outcome. Returns whether the live
/// forest (or the open structure) changed, so the shell knows to redraw.
pub(super) fn execute<B: StorageBackend>(
    api: &mut ArborApi<B>,
    cmd: EditCommands,
    input: &mut dyn BufRead,
) -> Result<bool> {
    let result = match cmd {
        EditCommands::Show { filter, ids } => {
            let result = api.show(filter.as_deref())?;
            let options = TreeOptions {
                show_ids: ids,
                filtering: !api.session().filter().is_empty(),
            };
            print_tree(&result.listed_nodes, options);
            print_messages(&result.messages);
            return Ok(false);
        }
        EditCommands::Add { parent, name } => api.add(parent.as_deref(), name.as_deref())?,
        EditCommands::Rename { node, name } => {
            let name = name.join(" ");
            let name = if name.trim().is_empty() {
                None
            } else {
                Some(name.as_str())
            };
            api.rename(&node, name)?
        }
        EditCommands::Mv {
            node,
            before,
            after,
            into,
        } => {
            let (kind, target) = match (before, after, into) {
                (Some(t), _, _) => (DropKind::Before, t),
                (_, Some(t), _) => (DropKind::After, t),
                (_, _, Some(t)) => (DropKind::Into, t),
                _ => {
                    return Err(ArborError::Validation(
                        "Say where to move it: --before, --after or --into".to_string(),
                    ))
                }
            };
            api.move_node(&node, &target, kind)?
        }
        EditCommands::Indent { node } => api.indent(&node)?,
        EditCommands::Outdent { node } => api.outdent(&node)?,
        EditCommands::Rm { node, yes } => {
            let preview = api.delete_preview(&node)?;
            if !yes && !confirm(input, &preview.confirmation_message())? {
                println!("Cancelled.");
                return Ok(false);
            }
            api.delete(&preview.id)?
        }
        EditCommands::Collapse { node } => api.toggle_collapsed(&node)?,
        EditCommands::Review { node, off } => api.set_reviewed(&node, Some(!off))?,
        EditCommands::CollapseAll => api.collapse_all(true)?,
        EditCommands::ExpandAll => api.collapse_all(false)?,
        EditCommands::Export {
            format,
            output,
            stdout,
        } => {
            handle_export(api, &format, output, stdout)?;
            return Ok(false);
        }
        EditCommands::Import { file, as_name } => {
            let text = std::fs::read_to_string(&file)?;
            api.import(&text, as_name.as_deref())?
        }
        EditCommands::Structures { action } => {
            return handle_structures(api, action.unwrap_or(StructureCommands::List), input);
        }
    };

    print_messages(&result.messages);
    Ok(result.changed)
}

fn handle_export<B: StorageBackend>(
    api: &ArborApi<B>,
    format: &str,
    output: Option<PathBuf>,
    stdout: bool,
) -> Result<()> {
    let kind: ExportKind = format.parse().map_err(ArborError::Validation)?;
    let result = api.export(kind)?;

    let Some(artifact) = result.artifact else {
        print_messages(&result.messages);
        return Ok(());
    };

    if stdout {
        println!("{}", artifact.content);
        return Ok(());
    }

    let path = output.unwrap_or_else(|| PathBuf::from(&artifact.file_name));
    std::fs::write(&path, &artifact.content)?;
    print_messages(&result.messages);
    println!("Written to {}", path.display());
    Ok(())
}

fn handle_structures<B: StorageBackend>(
    api: &mut ArborApi<B>,
    action: StructureCommands,
    input: &mut dyn BufRead,
) -> Result<bool> {
    match action {
        StructureCommands::List => {
            let result = api.list_structures()?;
            print_structures(&result.structures, api.structure());
            print_messages(&result.messages);
            Ok(false)
        }
        StructureCommands::New { name } => {
            let result = api.create_structure(&name)?;
            print_messages(&result.messages);
            Ok(true)
        }
        StructureCommands::Rm { name, yes } => {
            if !yes && !confirm(input, &format!("Delete structure \"{}\"?", name))? {
                println!("Cancelled.");
                return Ok(false);
            }
            let result = api.delete_structure(&name)?;
            print_messages(&result.messages);
            Ok(true)
        }
    }
}

/// Asks a yes/no question on stdout and reads the answer from `input`.
/// End of input counts as "no".
pub(super) fn confirm(input: &mut dyn BufRead, question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        println!();
        return Ok(false);
    }
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arborapp::store::mem_backend::MemBackend;
    use std::io::Cursor;

    fn api() -> ArborApi<MemBackend> {
        let mut api = ArborApi::new(Session::open_default(MemBackend::new()).unwrap());
        api.add(None, Some("Docs")).unwrap();
        api.add(Some("Docs"), Some("2024")).unwrap();
        api
    }

    #[test]
    fn confirm_accepts_yes_only() {
        assert!(confirm(&mut Cursor::new("y\n"), "?").unwrap());
        assert!(confirm(&mut Cursor::new(" YES \n"), "?").unwrap());
        assert!(!confirm(&mut Cursor::new("n\n"), "?").unwrap());
        assert!(!confirm(&mut Cursor::new(""), "?").unwrap());
    }

    #[test]
    fn rm_declined_keeps_node() {
        let mut api = api();
        let mut input = Cursor::new("no\n");
        let changed = execute(
            &mut api,
            EditCommands::Rm {
                node: "Docs".to_string(),
                yes: false,
            },
            &mut input,
        )
        .unwrap();
        assert!(!changed);
        assert_eq!(api.forest().node_count(), 2);
    }

    #[test]
    fn rm_confirmed_removes_subtree() {
        let mut api = api();
        let mut input = Cursor::new("y\n");
        let changed = execute(
            &mut api,
            EditCommands::Rm {
                node: "1".to_string(),
                yes: false,
            },
            &mut input,
        )
        .unwrap();
        assert!(changed);
        assert!(api.forest().is_empty());
    }

    #[test]
    fn rename_without_words_cancels() {
        let mut api = api();
        let changed = execute(
            &mut api,
            EditCommands::Rename {
                node: "Docs".to_string(),
                name: vec![],
            },
            &mut Cursor::new(""),
        )
        .unwrap();
        assert!(!changed);
        assert_eq!(api.forest().roots[0].name, "Docs");
    }

    #[test]
    fn rename_joins_words() {
        let mut api = api();
        execute(
            &mut api,
            EditCommands::Rename {
                node: "2024".to_string(),
                name: vec!["Year".to_string(), "2024".to_string()],
            },
            &mut Cursor::new(""),
        )
        .unwrap();
        assert_eq!(api.forest().roots[0].children[0].name, "Year 2024");
    }

    #[test]
    fn unknown_export_format_is_rejected() {
        let mut api = api();
        let res = execute(
            &mut api,
            EditCommands::Export {
                format: "zip".to_string(),
                output: None,
                stdout: true,
            },
            &mut Cursor::new(""),
        );
        assert!(matches!(res, Err(ArborError::Validation(_))));
    }
}
