use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "arbor",
    bin_name = "arbor",
    version,
    disable_help_subcommand = true,
    after_help = "Nodes can be given by id, by position (as shown by `arbor show`, e.g. 1.2) or by a unique part of their name."
)]
#[command(about = "Edit folder structures and export them as mkdir scripts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Structure to work on (defaults to the configured one)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub structure: Option<String>,

    /// Directory holding structures (fs backend)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Use a structure server at this URL instead of local files
    #[arg(long, global = true, value_name = "URL", help_heading = "Options")]
    pub server: Option<String>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Edit(EditCommands),

    /// Interactive editing session with undo/redo
    #[command(display_order = 40)]
    Shell,

    /// Serve structures over HTTP for `--server` clients
    #[command(display_order = 41)]
    Serve {
        /// Address to listen on (e.g. 127.0.0.1:3001)
        #[arg(long)]
        listen: Option<String>,
    },
}

/// Commands available both from the command line and inside `arbor shell`.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum EditCommands {
    /// Show the folder tree
    #[command(alias = "ls", display_order = 1)]
    Show {
        /// Only show folders matching this text (and the folders containing them)
        #[arg(short, long)]
        filter: Option<String>,

        /// Show node ids
        #[arg(long)]
        ids: bool,
    },

    /// Add a folder at the top level, or inside PARENT
    #[command(alias = "new", display_order = 2)]
    Add {
        /// Parent folder
        parent: Option<String>,

        /// Name of the new folder
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Rename a folder
    #[command(display_order = 3)]
    Rename {
        node: String,

        /// New name words (joined with spaces; none cancels)
        #[arg(trailing_var_arg = true)]
        name: Vec<String>,
    },

    /// Move a folder before, after or into another one
    #[command(display_order = 4)]
    #[command(group(
        ArgGroup::new("position")
            .required(true)
            .args(["before", "after", "into"])
    ))]
    Mv {
        node: String,

        #[arg(long, value_name = "TARGET")]
        before: Option<String>,

        #[arg(long, value_name = "TARGET")]
        after: Option<String>,

        #[arg(long, value_name = "TARGET")]
        into: Option<String>,
    },

    /// Make a folder the last child of the folder above it
    #[command(display_order = 5)]
    Indent { node: String },

    /// Move a folder out of its parent, right after it
    #[command(display_order = 6)]
    Outdent { node: String },

    /// Delete a folder and everything inside it
    #[command(alias = "delete", display_order = 7)]
    Rm {
        node: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Collapse or expand a folder
    #[command(display_order = 10)]
    Collapse { node: String },

    /// Mark a folder as reviewed
    #[command(display_order = 11)]
    Review {
        node: String,

        /// Clear the reviewed mark instead
        #[arg(long)]
        off: bool,
    },

    /// Collapse every top-level folder
    #[command(display_order = 12)]
    CollapseAll,

    /// Expand every top-level folder
    #[command(display_order = 13)]
    ExpandAll,

    /// Export as a script (sh, bat) or as raw json
    #[command(display_order = 20)]
    Export {
        /// sh, bat or json
        format: String,

        /// Output file (defaults to crear_carpetas.sh / .bat, or the structure name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Import a JSON document, replacing the structure (or creating a new one with --as)
    #[command(display_order = 21)]
    Import {
        file: PathBuf,

        /// Save as a new structure with this name
        #[arg(long = "as", value_name = "NAME")]
        as_name: Option<String>,
    },

    /// Manage named structures
    #[command(alias = "st", display_order = 30)]
    Structures {
        #[command(subcommand)]
        action: Option<StructureCommands>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum StructureCommands {
    /// List stored structures
    #[command(alias = "ls")]
    List,

    /// Create an empty structure
    New { name: String },

    /// Delete a structure
    Rm {
        name: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// One line typed into `arbor shell`.
#[derive(Parser, Debug)]
#[command(
    name = "arbor",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct ShellInput {
    #[command(subcommand)]
    pub command: ShellCommands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ShellCommands {
    #[command(flatten)]
    Edit(EditCommands),

    /// Undo the last change
    #[command(alias = "u", display_order = 50)]
    Undo,

    /// Redo the last undone change
    #[command(display_order = 51)]
    Redo,

    /// Set the filter (no text clears it)
    #[command(display_order = 52)]
    Filter {
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Switch to another structure
    #[command(display_order = 53)]
    Open { name: String },

    /// Leave the shell
    #[command(aliases = ["exit", "q"], display_order = 60)]
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
        ShellInput::command().debug_assert();
    }

    #[test]
    fn parses_move() {
        let cli = Cli::try_parse_from(["arbor", "mv", "Q1", "--into", "Media"]).unwrap();
        match cli.command {
            Some(Commands::Edit(EditCommands::Mv { node, into, .. })) => {
                assert_eq!(node, "Q1");
                assert_eq!(into.as_deref(), Some("Media"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn move_needs_a_position() {
        assert!(Cli::try_parse_from(["arbor", "mv", "Q1"]).is_err());
        assert!(
            Cli::try_parse_from(["arbor", "mv", "Q1", "--into", "a", "--after", "b"]).is_err()
        );
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["arbor", "show", "-s", "plan", "-v"]).unwrap();
        assert_eq!(cli.structure.as_deref(), Some("plan"));
        assert!(cli.verbose);
    }

    #[test]
    fn shell_lines_parse() {
        let input = ShellInput::try_parse_from(["undo"]).unwrap();
        assert_eq!(input.command, ShellCommands::Undo);

        let input = ShellInput::try_parse_from(["rename", "1.2", "Year", "2024"]).unwrap();
        assert_eq!(
            input.command,
            ShellCommands::Edit(EditCommands::Rename {
                node: "1.2".to_string(),
                name: vec!["Year".to_string(), "2024".to_string()],
            })
        );

        assert!(ShellInput::try_parse_from(["serve"]).is_err());
    }
}
