//! # CLI Behavior
//!
//! This is **one possible UI client** for arbor, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and
//! output formatting.
//!
//! ## Naked Execution (`arbor`)
//!
//! Running `arbor` with no arguments shows the current structure.
//!
//! ## Node References
//!
//! Commands taking a node accept an id, the dotted position printed by
//! `arbor show` (`1.2`), or a unique part of the folder name.
//!
//! ## Confirmation
//!
//! Destructive commands (`rm`, `structures rm`) show what will be removed and
//! ask before doing it. `--yes` skips the question.
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`. The level comes from
//! `ARBOR_LOG` (an `EnvFilter` directive, default `warn`); `-v` raises it to
//! `debug`.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Context setup and per-command handlers
//! - `shell`: The interactive editing loop
//! - `render`: Tree and message output
//! - `styles`: Terminal styling constants
//! - `serve`: HTTP listener for `arbor serve`

mod commands;
mod render;
mod serve;
pub mod setup;
mod shell;
mod styles;

pub use commands::run;
