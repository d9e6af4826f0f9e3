//! # Arbor CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/arborapp/`: Core library with UI-agnostic tree editing logic
//! - `crates/arbor/`: This CLI tool, depends on the `arborapp` library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/arbor/src/cli/)                          │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Interactive editing loop (shell.rs)                      │
//! │  - Terminal rendering (render.rs, styles.rs)                │
//! │  - Structure server over HTTP (serve.rs)                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/arborapp/src/api.rs)                     │
//! │  - Resolves ids / positions / names to node ids             │
//! │  - Dispatches to the editing session                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI layer is
//! responsible for **all** user-facing concerns: argument parsing, prompts,
//! rendering, log output and exit codes.
//!
//! ## One-shot vs Shell
//!
//! One-shot commands (`arbor add Docs`) open the structure, apply one change,
//! save and exit. Undo history lives in the session, so `undo`/`redo` are only
//! meaningful inside `arbor shell`, which keeps a session open across commands.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
