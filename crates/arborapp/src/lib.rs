//! # Arbor Architecture
//!
//! Arbor is a **UI-agnostic folder-structure editor**. It is a library that
//! happens to have a CLI client: the same core could back a web page, a TUI
//! or a REST service.
//!
//! A user builds a tree of named folders, reorganizes it (drag-and-drop moves,
//! indent, outdent), marks folders as reviewed, and exports the result as a
//! shell (`crear_carpetas.sh`) or batch (`crear_carpetas.bat`) script that
//! recreates the folders on disk.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/arbor)                                   │
//! │  - Parses arguments, prompts, renders, serves HTTP          │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, resolves node references to ids             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (session.rs)                                       │
//! │  - Live forest, filter, undo/redo history                   │
//! │  - snapshot → command → record → save, for every mutation   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure, atomic operations on a Forest                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait: Fs, Http, Mem                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns
//! `Result<CmdResult>`, and never writes to stdout/stderr. Diagnostics go
//! through `tracing`; the binary decides where they end up.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): thorough unit tests of tree logic. This
//!    is where most tests live.
//! 2. **Session / API**: history and persistence wiring, against
//!    [`store::mem_backend::MemBackend`].
//! 3. **Storage**: filesystem backend and the server router in `tests/`.
//! 4. **CLI**: end-to-end runs of the binary.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`session`]: Editing session (history + persistence around commands)
//! - [`commands`]: Business logic for each operation
//! - [`model`]: `Node` and `Forest`
//! - [`path`]: Id → position resolution
//! - [`history`]: Snapshot undo/redo
//! - [`filter`]: Filtered view and match highlighting
//! - [`export`]: Script rendering
//! - [`store`]: Storage abstraction and backends
//! - [`server`]: Storage protocol router
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod history;
pub mod model;
pub mod path;
pub mod server;
pub mod session;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
