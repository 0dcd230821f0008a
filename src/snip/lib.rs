//! # zsh-snip Architecture
//!
//! zsh-snip keeps command snippets as plain files: one file per snippet, a short
//! metadata header, then the command body verbatim. The shell integration is thin;
//! everything with real rules in it lives in this library and is usable without a
//! terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders output, picks exit codes       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns store paths, config and per-session warning state   │
//! │  - Dispatches to commands, returns `CmdResult`              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - save, search, edit, delete, dup, list, exec, ...         │
//! │  - External processes reached only through traits           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - naming: slugs, primary command, numeric suffixes         │
//! │  - header: snippet file format                              │
//! │  - comment: `# name: description` trailing annotations      │
//! │  - store: roots, enumeration, local store discovery         │
//! │  - reconcile: rename-on-save after an editor round trip     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snippet File Format
//!
//! ```text
//! # name: git/status
//! # description: check repo state
//! # args: <branch>
//! # abbr: gst
//! # created: 2026-01-04T10:12:55+01:00
//! # ---
//! git status
//! ```
//!
//! `args` and `abbr` are optional. Everything after the `# ---` line is the body.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward nothing writes to stdout/stderr or exits the process. The
//! editor, the fuzzy finder and terminal prompts are collaborators behind the
//! [`editor::Editor`], [`finder::Finder`] and [`prompt::Prompt`] traits, so every
//! flow can be driven by fakes in tests.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per operation
//! - [`naming`]: Name/slug engine and collision resolver
//! - [`header`]: Header codec
//! - [`comment`]: Trailing-comment metadata extraction
//! - [`store`]: Store roots and enumeration
//! - [`reconcile`]: Rename-on-save reconciler
//! - [`config`]: Configuration loading
//! - [`editor`], [`finder`], [`clipboard`], [`prompt`], [`abbr`]: External collaborators
//! - [`session`]: Per-session warning state
//! - [`shell`]: zsh integration script
//! - [`error`]: Error types

pub mod abbr;
pub mod api;
pub mod clipboard;
pub mod comment;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod finder;
pub mod header;
pub mod init;
pub mod model;
pub mod naming;
pub mod prompt;
pub mod reconcile;
pub mod session;
pub mod shell;
pub mod store;
