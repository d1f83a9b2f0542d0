//! # Storage Layer
//!
//! Persistence for the todo.txt CLI using plain-text files.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Active tasks | One task line per line, kept as written | `{todo_dir}/todo.txt` |
//! | Archived tasks | One task line per line, kept as written | `{todo_dir}/done.txt` |
//! | Config | TOML | platform config dir, `config.toml` |
//!
//! ## Concurrency Safety
//!
//! - [`TodoDir`] uses file locking (`fs2`) for concurrent access
//! - Full rewrites are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`TodoDir`] - Read/write task lines in a todo directory
//! - [`Entry`] - A stored line and its decoded task
//! - [`Config`] - User configuration

mod config;
mod todo_dir;

pub use config::{Config, ConfigError, FormatSetting};
pub use todo_dir::{Entry, StoreError, TodoDir};
