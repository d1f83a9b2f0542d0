//! todotxt-cli - A plain-text task list manager
//!
//! Tasks live one per line in `todo.txt`, each line carrying optional
//! completion, priority, dates, a context and a project alongside the free
//! text. The [`domain`] module maps between lines and [`Task`] records.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{decode, encode, Priority, Task};
