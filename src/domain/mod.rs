//! Domain models for the todo.txt CLI
//!
//! Contains the task record and its line codec, without any I/O concerns.

mod priority;
mod task;
mod codec;

pub use priority::{Priority, PriorityError};
pub use task::{Task, DATE_FORMAT};
pub use codec::{decode, encode, stamp_added};
