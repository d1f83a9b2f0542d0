//! Task domain model
//!
//! A task is one line of a todo.txt file. The struct holds the structured
//! fields; its [`Display`](fmt::Display) impl renders the canonical line
//! that [`decode`](super::decode) parses back.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::priority::Priority;

/// Date format used for every date token on a task line
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single todo.txt task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    description: String,

    /// Creation date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added: Option<NaiveDate>,

    /// Completion date (set means the task is done)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,

    /// Context tag, rendered as `@context`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Project tag, rendered as `+project`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Due date, rendered as `DUE:yyyy-mm-dd`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
}

impl Task {
    /// Creates a new task added on the given date
    ///
    /// The caller supplies the date (usually today) so construction stays
    /// independent of the system clock.
    pub fn new(description: impl Into<String>, added: NaiveDate) -> Self {
        let mut task = Self::blank(description);
        task.added = Some(added);
        task
    }

    /// Creates a task with only a description and no creation date
    pub fn blank(description: impl Into<String>) -> Self {
        Self {
            description: description.into().trim().to_string(),
            added: None,
            done: None,
            priority: None,
            context: None,
            project: None,
            due: None,
        }
    }

    pub fn with_done(mut self, done: NaiveDate) -> Self {
        self.done = Some(done);
        self
    }

    pub fn with_priority(mut self, priority: &str) -> Self {
        self.set_priority(Some(priority));
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_due(mut self, due: NaiveDate) -> Self {
        self.due = Some(due);
        self
    }

    /// Returns the free text left after all metadata tokens are extracted
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replaces the description, trimming surrounding whitespace
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into().trim().to_string();
    }

    /// Returns the priority, if set
    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Assigns a priority from raw input
    ///
    /// Keeps the first character upper-cased. `None`, empty input and
    /// anything not starting with a letter clear the priority instead.
    pub fn set_priority(&mut self, value: Option<&str>) {
        self.priority = value.and_then(Priority::normalize);
    }

    /// Clears the priority
    pub fn clear_priority(&mut self) {
        self.priority = None;
    }

    /// Returns true if the task has a completion date
    pub fn is_complete(&self) -> bool {
        self.done.is_some()
    }

    /// Marks the task done on the given date
    pub fn complete(&mut self, on: NaiveDate) {
        if self.done.is_none() {
            self.done = Some(on);
        }
    }

    /// Clears the completion date
    pub fn reopen(&mut self) {
        self.done = None;
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens: Vec<String> = Vec::with_capacity(8);

        if let Some(done) = self.done {
            tokens.push("X".to_string());
            tokens.push(done.format(DATE_FORMAT).to_string());
        }
        if let Some(priority) = self.priority {
            tokens.push(format!("({})", priority));
        }
        if let Some(added) = self.added {
            tokens.push(added.format(DATE_FORMAT).to_string());
        }
        tokens.push(self.description.clone());
        if let Some(context) = &self.context {
            tokens.push(format!("@{}", context));
        }
        if let Some(project) = &self.project {
            tokens.push(format!("+{}", project));
        }
        if let Some(due) = self.due {
            tokens.push(format!("DUE:{}", due.format(DATE_FORMAT)));
        }

        write!(f, "{}", tokens.join(" "))
    }
}
