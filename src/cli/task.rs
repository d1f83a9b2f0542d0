//! Task CLI commands

use anyhow::Result;
use chrono::{Local, NaiveDate};
use thiserror::Error;

use super::output::Output;
use crate::domain::{stamp_added, Priority, Task};
use crate::storage::{Entry, TodoDir};

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("No task {0}")]
    NoSuchTask(usize),

    #[error("Task text is empty")]
    EmptyTask,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn entry_json(number: usize, entry: &Entry) -> serde_json::Value {
    serde_json::json!({
        "number": number,
        "line": entry.line(),
        "task": entry.task(),
    })
}

/// Runs `change` on task `number` (1-based); every other line is written back as read
fn update_task(
    store: &TodoDir,
    number: usize,
    change: impl FnOnce(&mut Task),
) -> Result<Entry> {
    let mut entries = store.read_all()?;
    let entry = number
        .checked_sub(1)
        .and_then(|idx| entries.get_mut(idx))
        .ok_or(CommandError::NoSuchTask(number))?;

    let mut task = entry.task().clone();
    change(&mut task);
    entry.set_task(task);
    let updated = entry.clone();

    store.write_all(&entries)?;
    Ok(updated)
}

fn report(output: &Output, verb: &str, number: usize, entry: &Entry) {
    if output.is_json() {
        output.data(&entry_json(number, entry));
    } else {
        output.line(&format!("{} {}: {}", verb, number, entry.line()));
    }
}

/// Appends the typed text as a new line, inserting today's date if it has none
pub fn add(output: &Output, store: &TodoDir, words: &[String]) -> Result<()> {
    let entry = Entry::parse(stamp_added(&words.join(" "), today()));
    if entry.task().description().is_empty() {
        return Err(CommandError::EmptyTask.into());
    }

    output.verbose_ctx("add", &format!("Decoded task: {:?}", entry.task()));
    store.append(&entry)?;

    let number = store.read_all()?.len();
    report(output, "Added", number, &entry);

    Ok(())
}

pub fn list(output: &Output, store: &TodoDir, filter: Option<&str>) -> Result<()> {
    let entries = store.read_all()?;
    let needle = filter.map(str::to_lowercase);

    let shown: Vec<(usize, &Entry)> = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| (idx + 1, entry))
        .filter(|(_, entry)| match &needle {
            Some(needle) => entry.line().to_lowercase().contains(needle),
            None => true,
        })
        .collect();

    if output.is_json() {
        let items: Vec<_> = shown
            .iter()
            .map(|(number, entry)| entry_json(*number, entry))
            .collect();
        output.data(&items);
        return Ok(());
    }

    let width = entries.len().to_string().len();
    for (number, entry) in &shown {
        output.line(&format!("{:>width$} {}", number, entry.line(), width = width));
    }
    output.line("--");
    output.line(&format!("TODO: {} of {} tasks shown", shown.len(), entries.len()));

    Ok(())
}

pub fn complete(output: &Output, store: &TodoDir, number: usize) -> Result<()> {
    let on = today();
    let entry = update_task(store, number, |task| task.complete(on))?;

    report(output, "Completed", number, &entry);
    Ok(())
}

pub fn prioritize(output: &Output, store: &TodoDir, number: usize, raw: &str) -> Result<()> {
    let priority: Priority = raw.parse()?;
    output.verbose_ctx("pri", &format!("Normalized '{}' to {}", raw, priority));

    let entry = update_task(store, number, |task| task.set_priority(Some(raw.trim())))?;

    report(output, "Prioritized", number, &entry);
    Ok(())
}

pub fn deprioritize(output: &Output, store: &TodoDir, number: usize) -> Result<()> {
    let entry = update_task(store, number, |task| task.clear_priority())?;

    report(output, "Deprioritized", number, &entry);
    Ok(())
}

pub fn archive(output: &Output, store: &TodoDir) -> Result<()> {
    let moved = store.archive()?;
    output.verbose_ctx(
        "archive",
        &format!("Moved {} task(s) to {}", moved, store.done_path().display()),
    );

    if output.is_json() {
        output.data(&serde_json::json!({ "archived": moved }));
    } else {
        output.line(&format!("Archived {} completed task(s)", moved));
    }

    Ok(())
}
