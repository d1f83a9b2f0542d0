//! todo.txt file storage
//!
//! A todo directory holds `todo.txt` (active tasks) and `done.txt`
//! (archived tasks), one task line per line. Lines are kept exactly as
//! read; only a task that is replaced through [`Entry::set_task`] is
//! re-rendered. Blank lines are skipped and not written back.
//! Uses file locking for concurrent access safety.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use thiserror::Error;

use crate::domain::{decode, Task};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("\"{0}\" does not exist!")]
    MissingDir(PathBuf),
}

/// One stored line together with its decoded task
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    line: String,
    task: Task,
}

impl Entry {
    /// Decodes a raw line, keeping the text as written
    pub fn parse(line: impl Into<String>) -> Self {
        let line = line.into();
        let task = decode(&line);
        Self { line, task }
    }

    /// Returns the line as it is stored
    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    /// Replaces the task; the stored line becomes its canonical rendering
    pub fn set_task(&mut self, task: Task) {
        self.line = task.to_string();
        self.task = task;
    }
}

impl From<Task> for Entry {
    fn from(task: Task) -> Self {
        Self {
            line: task.to_string(),
            task,
        }
    }
}

/// Store for the task files of one todo directory
pub struct TodoDir {
    dir: PathBuf,
}

impl TodoDir {
    /// Opens the todo directory, which must already exist
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();

        if !dir.is_dir() {
            return Err(StoreError::MissingDir(dir).into());
        }

        Ok(Self { dir })
    }

    /// Returns the path to `todo.txt`
    pub fn todo_path(&self) -> PathBuf {
        self.dir.join("todo.txt")
    }

    /// Returns the path to `done.txt`
    pub fn done_path(&self) -> PathBuf {
        self.dir.join("done.txt")
    }

    /// Reads all active entries in file order
    pub fn read_all(&self) -> Result<Vec<Entry>> {
        read_entries(&self.todo_path())
    }

    /// Reads all archived entries in file order
    pub fn read_done(&self) -> Result<Vec<Entry>> {
        read_entries(&self.done_path())
    }

    /// Writes all active entries (full rewrite)
    pub fn write_all(&self, entries: &[Entry]) -> Result<()> {
        write_entries(&self.todo_path(), entries)
    }

    /// Appends a single entry to `todo.txt`
    pub fn append(&self, entry: &Entry) -> Result<()> {
        append_entries(&self.todo_path(), std::slice::from_ref(entry))
    }

    /// Moves completed tasks from `todo.txt` to `done.txt`
    ///
    /// Returns the number of tasks moved.
    pub fn archive(&self) -> Result<usize> {
        let (done, open): (Vec<Entry>, Vec<Entry>) = self
            .read_all()?
            .into_iter()
            .partition(|entry| entry.task().is_complete());

        if done.is_empty() {
            return Ok(0);
        }

        // Append first so a failed rewrite leaves duplicates rather than losses
        append_entries(&self.done_path(), &done)?;
        self.write_all(&open)?;

        Ok(done.len())
    }
}

fn read_entries(path: &Path) -> Result<Vec<Entry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file =
        File::open(path).with_context(|| format!("Failed to open task file: {}", path.display()))?;

    // Acquire shared lock for reading
    file.lock_shared()
        .context("Failed to acquire read lock on task file")?;

    let reader = BufReader::new(&file);
    let mut entries = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

        if line.trim().is_empty() {
            continue;
        }

        entries.push(Entry::parse(line));
    }

    // Lock is released when file is dropped
    Ok(entries)
}

fn write_lines(writer: &mut impl Write, entries: &[Entry]) -> Result<()> {
    for entry in entries {
        writeln!(writer, "{}", entry.line()).context("Failed to write task")?;
    }
    writer.flush().context("Failed to flush task file")
}

fn write_entries(path: &Path, entries: &[Entry]) -> Result<()> {
    // Write to temp file first
    let temp_path = path.with_extension("txt.tmp");

    {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        file.lock_exclusive()
            .context("Failed to acquire write lock on task file")?;

        write_lines(&mut BufWriter::new(&file), entries)?;
    }

    // Atomic rename
    fs::rename(&temp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            temp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}

fn append_entries(path: &Path, entries: &[Entry]) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open task file: {}", path.display()))?;

    file.lock_exclusive()
        .context("Failed to acquire write lock on task file")?;

    let result = write_lines(&mut BufWriter::new(&file), entries);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn make_task(n: u32) -> Task {
        let added = NaiveDate::from_ymd_opt(2021, 6, n).unwrap();
        Task::new(format!("Task {}", n), added)
    }

    fn setup() -> (TempDir, TodoDir) {
        let dir = TempDir::new().unwrap();
        let store = TodoDir::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn open_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("made-up-dir");

        let err = TodoDir::open(&missing).err().unwrap();
        assert!(err.to_string().contains("does not exist"));
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::MissingDir(_))
        ));
    }

    #[test]
    fn read_empty_store() {
        let (_dir, store) = setup();

        assert!(store.read_all().unwrap().is_empty());
        assert!(store.read_done().unwrap().is_empty());
    }

    #[test]
    fn write_and_read_entries() {
        let (_dir, store) = setup();

        let entries: Vec<Entry> = vec![make_task(1).into(), make_task(2).with_priority("a").into()];
        store.write_all(&entries).unwrap();

        assert_eq!(store.read_all().unwrap(), entries);

        let content = fs::read_to_string(store.todo_path()).unwrap();
        assert_eq!(content, "2021-06-01 Task 1\n(A) 2021-06-02 Task 2\n");
    }

    #[test]
    fn rewrite_keeps_lines_verbatim() {
        let (_dir, store) = setup();

        let content = "2021-06-06 Plan @home @work\n2021-06-06 Ship a,+widget now\ndue:2021-07-07 late\n";
        fs::write(store.todo_path(), content).unwrap();

        let entries = store.read_all().unwrap();
        assert_eq!(entries[1].task().project.as_deref(), Some("widget"));

        store.write_all(&entries).unwrap();
        assert_eq!(fs::read_to_string(store.todo_path()).unwrap(), content);
    }

    #[test]
    fn set_task_renders_line() {
        let mut entry = Entry::parse("Call mom due:2021-07-07");
        assert_eq!(entry.line(), "Call mom due:2021-07-07");

        let task = entry.task().clone().with_priority("b");
        entry.set_task(task);
        assert_eq!(entry.line(), "(B) Call mom DUE:2021-07-07");
    }

    #[test]
    fn append_entry() {
        let (_dir, store) = setup();

        store.append(&make_task(1).into()).unwrap();
        store.append(&Entry::parse("2021-06-02 Task 2")).unwrap();

        let loaded = store.read_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].task().description(), "Task 2");
    }

    #[test]
    fn read_skips_blank_lines() {
        let (_dir, store) = setup();

        fs::write(store.todo_path(), "first\n\n   \nsecond\n").unwrap();

        let loaded = store.read_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].line(), "first");
        assert_eq!(loaded[1].line(), "second");
    }

    #[test]
    fn archive_moves_completed_tasks() {
        let (_dir, store) = setup();

        fs::write(
            store.todo_path(),
            "2021-06-01 Task 1\nX 2021-07-07 2021-06-02 Task 2 @a @b\n2021-06-03 Task 3\n",
        )
        .unwrap();

        assert_eq!(store.archive().unwrap(), 1);

        let open = store.read_all().unwrap();
        assert_eq!(open.len(), 2);
        assert!(open.iter().all(|e| !e.task().is_complete()));
        assert_eq!(
            fs::read_to_string(store.done_path()).unwrap(),
            "X 2021-07-07 2021-06-02 Task 2 @a @b\n"
        );

        // Nothing left to archive
        assert_eq!(store.archive().unwrap(), 0);
    }
}
