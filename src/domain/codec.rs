//! Line codec for todo.txt tasks
//!
//! Decoding runs a fixed sequence of extraction passes over the line. Each
//! pass removes the token it recognises and hands the rest of the text to
//! the next pass:
//!
//! | Pass | Token | Match |
//! |------|-------|-------|
//! | 1 | done | `X yyyy-mm-dd` at the start |
//! | 2 | priority | `(P)` at the start |
//! | 3 | added | `yyyy-mm-dd` at the start |
//! | 4 | project | `+word` anywhere after a non-word char |
//! | 5 | context | `@word` anywhere after a non-word char |
//! | 6 | due | `DUE:yyyy-mm-dd` anywhere, case-insensitive |
//!
//! Whatever is left, trimmed, is the description. Body tokens are found by
//! search, so a description that itself contains `+word`, `@word` or
//! `DUE:date` loses that text to the matching field.
//!
//! Encoding is the task's `Display` impl.

use std::convert::Infallible;
use std::ops::Range;
use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::task::{Task, DATE_FORMAT};

// The `X ` marker is only consumed together with a valid date. A bare
// leading `X` (as in `X marks the spot`) is ordinary description text.
static DONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^X\s(\d{4}-\d{2}-\d{2})(?:\s+|$)").expect("valid done regex"));
static PRIORITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(([A-Z])\)\s+").expect("valid priority regex"));
static ADDED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})\s+").expect("valid added regex"));
static PROJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\W\+(\w+)").expect("valid project regex"));
static CONTEXT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W@(\w+)").expect("valid context regex"));
static DUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)DUE:\s*(\d{4}-\d{2}-\d{2})").expect("valid due regex"));

/// Decodes one line of text into a task
///
/// Never fails: tokens that are absent or malformed leave their field unset
/// and stay part of the description. The added date is not defaulted.
pub fn decode(line: &str) -> Task {
    let text = line.trim();

    let (done, text) = take_prefix_date(&DONE_RE, text);
    let (priority, text) = take_prefix(&PRIORITY_RE, text);
    let (added, text) = take_prefix_date(&ADDED_RE, text);

    let (project, text) = take_body(&PROJECT_RE, text, |caps| Some(caps[1].to_string()));
    let (context, text) = take_body(&CONTEXT_RE, &text, |caps| Some(caps[1].to_string()));
    let (due, text) = take_body(&DUE_RE, &text, |caps| parse_date(&caps[1]));

    let mut task = Task::blank(text);
    task.done = done;
    task.set_priority(priority.as_deref());
    task.added = added;
    task.project = project;
    task.context = context;
    task.due = due;
    task
}

/// Encodes a task as its canonical line
pub fn encode(task: &Task) -> String {
    task.to_string()
}

impl FromStr for Task {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(decode(s))
    }
}

/// Inserts an added date into a raw line that has none
///
/// The date goes after any done marker and priority, where decoding looks
/// for it. Everything else in the line is kept byte for byte. A line that
/// already carries an added date is returned unchanged.
pub fn stamp_added(line: &str, added: NaiveDate) -> String {
    let text = line.trim();

    let (_, rest) = take_prefix_date(&DONE_RE, text);
    let (_, rest) = take_prefix(&PRIORITY_RE, rest);
    if let (Some(_), _) = take_prefix_date(&ADDED_RE, rest) {
        return text.to_string();
    }

    let prefix = text[..text.len() - rest.len()].trim_end();
    let date = added.format(DATE_FORMAT).to_string();
    [prefix, date.as_str(), rest]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Strips an anchored token, returning its first capture
fn take_prefix<'a>(re: &Regex, text: &'a str) -> (Option<String>, &'a str) {
    match re.captures(text) {
        Some(caps) => {
            let end = caps.get(0).map_or(0, |m| m.end());
            (Some(caps[1].to_string()), &text[end..])
        }
        None => (None, text),
    }
}

/// Strips an anchored date token; an impossible calendar date is left alone
fn take_prefix_date<'a>(re: &Regex, text: &'a str) -> (Option<NaiveDate>, &'a str) {
    match take_prefix(re, text) {
        (Some(raw), rest) => match parse_date(&raw) {
            Some(date) => (Some(date), rest),
            None => (None, text),
        },
        (None, _) => (None, text),
    }
}

/// Removes the first match anywhere in the text that `extract` accepts
fn take_body<T>(
    re: &Regex,
    text: &str,
    extract: impl Fn(&Captures) -> Option<T>,
) -> (Option<T>, String) {
    for caps in re.captures_iter(text) {
        if let Some(value) = extract(&caps) {
            let span = caps.get(0).map_or(0..0, |m| m.range());
            return (Some(value), cut(text, span));
        }
    }
    (None, text.to_string())
}

/// Removes a span, dropping one space when it was surrounded by whitespace
fn cut(text: &str, span: Range<usize>) -> String {
    let before = &text[..span.start];
    let after = &text[span.end..];

    if before.ends_with(char::is_whitespace) {
        let mut rest = after.chars();
        if rest.next().is_some_and(char::is_whitespace) {
            return format!("{}{}", before, rest.as_str());
        }
    }
    format!("{}{}", before, after)
}
