//! Marker-based parsers for model replies.
//!
//! The remote model is asked for semi-structured text (`DATE: ... | TASK: ...`
//! lines, `VALID:`/`FEEDBACK:` pairs). These parsers are pure so the service
//! can be stubbed out in tests.

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{ScheduleEntry, ValidationResult};

const DATE_MARKER: &str = "DATE:";
const TASK_MARKER: &str = "TASK:";
const VALID_MARKER: &str = "VALID: Yes";
const FEEDBACK_MARKER: &str = "FEEDBACK:";

/// Parse a schedule reply into dated entries.
///
/// A line qualifies only if it contains a `|` with a `DATE:` marker left of
/// the first `|` and a `TASK:` marker right of it. A qualifying line with an
/// unparseable date is dropped alone; the rest of the reply still parses.
/// Entries dated outside `[start, end]` are discarded. Duplicate dates are
/// kept.
pub fn parse_schedule_reply(text: &str, start: NaiveDate, end: NaiveDate) -> Vec<ScheduleEntry> {
    let mut entries = Vec::new();

    for line in text.lines() {
        let Some((date_part, task_part)) = line.split_once('|') else {
            continue;
        };
        let Some(date_str) = substring_after(date_part, DATE_MARKER) else {
            continue;
        };
        let Some(task_desc) = substring_after(task_part, TASK_MARKER) else {
            continue;
        };
        let date = match NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d") {
            Ok(d) => d,
            Err(e) => {
                debug!(line, error = %e, "skipping schedule line with unparseable date");
                continue;
            }
        };
        if date < start || date > end {
            debug!(line, %date, "discarding schedule entry outside requested range");
            continue;
        }
        entries.push(ScheduleEntry {
            date,
            description: task_desc.trim().to_string(),
        });
    }

    entries
}

/// Parse a validation reply into a verdict plus feedback.
///
/// Valid iff the reply contains the exact substring `VALID: Yes`. Feedback is
/// everything after the first `FEEDBACK:` marker, trimmed; without the marker
/// the whole reply is used as feedback.
pub fn parse_validation_reply(text: &str) -> ValidationResult {
    let is_valid = text.contains(VALID_MARKER);
    let feedback = match substring_after(text, FEEDBACK_MARKER) {
        Some(rest) => rest.trim().to_string(),
        None => text.to_string(),
    };
    ValidationResult { is_valid, feedback }
}

/// Everything after the first occurrence of `marker`, or None if absent.
fn substring_after<'a>(haystack: &'a str, marker: &str) -> Option<&'a str> {
    haystack
        .find(marker)
        .map(|idx| &haystack[idx + marker.len()..])
}
