//! Action-log replay — turns the JSON-lines stream back into the submission
//! shape.
//!
//! The submission format flattens each record to microseconds since epoch
//! plus the action, order id, and target strings.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use super::{ActionKind, ActionRecord, StorageTarget};
use crate::types::Result;

/// One action in the submission document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAction {
    /// Microseconds since the Unix epoch.
    pub timestamp: i64,
    pub id: String,
    pub action: ActionKind,
    pub target: StorageTarget,
}

impl From<ActionRecord> for SubmittedAction {
    fn from(record: ActionRecord) -> Self {
        Self {
            timestamp: record.time.timestamp_micros(),
            id: record.order_id,
            action: record.msg,
            target: record.target,
        }
    }
}

/// Parse every line of an action-log stream.
///
/// Blank lines are skipped; a malformed line is an error, not a silent drop —
/// the submission must reflect the full history.
pub fn parse_actions<R: BufRead>(reader: R) -> Result<Vec<SubmittedAction>> {
    let mut actions = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: ActionRecord = serde_json::from_str(&line)?;
        actions.push(record.into());
    }
    Ok(actions)
}

/// Serialize the submission document as a JSON array.
pub fn write_submission<W: Write>(mut writer: W, actions: &[SubmittedAction]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, actions)?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ActionLog, SharedBuffer};
    use crate::types::OrderId;

    fn logged_actions(buffer: &SharedBuffer) -> Vec<SubmittedAction> {
        parse_actions(std::io::Cursor::new(buffer.contents())).unwrap()
    }

    #[test]
    fn test_round_trip_from_action_log() {
        let (log, buffer) = ActionLog::in_memory();
        log.record(ActionKind::Place, &OrderId::from("o-1"), StorageTarget::Shelf);
        log.record(ActionKind::Move, &OrderId::from("o-2"), StorageTarget::Cooler);

        let actions = logged_actions(&buffer);
        assert_eq!(actions.len(), 2);

        assert_eq!(actions[0].id, "o-1");
        assert_eq!(actions[0].action, ActionKind::Place);
        assert_eq!(actions[0].target, StorageTarget::Shelf);

        assert_eq!(actions[1].action, ActionKind::Move);
        assert_eq!(actions[1].target, StorageTarget::Cooler);

        // Microsecond timestamps, monotonically non-decreasing within a run
        assert!(actions[0].timestamp > 0);
        assert!(actions[1].timestamp >= actions[0].timestamp);
    }

    #[test]
    fn test_known_time_converts_to_micros() {
        let line = r#"{"time":"2024-03-01T12:00:00.000123456Z","level":"INFO","msg":"pickup","order id":"x","target":"heater"}"#;
        let actions = parse_actions(std::io::Cursor::new(line)).unwrap();
        assert_eq!(actions[0].timestamp, 1_709_294_400_000_123);
    }

    #[test]
    fn test_malformed_line_is_an_error() {
        let input = "{\"time\":\"2024-03-01T12:00:00Z\",\"level\":\"INFO\",\"msg\":\"place\",\"order id\":\"a\",\"target\":\"shelf\"}\nnot json\n";
        assert!(parse_actions(std::io::Cursor::new(input)).is_err());
    }

    #[test]
    fn test_submission_serialization() {
        let actions = vec![SubmittedAction {
            timestamp: 42,
            id: "a".to_string(),
            action: ActionKind::Discard,
            target: StorageTarget::Shelf,
        }];
        let mut out = Vec::new();
        write_submission(&mut out, &actions).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"discard\""));
        assert!(text.contains("\"timestamp\": 42"));

        let back: Vec<SubmittedAction> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, actions);
    }
}
