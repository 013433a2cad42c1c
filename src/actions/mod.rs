//! Action log — the structured record stream emitted by the coordinator.
//!
//! One JSON line per `place | move | pickup | discard`, carrying the RFC3339
//! timestamp, the order id, and the target tier. This stream is the sole
//! observable history of the core: the harness replays it into the
//! submission document (see [`replay`]). The core itself never reads it back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::types::OrderId;

pub mod replay;

pub use replay::{parse_actions, write_submission, SubmittedAction};

/// The four observable actions of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Place,
    Move,
    Pickup,
    Discard,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Place => "place",
            ActionKind::Move => "move",
            ActionKind::Pickup => "pickup",
            ActionKind::Discard => "discard",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The tier an action applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageTarget {
    Heater,
    Cooler,
    Shelf,
}

impl StorageTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageTarget::Heater => "heater",
            StorageTarget::Cooler => "cooler",
            StorageTarget::Shelf => "shelf",
        }
    }
}

impl fmt::Display for StorageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One log line. Field names and the RFC3339 `time` format are the wire
/// contract with the replay layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub time: DateTime<Utc>,
    pub level: String,
    pub msg: ActionKind,
    #[serde(rename = "order id")]
    pub order_id: String,
    pub target: StorageTarget,
}

/// Append-only JSON-lines writer over an injected sink.
///
/// Cloning shares the sink. A failed write never fails the operation that
/// produced the record; it is reported through `tracing` and dropped.
#[derive(Clone)]
pub struct ActionLog {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl fmt::Debug for ActionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionLog").finish_non_exhaustive()
    }
}

impl ActionLog {
    pub fn new(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Arc::new(Mutex::new(sink)),
        }
    }

    /// Log to an in-memory buffer that can be read back later, the setup the
    /// harness uses to replay a run.
    pub fn in_memory() -> (Self, SharedBuffer) {
        let buffer = SharedBuffer::default();
        (Self::new(Box::new(buffer.clone())), buffer)
    }

    /// Discard all records. Useful for benchmarks and tests that only care
    /// about tier state.
    pub fn sink_to_null() -> Self {
        Self::new(Box::new(std::io::sink()))
    }

    /// Append one record, stamped now.
    pub fn record(&self, msg: ActionKind, order_id: &OrderId, target: StorageTarget) {
        let record = ActionRecord {
            time: Utc::now(),
            level: "INFO".to_string(),
            msg,
            order_id: order_id.to_string(),
            target,
        };
        let mut sink = match self.sink.lock() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        };
        let result = serde_json::to_writer(&mut *sink, &record)
            .map_err(std::io::Error::from)
            .and_then(|()| sink.write_all(b"\n"));
        if let Err(err) = result {
            tracing::warn!(action = %msg, order_id = %order_id, "action log write failed: {err}");
        }
    }
}

/// A `Write` sink over a shared growable buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Snapshot of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        match self.inner.lock() {
            Ok(buf) => buf.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        inner.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
