//! Append-only audit sinks.
//!
//! The tracker reports every mutation to an [`AuditSink`]. Sinks are decoupled
//! from record storage: the tracker never reads them back to make decisions.

use cellwatch_types::audit::AuditEvent;
use parking_lot::RwLock;
use std::collections::VecDeque;

/// Destination for audit events.
pub trait AuditSink: Send + Sync {
    /// Append one event.
    fn append(&self, event: AuditEvent);

    /// Events still retained, oldest first. Sinks that forward events
    /// elsewhere retain nothing.
    fn snapshot(&self) -> Vec<AuditEvent> {
        Vec::new()
    }

    /// Number of retained events.
    fn len(&self) -> usize {
        0
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory audit log, optionally bounded.
pub struct MemoryAuditLog {
    events: RwLock<VecDeque<AuditEvent>>,
    capacity: Option<usize>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(VecDeque::new()),
            capacity: None,
        }
    }

    /// Keep at most `capacity` events, dropping the oldest first. A capacity
    /// of zero retains nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: RwLock::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity: Some(capacity),
        }
    }
}

impl Default for MemoryAuditLog {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditSink for MemoryAuditLog {
    fn append(&self, event: AuditEvent) {
        let mut events = self.events.write();
        match self.capacity {
            Some(0) => return,
            Some(capacity) => {
                while events.len() >= capacity {
                    events.pop_front();
                }
            }
            None => {}
        }
        events.push_back(event);
    }

    fn snapshot(&self) -> Vec<AuditEvent> {
        self.events.read().iter().cloned().collect()
    }

    fn len(&self) -> usize {
        self.events.read().len()
    }
}

/// Writes events to the `cellwatch::audit` log target and retains nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingAuditSink;

impl AuditSink for LoggingAuditSink {
    fn append(&self, event: AuditEvent) {
        log::info!(
            target: "cellwatch::audit",
            "{:?} {} at {:.3}",
            event.action,
            event.entity_id,
            event.timestamp
        );
    }
}

/// Sends each event to every inner sink; reads come from the first one.
pub struct FanoutAuditSink {
    sinks: Vec<Box<dyn AuditSink>>,
}

impl FanoutAuditSink {
    pub fn new(sinks: Vec<Box<dyn AuditSink>>) -> Self {
        Self { sinks }
    }
}

impl AuditSink for FanoutAuditSink {
    fn append(&self, event: AuditEvent) {
        if let Some((last, rest)) = self.sinks.split_last() {
            for sink in rest {
                sink.append(event.clone());
            }
            last.append(event);
        }
    }

    fn snapshot(&self) -> Vec<AuditEvent> {
        self.sinks.first().map(|s| s.snapshot()).unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.sinks.first().map(|s| s.len()).unwrap_or(0)
    }
}
