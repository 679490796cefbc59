//! Progress events emitted during execution.

use riptide_core::MigrationRecord;

/// One execution-engine event, handed to the caller's callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A migration is about to run.
    Start { id: String, descriptor: String },
    /// The SQL text about to be executed.
    Progress { id: String, sql: String },
    /// A migration finished successfully.
    Done { id: String, elapsed_ms: u64 },
    /// A migration failed; no further migrations will start.
    Error { id: String, message: String },
}

impl ProgressEvent {
    pub(crate) fn start(record: &MigrationRecord) -> Self {
        ProgressEvent::Start {
            id: record.id.as_str().to_string(),
            descriptor: record.descriptor(),
        }
    }

    pub(crate) fn progress(record: &MigrationRecord) -> Self {
        ProgressEvent::Progress {
            id: record.id.as_str().to_string(),
            sql: record.sql.clone(),
        }
    }
}

/// Wraps the caller's optional progress callback.
///
/// Every event is also mirrored to the `log` facade, so a silent reporter
/// still leaves a debug trail.
pub struct Reporter {
    callback: Option<Box<dyn Fn(&ProgressEvent) + Send + Sync>>,
}

impl Reporter {
    pub fn new(callback: impl Fn(&ProgressEvent) + Send + Sync + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// A reporter that only logs.
    pub fn silent() -> Self {
        Self { callback: None }
    }

    pub(crate) fn emit(&self, event: ProgressEvent) {
        match &event {
            ProgressEvent::Start { id, descriptor } => {
                log::info!("starting {} ({})", id, descriptor)
            }
            ProgressEvent::Progress { id, .. } => log::debug!("executing sql for {}", id),
            ProgressEvent::Done { id, elapsed_ms } => {
                log::info!("finished {} in {}ms", id, elapsed_ms)
            }
            ProgressEvent::Error { id, message } => log::warn!("{} failed: {}", id, message),
        }
        if let Some(callback) = &self.callback {
            callback(&event);
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::silent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_reporter_forwards_events() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let reporter = Reporter::new(move |event| {
            sink.lock().unwrap().push(event.clone());
        });

        reporter.emit(ProgressEvent::Done {
            id: "V1__a.sql".to_string(),
            elapsed_ms: 7,
        });

        let events = seen.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], ProgressEvent::Done { elapsed_ms: 7, .. }));
    }

    #[test]
    fn test_silent_reporter_does_not_panic() {
        Reporter::silent().emit(ProgressEvent::Progress {
            id: "x".to_string(),
            sql: "SELECT 1".to_string(),
        });
    }
}
