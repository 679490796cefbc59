//! Wave-by-wave execution engine.

use crate::error::{RunnerError, RunnerResult};
use crate::report::{ProgressEvent, Reporter};
use crate::runner::AppliedMigration;
use riptide_core::{CoreError, MigrationGraph, MigrationId};
use riptide_db::{Database, DbError};
use riptide_ledger::{Ledger, LedgerError};
use std::time::Instant;

/// Run every wave in order against `db`, recording each success in the
/// ledger.
///
/// Strictly sequential and fail-fast: the first failure stops all remaining
/// records in all remaining waves, and the error carries every migration
/// completed up to that point, including those finished earlier in the
/// failing wave. A completed migration's ledger row is written right after
/// its SQL (not in the same transaction), so a crash between the two can
/// leave it applied but unrecorded.
pub(crate) async fn execute_waves(
    db: &dyn Database,
    ledger: &Ledger,
    graph: &MigrationGraph,
    waves: &[Vec<MigrationId>],
    reporter: &Reporter,
) -> RunnerResult<Vec<AppliedMigration>> {
    let mut applied: Vec<AppliedMigration> = Vec::new();

    for (index, wave) in waves.iter().enumerate() {
        let wave_number = index + 1;
        log::debug!("executing wave {} ({} migration(s))", wave_number, wave.len());

        for id in wave {
            let record = graph.record(id).ok_or_else(|| CoreError::UnknownMigration {
                id: id.as_str().to_string(),
            })?;

            reporter.emit(ProgressEvent::start(record));
            reporter.emit(ProgressEvent::progress(record));

            let started = Instant::now();
            if let Err(e) = db.execute_batch(&record.sql).await {
                reporter.emit(ProgressEvent::Error {
                    id: record.id.as_str().to_string(),
                    message: e.to_string(),
                });
                return Err(RunnerError::Execution {
                    filename: record.filename.clone(),
                    applied,
                    source: e,
                });
            }

            let elapsed_ms = started.elapsed().as_millis() as u64;
            reporter.emit(ProgressEvent::Done {
                id: record.id.as_str().to_string(),
                elapsed_ms,
            });

            // The migration ran; a bookkeeping failure still halts the run
            // and still surfaces the work completed so far.
            if let Err(e) = ledger.record(db, record).await {
                reporter.emit(ProgressEvent::Error {
                    id: record.id.as_str().to_string(),
                    message: e.to_string(),
                });
                let source = match e {
                    LedgerError::Db(db_err) => db_err,
                    other => DbError::ExecutionError(other.to_string()),
                };
                return Err(RunnerError::Execution {
                    filename: record.filename.clone(),
                    applied,
                    source,
                });
            }

            applied.push(AppliedMigration {
                id: record.id.as_str().to_string(),
                filename: record.filename.clone(),
                kind: record.kind,
                version: record.version.clone(),
                wave: wave_number,
                duration_ms: elapsed_ms,
            });
        }
    }

    Ok(applied)
}
