//! Wave scheduler: partition runnable records into ordered execution waves.

use crate::error::{CoreError, CoreResult};
use crate::graph::MigrationGraph;
use crate::migration_id::MigrationId;
use std::collections::HashSet;

/// Compute the ordered waves for a fact graph and assign wave numbers.
///
/// Wave 1 holds every runnable record whose dependencies are all
/// non-runnable (vacuously true for none); wave k+1 holds the runnable
/// records whose every dependency is either non-runnable or scheduled in a
/// wave <= k. Iterates to true fixpoint; runnable records left unscheduled
/// when the frontier empties indicate a dependency cycle and are reported as
/// [`CoreError::CircularDependency`], never silently truncated.
///
/// Within a wave, membership is deterministic and ordered lexicographically
/// by id. Calling this again on the same graph reassigns identical waves.
pub fn plan_waves(graph: &mut MigrationGraph) -> CoreResult<Vec<Vec<MigrationId>>> {
    let runnable = graph.runnable_set();

    let mut waves: Vec<Vec<MigrationId>> = Vec::new();
    let mut scheduled: HashSet<MigrationId> = HashSet::new();
    // BTreeSet iteration keeps remaining (and thus each wave) sorted by id.
    let mut remaining: Vec<MigrationId> = runnable.iter().cloned().collect();

    while !remaining.is_empty() {
        let frontier: Vec<MigrationId> = remaining
            .iter()
            .filter(|id| {
                graph
                    .dependencies(id)
                    .iter()
                    .all(|dep| !runnable.contains(dep) || scheduled.contains(dep))
            })
            .cloned()
            .collect();

        if frontier.is_empty() {
            // No progress with runnable records left: cycle among them.
            let stuck = remaining
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(CoreError::CircularDependency { cycle: stuck });
        }

        let wave_number = waves.len() + 1;
        for id in &frontier {
            graph.assign_wave(id, wave_number);
            scheduled.insert(id.clone());
        }
        remaining.retain(|id| !scheduled.contains(id));

        log::debug!("wave {}: {} migration(s)", wave_number, frontier.len());
        waves.push(frontier);
    }

    Ok(waves)
}

#[cfg(test)]
#[path = "schedule_test.rs"]
mod tests;
