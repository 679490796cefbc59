//! Migration fact graph: dependency edges plus derived runnability.

use crate::error::{CoreError, CoreResult};
use crate::migration::MigrationRecord;
use crate::migration_id::MigrationId;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// The full record set of one migration run plus its dependency edges.
///
/// Constructed per `migrate` invocation and discarded afterwards; there is no
/// process-wide fact store. Edges point from a dependency to its dependents,
/// so topological order yields dependencies first.
#[derive(Debug)]
pub struct MigrationGraph {
    graph: DiGraph<MigrationId, ()>,
    node_map: HashMap<MigrationId, NodeIndex>,
    records: BTreeMap<MigrationId, MigrationRecord>,
}

impl MigrationGraph {
    /// Build the graph from loaded records.
    ///
    /// Dependencies must already be validated
    /// ([`validate_dependencies`](crate::loader::validate_dependencies));
    /// an unknown edge target here is still rejected. Any dependency cycle is
    /// reported as [`CoreError::CircularDependency`].
    pub fn build(records: Vec<MigrationRecord>) -> CoreResult<Self> {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();
        let mut record_map = BTreeMap::new();

        for record in records {
            let idx = graph.add_node(record.id.clone());
            node_map.insert(record.id.clone(), idx);
            record_map.insert(record.id.clone(), record);
        }

        for record in record_map.values() {
            let to = node_map[&record.id];
            for dep in &record.dependencies {
                let from = *node_map.get(dep).ok_or_else(|| CoreError::UnknownMigration {
                    id: dep.as_str().to_string(),
                })?;
                graph.add_edge(from, to, ());
            }
        }

        let built = Self {
            graph,
            node_map,
            records: record_map,
        };
        built.validate()?;
        Ok(built)
    }

    /// Reject dependency cycles up front so the runnability fixpoint and the
    /// wave loop always operate on a DAG.
    fn validate(&self) -> CoreResult<()> {
        match toposort(&self.graph, None) {
            Ok(_) => Ok(()),
            Err(cycle) => Err(CoreError::CircularDependency {
                cycle: self.find_cycle_path(cycle.node_id()),
            }),
        }
    }

    /// Render a cycle path starting from a node for error reporting.
    fn find_cycle_path(&self, start: NodeIndex) -> String {
        let mut path: Vec<String> = vec![self.graph[start].to_string()];
        let mut current = start;
        let mut visited = HashSet::new();
        visited.insert(current);

        while let Some(edge) = self.graph.edges(current).next() {
            let target = edge.target();
            path.push(self.graph[target].to_string());

            if target == start || visited.contains(&target) {
                break;
            }

            visited.insert(target);
            current = target;
        }

        path.join(" -> ")
    }

    /// Look up a record by id.
    pub fn record(&self, id: &MigrationId) -> Option<&MigrationRecord> {
        self.records.get(id)
    }

    /// All records, ordered by id.
    pub fn records(&self) -> impl Iterator<Item = &MigrationRecord> {
        self.records.values()
    }

    /// Number of records in the graph.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the graph holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `directDependency(id, d)`: ids this record declares a dependency on.
    pub fn dependencies(&self, id: &MigrationId) -> Vec<MigrationId> {
        self.neighbors(id, petgraph::Direction::Incoming)
    }

    /// Records that declare a dependency on `id`.
    pub fn dependents(&self, id: &MigrationId) -> Vec<MigrationId> {
        self.neighbors(id, petgraph::Direction::Outgoing)
    }

    fn neighbors(&self, id: &MigrationId, direction: petgraph::Direction) -> Vec<MigrationId> {
        if let Some(&idx) = self.node_map.get(id) {
            self.graph
                .edges_directed(idx, direction)
                .map(|e| match direction {
                    petgraph::Direction::Incoming => self.graph[e.source()].clone(),
                    petgraph::Direction::Outgoing => self.graph[e.target()].clone(),
                })
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Derive the set of records that must (re)apply in this run.
    ///
    /// Seeded with every record whose `should_run` flag is set, then iterated
    /// to fixpoint: an unchanged repeatable record becomes runnable when any
    /// neighbor it shares an edge with is runnable. A runnable dependency
    /// means the repeatable must be re-applied on top of it; a runnable
    /// dependent means the repeatable must be applied (and current) before
    /// the dependent runs. Propagation is monotone, so it stabilizes after at
    /// most one pass per record; cycles were rejected at build time.
    pub fn runnable_set(&self) -> BTreeSet<MigrationId> {
        let mut runnable: BTreeSet<MigrationId> = self
            .records
            .values()
            .filter(|r| r.should_run)
            .map(|r| r.id.clone())
            .collect();

        loop {
            let mut changed = false;

            for record in self.records.values() {
                if !record.kind.is_repeatable() || runnable.contains(&record.id) {
                    continue;
                }

                let cascades = self
                    .dependencies(&record.id)
                    .iter()
                    .chain(self.dependents(&record.id).iter())
                    .any(|n| runnable.contains(n));

                if cascades {
                    log::debug!("repeatable {} cascades to runnable", record.id);
                    runnable.insert(record.id.clone());
                    changed = true;
                }
            }

            if !changed {
                break;
            }
        }

        runnable
    }

    /// Record the wave assignment computed by the scheduler.
    pub(crate) fn assign_wave(&mut self, id: &MigrationId, wave: usize) {
        if let Some(record) = self.records.get_mut(id) {
            record.wave = Some(wave);
        }
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
pub(crate) mod tests;
