use super::*;
use crate::artifact::MigrationKind;
use crate::graph::tests::record;

fn ids(names: &[&str]) -> Vec<MigrationId> {
    names.iter().map(|n| MigrationId::new(*n)).collect()
}

#[test]
fn test_single_wave_without_dependencies() {
    let mut graph = MigrationGraph::build(vec![
        record("a", MigrationKind::Versioned, &[], true),
        record("b", MigrationKind::Versioned, &[], true),
    ])
    .unwrap();

    let waves = plan_waves(&mut graph).unwrap();
    assert_eq!(waves, vec![ids(&["a", "b"])]);
}

#[test]
fn test_diamond_scenario() {
    // A(Repeatable, {}), B(Versioned, {}), C(Versioned, {A,B}),
    // D(Versioned, {B}), all should_run -> waves {A,B}, {C,D}.
    let mut graph = MigrationGraph::build(vec![
        record("a", MigrationKind::Repeatable, &[], true),
        record("b", MigrationKind::Versioned, &[], true),
        record("c", MigrationKind::Versioned, &["a", "b"], true),
        record("d", MigrationKind::Versioned, &["b"], true),
    ])
    .unwrap();

    let waves = plan_waves(&mut graph).unwrap();
    assert_eq!(waves, vec![ids(&["a", "b"]), ids(&["c", "d"])]);
}

#[test]
fn test_cascaded_repeatable_scheduled_before_dependent() {
    // A(Repeatable, should_run=false, no deps), B(Versioned, should_run=true,
    // depends on A) -> runnable(A) cascades from B; waves {A}, {B}.
    let mut graph = MigrationGraph::build(vec![
        record("a", MigrationKind::Repeatable, &[], false),
        record("b", MigrationKind::Versioned, &["a"], true),
    ])
    .unwrap();

    let waves = plan_waves(&mut graph).unwrap();
    assert_eq!(waves, vec![ids(&["a"]), ids(&["b"])]);
}

#[test]
fn test_non_runnable_dependency_is_skipped_over() {
    // b depends on a, but a already ran: b is eligible for wave 1.
    let mut graph = MigrationGraph::build(vec![
        record("a", MigrationKind::Versioned, &[], false),
        record("b", MigrationKind::Versioned, &["a"], true),
    ])
    .unwrap();

    let waves = plan_waves(&mut graph).unwrap();
    assert_eq!(waves, vec![ids(&["b"])]);
}

#[test]
fn test_deep_chain_gets_one_wave_per_link() {
    // A 25-deep dependency chain must schedule completely, one wave per
    // link; the loop has no iteration limit to hit.
    let mut records = vec![record("m00", MigrationKind::Versioned, &[], true)];
    for i in 1..25 {
        let prev = format!("m{:02}", i - 1);
        let name = format!("m{:02}", i);
        records.push(record(&name, MigrationKind::Versioned, &[prev.as_str()], true));
    }

    let mut graph = MigrationGraph::build(records).unwrap();
    let waves = plan_waves(&mut graph).unwrap();

    assert_eq!(waves.len(), 25);
    assert!(waves.iter().all(|w| w.len() == 1));
}

#[test]
fn test_wave_numbers_assigned_to_records() {
    let mut graph = MigrationGraph::build(vec![
        record("a", MigrationKind::Versioned, &[], true),
        record("b", MigrationKind::Versioned, &["a"], true),
        record("c", MigrationKind::Versioned, &[], false),
    ])
    .unwrap();

    plan_waves(&mut graph).unwrap();

    assert_eq!(graph.record(&MigrationId::new("a")).unwrap().wave, Some(1));
    assert_eq!(graph.record(&MigrationId::new("b")).unwrap().wave, Some(2));
    // Not runnable, never waved.
    assert_eq!(graph.record(&MigrationId::new("c")).unwrap().wave, None);
}

#[test]
fn test_plan_waves_is_idempotent() {
    let mut graph = MigrationGraph::build(vec![
        record("a", MigrationKind::Versioned, &[], true),
        record("b", MigrationKind::Versioned, &["a"], true),
    ])
    .unwrap();

    let first = plan_waves(&mut graph).unwrap();
    let second = plan_waves(&mut graph).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_wave_ordering_property() {
    // For every runnable record, every runnable dependency sits in a
    // strictly earlier wave.
    let mut graph = MigrationGraph::build(vec![
        record("base", MigrationKind::Versioned, &[], true),
        record("left", MigrationKind::Versioned, &["base"], true),
        record("right", MigrationKind::Repeatable, &["base"], false),
        record("top", MigrationKind::Versioned, &["left", "right"], true),
    ])
    .unwrap();

    plan_waves(&mut graph).unwrap();
    let runnable = graph.runnable_set();

    for id in &runnable {
        let wave = graph.record(id).unwrap().wave.unwrap();
        for dep in graph.dependencies(id) {
            if runnable.contains(&dep) {
                let dep_wave = graph.record(&dep).unwrap().wave.unwrap();
                assert!(dep_wave < wave, "{dep} must precede {id}");
            }
        }
    }
}

#[test]
fn test_every_runnable_record_is_waved_exactly_once() {
    let mut graph = MigrationGraph::build(vec![
        record("a", MigrationKind::Versioned, &[], true),
        record("b", MigrationKind::Versioned, &["a"], true),
        record("r", MigrationKind::Repeatable, &["b"], false),
    ])
    .unwrap();

    let waves = plan_waves(&mut graph).unwrap();
    let runnable = graph.runnable_set();

    let waved: Vec<&MigrationId> = waves.iter().flatten().collect();
    assert_eq!(waved.len(), runnable.len());
    let unique: std::collections::HashSet<_> = waved.iter().collect();
    assert_eq!(unique.len(), waved.len());
}
