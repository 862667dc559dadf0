mod common;

use std::io::Write;

use common::{fixtures_dir, network};
use farepath_lib::{load_fare_table, plan_on_graph, Error, RouteAlgorithm, RouteOutcome};
use tempfile::NamedTempFile;

#[test]
fn fixture_table_loads_with_names_and_ids() {
    let graph = load_fare_table(&fixtures_dir().join("fares.json"), network()).unwrap();
    assert_eq!(graph.node_count(), network().len());
    assert_eq!(graph.edge_count(), 6);

    let pune = network().id_by_name("Pune").unwrap();
    let kolkata = network().id_by_name("Kolkata").unwrap();
    let discount = graph.edge(pune, kolkata).expect("numeric ids resolved");
    assert_eq!(discount.cost, -150);
    assert_eq!(discount.distance, 1614.0);

    let mumbai = network().id_by_name("Mumbai").unwrap();
    let filled = graph.edge(mumbai, pune).unwrap();
    assert!(filled.distance > 100.0 && filled.distance < 150.0);
}

#[test]
fn fixture_table_plans_through_the_discount() {
    let graph = load_fare_table(&fixtures_dir().join("fares.json"), network()).unwrap();
    let mumbai = network().id_by_name("Mumbai").unwrap();
    let pune = network().id_by_name("Pune").unwrap();
    let kolkata = network().id_by_name("Kolkata").unwrap();

    let plan = plan_on_graph(graph, mumbai, kolkata, RouteAlgorithm::Auto, 100).unwrap();
    assert_eq!(
        plan.outcome,
        RouteOutcome::Cheapest {
            cost: 750,
            path: vec![mumbai, pune, kolkata]
        }
    );
    assert_eq!(plan.ranked.len(), 4);
}

#[test]
fn cycle_table_has_no_finite_cheapest() {
    let graph = load_fare_table(&fixtures_dir().join("cycle_fares.json"), network()).unwrap();
    let delhi = network().id_by_name("Delhi").unwrap();
    let patna = network().id_by_name("Patna").unwrap();

    let plan = plan_on_graph(graph, delhi, patna, RouteAlgorithm::BellmanFord, 100).unwrap();
    assert!(plan.no_finite_cheapest());
}

#[test]
fn duplicate_rows_keep_the_first_fare() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"[{{"from": 0, "to": 1, "cost": 10}}, {{"from": 0, "to": 1, "cost": 99}}]"#
    )
    .unwrap();

    let graph = load_fare_table(file.path(), network()).unwrap();
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edge(0, 1).map(|edge| edge.cost), Some(10));
}

#[test]
fn unknown_names_and_bad_json_are_errors() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"[{{"from": "Atlantis", "to": 1, "cost": 10}}]"#).unwrap();
    let error = load_fare_table(file.path(), network()).unwrap_err();
    assert!(matches!(error, Error::UnknownLocation { .. }));

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "not json").unwrap();
    let error = load_fare_table(file.path(), network()).unwrap_err();
    assert!(matches!(error, Error::Json(_)));

    let error = load_fare_table(&fixtures_dir().join("missing.json"), network()).unwrap_err();
    assert!(matches!(error, Error::Io(_)));
}
