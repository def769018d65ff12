//! End-to-end tests of the clustering pipeline: point ingestion through
//! serialized response bytes.

use geocluster_core::{cluster, ClusterParams, GpsBounds, Point, PointStore};

fn island_store() -> PointStore {
    // A handful of reports scattered over a Réunion-like viewport, mixed
    // statuses, one with a description.
    PointStore::new(vec![
        Point::from_gps(101, -21.05, 55.25, false, Some("tyre pile".to_string())),
        Point::from_gps(102, -21.06, 55.26, false, None),
        Point::from_gps(103, -21.07, 55.27, false, None),
        Point::from_gps(104, -21.30, 55.70, true, None),
        Point::from_gps(105, -21.31, 55.71, true, None),
        Point::from_gps(106, -21.12, 55.53, false, None),
        // Far outside the viewport; must never appear.
        Point::from_gps(107, 48.85, 2.35, false, None),
    ])
}

fn island_params() -> ClusterParams {
    ClusterParams {
        bounds: GpsBounds { north: -21.0, south: -21.4, east: 55.8, west: 55.2 },
        excluded: (-21.12, 55.53),
        width: 6,
        height: 4,
        clusterize: true,
    }
}

#[test]
fn pipeline_is_byte_identical_across_runs() {
    let store = island_store();
    let params = island_params();

    let first = serde_json::to_string(&cluster(&store, &params)).unwrap();
    let second = serde_json::to_string(&cluster(&store, &params)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn every_surviving_point_is_counted_exactly_once() {
    let store = island_store();
    let response = cluster(&store, &island_params());

    let total: usize = response
        .uncleaned
        .iter()
        .chain(response.cleaned.iter())
        .flatten()
        .filter_map(|c| c.as_ref())
        .map(|c| c.count)
        .sum();

    // Seven points minus one excluded minus one outside the viewport.
    assert_eq!(total, 5);
}

#[test]
fn statuses_split_across_the_two_wire_keys() {
    let store = island_store();
    let response = cluster(&store, &island_params());

    let uncleaned: usize = response
        .uncleaned
        .iter()
        .flatten()
        .filter_map(|c| c.as_ref())
        .map(|c| c.count)
        .sum();
    let cleaned: usize = response
        .cleaned
        .iter()
        .flatten()
        .filter_map(|c| c.as_ref())
        .map(|c| c.count)
        .sum();

    // Points 101-103 survive as uncleaned (106 is excluded, 107 dropped);
    // 104 and 105 were ingested with disappeared = true.
    assert_eq!(uncleaned, 3);
    assert_eq!(cleaned, 2);
}

#[test]
fn grids_have_the_requested_dimensions() {
    let store = island_store();
    let response = cluster(&store, &island_params());

    for grid in [&response.uncleaned, &response.cleaned] {
        assert_eq!(grid.len(), 4);
        assert!(grid.iter().all(|row| row.len() == 6));
    }
}

#[test]
fn empty_store_keeps_the_response_shape() {
    let response = cluster(&PointStore::default(), &island_params());

    let json: serde_json::Value = serde_json::to_value(&response).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 2);

    for key in ["uncleaned", "cleaned"] {
        let rows = object[key].as_array().unwrap();
        assert_eq!(rows.len(), 4);
        for row in rows {
            let cells = row.as_array().unwrap();
            assert_eq!(cells.len(), 6);
            assert!(cells.iter().all(|c| c.is_null()));
        }
    }
}

#[test]
fn description_echo_survives_serialization() {
    let store = island_store();
    let mut params = island_params();
    // Shrink the viewport to isolate point 101 in its own cell.
    params.bounds = GpsBounds { north: -21.04, south: -21.055, east: 55.255, west: 55.245 };
    params.width = 1;
    params.height = 1;

    let json: serde_json::Value = serde_json::to_value(&cluster(&store, &params)).unwrap();
    let cell = &json["uncleaned"][0][0];
    assert_eq!(cell["count"], 1);
    assert_eq!(cell["id"], 101);
    assert_eq!(cell["desc"], "tyre pile");
}
