//! Wire types for the serialized clustering result.
//!
//! The response is a mapping with exactly two keys, `uncleaned` and
//! `cleaned`, each holding a rows-outer/columns-inner array of cell results
//! in grid build order. Consumers address cells positionally, so both the
//! key set and the nesting order are a stable contract.

use serde::{Deserialize, Serialize};

/// Aggregate for one populated cell.
///
/// `count`, `lat` and `lng` are always present. `id` and `desc` appear only
/// for a single-point cell whose point carries a description; when absent
/// they are omitted from the JSON entirely rather than serialized as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSummary {
    pub count: usize,
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

/// One status grid on the wire: rows outer, columns inner, `None` rendering
/// as JSON `null` for a cell with no data.
pub type CellGrid = Vec<Vec<Option<CellSummary>>>;

/// The full clustering result. Field order here is serialization order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterResponse {
    pub uncleaned: CellGrid,
    pub cleaned: CellGrid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cell_serializes_as_null() {
        let grid: CellGrid = vec![vec![None]];
        let response = ClusterResponse { uncleaned: grid.clone(), cleaned: grid };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"uncleaned":[[null]],"cleaned":[[null]]}"#);
    }

    #[test]
    fn absent_identity_is_omitted_not_null() {
        let summary = CellSummary { count: 3, lat: 1.5, lng: 2.5, id: None, desc: None };
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, r#"{"count":3,"lat":1.5,"lng":2.5}"#);
    }

    #[test]
    fn present_identity_is_included() {
        let summary = CellSummary {
            count: 1,
            lat: -21.1,
            lng: 55.5,
            id: Some(17),
            desc: Some("wreck".to_string()),
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, r#"{"count":1,"lat":-21.1,"lng":55.5,"id":17,"desc":"wreck"}"#);
    }

    #[test]
    fn response_has_exactly_the_two_wire_keys() {
        let response = ClusterResponse { uncleaned: vec![], cleaned: vec![] };
        let value: serde_json::Value =
            serde_json::to_value(&response).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("uncleaned"));
        assert!(object.contains_key("cleaned"));
    }
}
