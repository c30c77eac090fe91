//! Build topologies from shared geometries and check that arcs are actually deduplicated and
//! that the wire format round-trips.

use geocore::geo_model::{Coord, Geometry};
use geocore::topojson::{Options, Topology};
use geocore::Error;

fn line(coords: &[(f64, f64)]) -> Geometry {
    Geometry::LineString(coords.iter().map(|&(x, y)| Coord::new_2d(x, y)).collect())
}

fn ring(coords: &[(f64, f64)]) -> Vec<Coord> {
    coords.iter().map(|&(x, y)| Coord::new_2d(x, y)).collect()
}

/// Parses the `"arcs":[...]` top-level array out of a topology's wire JSON and returns how many
/// arcs it holds, without depending on any crate-internal field.
fn arc_count(json: &str) -> usize {
    let doc: serde_json::Value = serde_json::from_str(json).unwrap();
    doc["arcs"].as_array().unwrap().len()
}

#[test]
fn two_lines_sharing_a_segment_share_an_arc() {
    // Both lines run through (5, 5); the shared interior segment should become one arc that
    // each line references.
    let a = line(&[(0., 0.), (5., 5.), (10., 10.)]);
    let b = line(&[(10., 0.), (5., 5.), (0., 10.)]);

    let topology = Topology::build(&[a, b], Options::default()).unwrap();
    let json = topology.to_json().unwrap();
    let count = arc_count(&json);
    assert!(count <= 5, "expected shared junction arcs, got {count} arcs");

    let geometries = topology.geometries().unwrap();
    assert_eq!(2, geometries.len());
}

#[test]
fn wire_format_roundtrips() {
    let a = line(&[(0., 0.), (5., 5.), (10., 10.)]);
    let b = line(&[(10., 0.), (5., 5.), (0., 10.)]);
    let topology = Topology::build(&[a.clone(), b.clone()], Options::default()).unwrap();

    let json = topology.to_json().unwrap();
    assert!(json.contains("\"type\":\"Topology\""));

    let roundtripped = Topology::from_json(&json).unwrap();
    let geometries = roundtripped.geometries().unwrap();
    assert_eq!(2, geometries.len());

    match &geometries[0] {
        Geometry::LineString(coords) => {
            assert_eq!(3, coords.len());
            assert!((coords[0].x - 0.).abs() < 1e-6);
            assert!((coords[0].y - 0.).abs() < 1e-6);
        }
        other => panic!("expected a line string, got {other:?}"),
    }
}

#[test]
fn adjacent_squares_share_their_border() {
    let left = Geometry::Polygon(geocore::geo_model::Polygon {
        exterior: ring(&[
            (0., 0.),
            (1., 0.),
            (1., 1.),
            (0., 1.),
            (0., 0.),
        ]),
        interiors: Vec::new(),
    });
    let right = Geometry::Polygon(geocore::geo_model::Polygon {
        exterior: ring(&[
            (1., 0.),
            (2., 0.),
            (2., 1.),
            (1., 1.),
            (1., 0.),
        ]),
        interiors: Vec::new(),
    });

    let topology = Topology::build(&[left, right], Options::default()).unwrap();
    // The shared edge (1,0)-(1,1) should be a single arc referenced (possibly reversed) by
    // both polygons, so the arc pool should hold fewer arcs than the 8 raw ring segments.
    let json = topology.to_json().unwrap();
    assert!(arc_count(&json) < 8);

    let geometries = topology.geometries().unwrap();
    assert_eq!(2, geometries.len());
    for geometry in &geometries {
        match geometry {
            Geometry::Polygon(polygon) => {
                assert_eq!(polygon.exterior.first(), polygon.exterior.last());
            }
            other => panic!("expected a polygon, got {other:?}"),
        }
    }
}

#[test]
fn rejects_non_power_of_ten_quantization() {
    let a = line(&[(0., 0.), (1., 1.)]);
    let err = Topology::build(
        &[a],
        Options {
            quantization: (999, 10_000),
        },
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidQuantization(_)));
}

#[test]
fn rejects_malformed_wire_json() {
    assert!(Topology::from_json("not json").is_err());
    assert!(Topology::from_json("{\"type\": \"FeatureCollection\"}").is_err());
}
