//! Round-trip a representative geometry through every WKT grammar variant.

use geocore::geo_model::{Coord, Geometry};
use geocore::wkt::{self, Dimension, WriteOptions};

#[test]
fn point_2d() {
    let geometry = wkt::from_str("POINT (1 2)").unwrap();
    assert_eq!(Geometry::Point(Coord::new_2d(1., 2.)), geometry);
    assert_eq!(
        "POINT (1 2)",
        wkt::to_string(&geometry, WriteOptions::default())
    );
}

#[test]
fn point_z() {
    let geometry = wkt::from_str("POINT Z (1 2 3)").unwrap();
    assert_eq!(Geometry::Point(Coord::new_3d(1., 2., 3.)), geometry);
    assert_eq!(
        "POINT Z (1 2 3)",
        wkt::to_string(&geometry, WriteOptions::default())
    );
}

#[test]
fn linestring_roundtrip() {
    let text = "LINESTRING (0 0, 1 1, 2 0)";
    let geometry = wkt::from_str(text).unwrap();
    assert_eq!(text, wkt::to_string(&geometry, WriteOptions::default()));
}

#[test]
fn polygon_with_hole() {
    let text = "POLYGON ((0 0, 10 0, 10 10, 0 10, 0 0), (2 2, 2 4, 4 4, 4 2, 2 2))";
    let geometry = wkt::from_str(text).unwrap();
    match &geometry {
        Geometry::Polygon(polygon) => {
            assert_eq!(5, polygon.exterior.len());
            assert_eq!(1, polygon.interiors.len());
        }
        other => panic!("expected a polygon, got {other:?}"),
    }
    assert_eq!(text, wkt::to_string(&geometry, WriteOptions::default()));
}

#[test]
fn empty_geometries_roundtrip() {
    for text in ["POINT EMPTY", "LINESTRING EMPTY", "POLYGON EMPTY"] {
        let parsed = wkt::from_str(text).unwrap();
        assert_eq!(text, wkt::to_string(&parsed, WriteOptions::default()));
    }
}

#[test]
fn dimension_override_drops_z() {
    let geometry = Geometry::Point(Coord::new_3d(1., 2., 3.));
    let options = WriteOptions {
        dimension: Dimension::TwoD,
    };
    assert_eq!("POINT (1 2)", wkt::to_string(&geometry, options));
}

#[test]
fn geometry_collection() {
    let text = "GEOMETRYCOLLECTION (POINT (0 0), LINESTRING (0 0, 1 1))";
    let geometry = wkt::from_str(text).unwrap();
    match geometry {
        Geometry::GeometryCollection(geometries) => assert_eq!(2, geometries.len()),
        other => panic!("expected a geometry collection, got {other:?}"),
    }
}

#[test]
fn rejects_garbage() {
    assert!(wkt::from_str("NOT WKT AT ALL").is_err());
    assert!(wkt::from_str("POINT (1 2").is_err());
    assert!(wkt::from_str("POINT (1 2) trailing").is_err());
}
