//! TopoJSON topology construction (quantize, extract, join, cut, deduplicate, delta-encode) and
//! the reader that resolves a topology back into geometries.
//!
//! ```
//! use geocore::geo_model::{Coord, Geometry};
//! use geocore::topojson::{Options, Topology};
//!
//! let a = Geometry::LineString(vec![
//!     Coord::new_2d(0., 0.),
//!     Coord::new_2d(5., 5.),
//!     Coord::new_2d(10., 10.),
//! ]);
//! let b = Geometry::LineString(vec![
//!     Coord::new_2d(10., 0.),
//!     Coord::new_2d(5., 5.),
//!     Coord::new_2d(0., 10.),
//! ]);
//! let topology = Topology::build(&[a, b], Options::default()).unwrap();
//! let json = topology.to_json().unwrap();
//! let roundtripped = Topology::from_json(&json).unwrap();
//! assert_eq!(2, roundtripped.geometries().unwrap().len());
//! ```

pub mod builder;
pub mod reader;

use crate::geo_model::Coord;

/// Options for [`Topology::build`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Options {
    /// The `(Q0, Q1)` quantization factors. Both must be powers of ten.
    pub quantization: (u32, u32),
}

impl Default for Options {
    fn default() -> Options {
        Options {
            quantization: (10_000, 10_000),
        }
    }
}

/// A signed reference into a topology's arc pool.
///
/// Non-negative indices are taken forward; `-i - 1` indices are taken from `arcs[i]` reversed.
pub type ArcRef = i64;

/// A geometry expressed as arc references (or literal positions for points) instead of literal
/// coordinate sequences.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ArcGeometry {
    Point(Coord),
    MultiPoint(Vec<Coord>),
    LineString(Vec<ArcRef>),
    MultiLineString(Vec<Vec<ArcRef>>),
    Polygon(Vec<Vec<ArcRef>>),
    MultiPolygon(Vec<Vec<Vec<ArcRef>>>),
    GeometryCollection(Vec<ArcGeometry>),
}

/// A named object within a topology.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Object {
    pub(crate) name: String,
    pub(crate) geometry: ArcGeometry,
    pub(crate) object_id: Option<String>,
}

/// The quantization transform applied to (or decoded from) a topology's arcs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Transform {
    pub(crate) scale: (f64, f64),
    pub(crate) translate: (f64, f64),
}

/// A topology: a set of named geometry objects sharing a deduplicated pool of arcs.
#[derive(Clone, Debug, PartialEq)]
pub struct Topology {
    pub(crate) objects: Vec<Object>,
    pub(crate) arcs: Vec<Vec<Coord>>,
    pub(crate) transform: Option<Transform>,
}

pub(crate) mod wire {
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;

    #[derive(Serialize, Deserialize, Debug)]
    pub(crate) struct TopologyDoc {
        #[serde(rename = "type")]
        pub(crate) kind: String,
        pub(crate) objects: BTreeMap<String, GeometryObjectDoc>,
        pub(crate) arcs: Vec<Vec<Vec<f64>>>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        pub(crate) transform: Option<TransformDoc>,
    }

    #[derive(Serialize, Deserialize, Debug, Clone, Copy)]
    pub(crate) struct TransformDoc {
        pub(crate) scale: [f64; 2],
        pub(crate) translate: [f64; 2],
    }

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(tag = "type")]
    pub(crate) enum GeometryObjectDoc {
        Point {
            coordinates: Vec<f64>,
            #[serde(skip_serializing_if = "Option::is_none", default)]
            id: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none", default)]
            properties: Option<serde_json::Map<String, serde_json::Value>>,
        },
        MultiPoint {
            coordinates: Vec<Vec<f64>>,
            #[serde(skip_serializing_if = "Option::is_none", default)]
            id: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none", default)]
            properties: Option<serde_json::Map<String, serde_json::Value>>,
        },
        LineString {
            arcs: Vec<i64>,
            #[serde(skip_serializing_if = "Option::is_none", default)]
            id: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none", default)]
            properties: Option<serde_json::Map<String, serde_json::Value>>,
        },
        MultiLineString {
            arcs: Vec<Vec<i64>>,
            #[serde(skip_serializing_if = "Option::is_none", default)]
            id: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none", default)]
            properties: Option<serde_json::Map<String, serde_json::Value>>,
        },
        Polygon {
            arcs: Vec<Vec<i64>>,
            #[serde(skip_serializing_if = "Option::is_none", default)]
            id: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none", default)]
            properties: Option<serde_json::Map<String, serde_json::Value>>,
        },
        MultiPolygon {
            arcs: Vec<Vec<Vec<i64>>>,
            #[serde(skip_serializing_if = "Option::is_none", default)]
            id: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none", default)]
            properties: Option<serde_json::Map<String, serde_json::Value>>,
        },
        GeometryCollection {
            geometries: Vec<GeometryObjectDoc>,
        },
    }
}
