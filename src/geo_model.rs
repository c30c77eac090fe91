//! Geometry model shared by the WKT converter and the TopoJSON topology builder.
//!
//! `geo-types` is the idiomatic choice for a 2D geometry model (re-exported below as `Coord2`/
//! `Geometry2` and friends), but its `Coord` carries only `x`/`y`. Both the WKT `Z`/`ZM` grammar
//! variants and TopoJSON's "Z is preserved as-is" rule need a z ordinate alongside every x/y, so
//! the types actually passed between `wkt` and `topojson` are the ones below, which mirror
//! `geo-types`'s shape with an added `z`. A `geo-types` geometry is always reachable via
//! [`Geometry::into_geo_types`] for callers that only care about the planar projection.

pub use geo_types::{
    Coord as Coord2, Geometry as Geometry2, LineString as LineString2,
    MultiLineString as MultiLineString2, MultiPoint as MultiPoint2,
    MultiPolygon as MultiPolygon2, Point as Point2, Polygon as Polygon2,
};

/// A position with an explicit z ordinate.
///
/// `z` is `0.0` for geometries parsed or built without a Z dimension; there is no separate
/// "has z" flag carried per-coordinate, matching the WKT grammar's per-geometry (not
/// per-coordinate) dimensionality.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coord {
    /// The x ordinate.
    pub x: f64,
    /// The y ordinate.
    pub y: f64,
    /// The z ordinate, `0.0` if the geometry has no elevation.
    pub z: f64,
}

impl Coord {
    /// Creates a new two-dimensional coordinate.
    pub fn new_2d(x: f64, y: f64) -> Coord {
        Coord { x, y, z: 0. }
    }

    /// Creates a new three-dimensional coordinate.
    pub fn new_3d(x: f64, y: f64, z: f64) -> Coord {
        Coord { x, y, z }
    }

    /// Converts this coordinate into a `geo-types` coordinate, dropping z.
    pub fn into_2d(self) -> Coord2<f64> {
        Coord2 {
            x: self.x,
            y: self.y,
        }
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Coord {
        Coord::new_2d(x, y)
    }
}

impl From<(f64, f64, f64)> for Coord {
    fn from((x, y, z): (f64, f64, f64)) -> Coord {
        Coord::new_3d(x, y, z)
    }
}

/// A polygon: an exterior ring followed by zero or more interior rings (holes).
///
/// Rings are closed coordinate sequences, first position equal to last.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    /// The shell of the polygon.
    pub exterior: Vec<Coord>,
    /// The polygon's holes, each a closed ring wholly inside the exterior.
    pub interiors: Vec<Vec<Coord>>,
}

/// A geometry, possibly three-dimensional.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// A single position.
    Point(Coord),
    /// An open or closed sequence of positions.
    LineString(Vec<Coord>),
    /// A shell plus holes.
    Polygon(Polygon),
    /// A set of positions.
    MultiPoint(Vec<Coord>),
    /// A set of line strings.
    MultiLineString(Vec<Vec<Coord>>),
    /// A set of polygons.
    MultiPolygon(Vec<Polygon>),
    /// A heterogeneous set of geometries.
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    /// Converts this geometry into its `geo-types` planar projection, dropping z.
    pub fn into_geo_types(self) -> Geometry2<f64> {
        match self {
            Geometry::Point(c) => Geometry2::Point(Point2::new(c.x, c.y)),
            Geometry::LineString(coords) => {
                Geometry2::LineString(LineString2::new(coords.into_iter().map(Coord::into_2d).collect()))
            }
            Geometry::Polygon(polygon) => Geometry2::Polygon(polygon.into_geo_types()),
            Geometry::MultiPoint(coords) => Geometry2::MultiPoint(MultiPoint2::new(
                coords.into_iter().map(|c| Point2::new(c.x, c.y)).collect(),
            )),
            Geometry::MultiLineString(lines) => Geometry2::MultiLineString(MultiLineString2::new(
                lines
                    .into_iter()
                    .map(|coords| LineString2::new(coords.into_iter().map(Coord::into_2d).collect()))
                    .collect(),
            )),
            Geometry::MultiPolygon(polygons) => Geometry2::MultiPolygon(MultiPolygon2::new(
                polygons.into_iter().map(Polygon::into_geo_types).collect(),
            )),
            Geometry::GeometryCollection(geometries) => {
                Geometry2::GeometryCollection(geo_types::GeometryCollection::new_from(
                    geometries.into_iter().map(Geometry::into_geo_types).collect(),
                ))
            }
        }
    }

    /// Returns true if this geometry (or, for a collection, any member) carries a nonzero z.
    pub fn has_z(&self) -> bool {
        match self {
            Geometry::Point(c) => c.z != 0.,
            Geometry::LineString(coords) | Geometry::MultiPoint(coords) => {
                coords.iter().any(|c| c.z != 0.)
            }
            Geometry::Polygon(polygon) => polygon.has_z(),
            Geometry::MultiLineString(lines) => {
                lines.iter().flatten().any(|c| c.z != 0.)
            }
            Geometry::MultiPolygon(polygons) => polygons.iter().any(Polygon::has_z),
            Geometry::GeometryCollection(geometries) => geometries.iter().any(Geometry::has_z),
        }
    }
}

impl Polygon {
    fn into_geo_types(self) -> Polygon2<f64> {
        Polygon2::new(
            LineString2::new(self.exterior.into_iter().map(Coord::into_2d).collect()),
            self.interiors
                .into_iter()
                .map(|ring| LineString2::new(ring.into_iter().map(Coord::into_2d).collect()))
                .collect(),
        )
    }

    fn has_z(&self) -> bool {
        self.exterior.iter().any(|c| c.z != 0.)
            || self.interiors.iter().flatten().any(|c| c.z != 0.)
    }
}
