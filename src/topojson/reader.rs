//! Parsing a TopoJSON document and resolving its arc references back into geometries.

use super::{wire, ArcGeometry, ArcRef, Object, Topology, Transform};
use crate::geo_model::{Coord, Geometry, Polygon};
use crate::{Error, Result};

/// Per-axis tolerance, in quantized units, for treating two positions as "the same point" when
/// chaining arcs or closing a ring.
const CHAIN_TOLERANCE: f64 = 1.0;

impl Topology {
    /// Parses a TopoJSON document.
    ///
    /// If `transform` is present, arc positions are decoded from their delta-encoded integer
    /// form; `Point`/`MultiPoint` coordinates are decoded (but not delta-encoded) the same way.
    pub fn from_json(json: &str) -> Result<Topology> {
        let doc: wire::TopologyDoc = serde_json::from_str(json)?;
        if doc.kind != "Topology" {
            return Err(Error::MalformedText {
                position: 0,
                message: format!("top-level type is {:?}, not \"Topology\"", doc.kind),
            });
        }
        let transform = doc.transform.map(|t| Transform {
            scale: (t.scale[0], t.scale[1]),
            translate: (t.translate[0], t.translate[1]),
        });

        let arcs = doc
            .arcs
            .into_iter()
            .map(|raw_arc| decode_arc(&raw_arc, transform.as_ref()))
            .collect();

        let objects = doc
            .objects
            .into_iter()
            .map(|(name, g)| {
                let (geometry, object_id) = doc_to_geometry(g, transform.as_ref());
                Object {
                    name,
                    geometry,
                    object_id,
                }
            })
            .collect();

        Ok(Topology {
            objects,
            arcs,
            transform,
        })
    }

    /// Serializes this topology back to a TopoJSON document.
    pub fn to_json(&self) -> Result<String> {
        let arcs = self
            .arcs
            .iter()
            .map(|arc| encode_arc(arc, self.transform.as_ref()))
            .collect();
        let objects = self
            .objects
            .iter()
            .map(|o| (o.name.clone(), geometry_to_doc(&o.geometry, o.object_id.clone())))
            .collect();
        let doc = wire::TopologyDoc {
            kind: "Topology".to_string(),
            objects,
            arcs,
            transform: self.transform.map(|t| wire::TransformDoc {
                scale: [t.scale.0, t.scale.1],
                translate: [t.translate.0, t.translate.1],
            }),
        };
        Ok(serde_json::to_string(&doc)?)
    }

    /// Resolves every object's arc references into literal geometries, in declaration order.
    pub fn geometries(&self) -> Result<Vec<Geometry>> {
        self.objects
            .iter()
            .map(|o| resolve_arc_geometry(&o.geometry, &self.arcs))
            .collect()
    }

    /// Like [`Topology::geometries`], but also returns each object's name and `id` (the
    /// `"OBJECTID"` of the source spec).
    pub fn named_geometries(&self) -> Result<Vec<(String, Option<String>, Geometry)>> {
        self.objects
            .iter()
            .map(|o| {
                let geometry = resolve_arc_geometry(&o.geometry, &self.arcs)?;
                Ok((o.name.clone(), o.object_id.clone(), geometry))
            })
            .collect()
    }
}

fn pos_vec(x: f64, y: f64, z: f64) -> Vec<f64> {
    if z != 0.0 {
        vec![x, y, z]
    } else {
        vec![x, y]
    }
}

fn encode_arc(arc: &[Coord], transform: Option<&Transform>) -> Vec<Vec<f64>> {
    let Some(t) = transform else {
        return arc.iter().map(|c| pos_vec(c.x, c.y, c.z)).collect();
    };
    let mut cursor = (0i64, 0i64);
    arc.iter()
        .enumerate()
        .map(|(i, c)| {
            let gx = ((c.x - t.translate.0) / t.scale.0).round() as i64;
            let gy = ((c.y - t.translate.1) / t.scale.1).round() as i64;
            let (ex, ey) = if i == 0 {
                (gx, gy)
            } else {
                (gx - cursor.0, gy - cursor.1)
            };
            cursor = (gx, gy);
            pos_vec(ex as f64, ey as f64, c.z)
        })
        .collect()
}

fn decode_arc(raw: &[Vec<f64>], transform: Option<&Transform>) -> Vec<Coord> {
    let mut cursor = (0f64, 0f64);
    raw.iter()
        .enumerate()
        .map(|(i, pos)| {
            let x = pos.first().copied().unwrap_or(0.0);
            let y = pos.get(1).copied().unwrap_or(0.0);
            let z = pos.get(2).copied().unwrap_or(0.0);
            let (abs_x, abs_y) = match transform {
                Some(t) => {
                    cursor = if i == 0 {
                        (x, y)
                    } else {
                        (cursor.0 + x, cursor.1 + y)
                    };
                    (cursor.0 * t.scale.0 + t.translate.0, cursor.1 * t.scale.1 + t.translate.1)
                }
                None => (x, y),
            };
            Coord {
                x: abs_x,
                y: abs_y,
                z,
            }
        })
        .collect()
}

fn decode_point_coord(p: &[f64], transform: Option<&Transform>) -> Coord {
    let x = p.first().copied().unwrap_or(0.0);
    let y = p.get(1).copied().unwrap_or(0.0);
    let z = p.get(2).copied().unwrap_or(0.0);
    match transform {
        Some(t) => Coord {
            x: x * t.scale.0 + t.translate.0,
            y: y * t.scale.1 + t.translate.1,
            z,
        },
        None => Coord { x, y, z },
    }
}

fn doc_to_geometry(
    doc: wire::GeometryObjectDoc,
    transform: Option<&Transform>,
) -> (ArcGeometry, Option<String>) {
    match doc {
        wire::GeometryObjectDoc::Point { coordinates, id, .. } => {
            (ArcGeometry::Point(decode_point_coord(&coordinates, transform)), id)
        }
        wire::GeometryObjectDoc::MultiPoint { coordinates, id, .. } => (
            ArcGeometry::MultiPoint(
                coordinates
                    .iter()
                    .map(|p| decode_point_coord(p, transform))
                    .collect(),
            ),
            id,
        ),
        wire::GeometryObjectDoc::LineString { arcs, id, .. } => {
            (ArcGeometry::LineString(arcs), id)
        }
        wire::GeometryObjectDoc::MultiLineString { arcs, id, .. } => {
            (ArcGeometry::MultiLineString(arcs), id)
        }
        wire::GeometryObjectDoc::Polygon { arcs, id, .. } => (ArcGeometry::Polygon(arcs), id),
        wire::GeometryObjectDoc::MultiPolygon { arcs, id, .. } => {
            (ArcGeometry::MultiPolygon(arcs), id)
        }
        wire::GeometryObjectDoc::GeometryCollection { geometries } => (
            ArcGeometry::GeometryCollection(
                geometries
                    .into_iter()
                    .map(|g| doc_to_geometry(g, transform).0)
                    .collect(),
            ),
            None,
        ),
    }
}

fn geometry_to_doc(g: &ArcGeometry, id: Option<String>) -> wire::GeometryObjectDoc {
    match g {
        ArcGeometry::Point(c) => wire::GeometryObjectDoc::Point {
            coordinates: pos_vec(c.x, c.y, c.z),
            id,
            properties: None,
        },
        ArcGeometry::MultiPoint(cs) => wire::GeometryObjectDoc::MultiPoint {
            coordinates: cs.iter().map(|c| pos_vec(c.x, c.y, c.z)).collect(),
            id,
            properties: None,
        },
        ArcGeometry::LineString(refs) => wire::GeometryObjectDoc::LineString {
            arcs: refs.clone(),
            id,
            properties: None,
        },
        ArcGeometry::MultiLineString(refs) => wire::GeometryObjectDoc::MultiLineString {
            arcs: refs.clone(),
            id,
            properties: None,
        },
        ArcGeometry::Polygon(refs) => wire::GeometryObjectDoc::Polygon {
            arcs: refs.clone(),
            id,
            properties: None,
        },
        ArcGeometry::MultiPolygon(refs) => wire::GeometryObjectDoc::MultiPolygon {
            arcs: refs.clone(),
            id,
            properties: None,
        },
        ArcGeometry::GeometryCollection(gs) => wire::GeometryObjectDoc::GeometryCollection {
            geometries: gs.iter().map(|g| geometry_to_doc(g, None)).collect(),
        },
    }
}

fn resolve_arc(r: ArcRef, arcs: &[Vec<Coord>]) -> Result<Vec<Coord>> {
    let (idx, reversed) = if r >= 0 {
        (r as usize, false)
    } else {
        ((-r - 1) as usize, true)
    };
    let arc = arcs.get(idx).ok_or_else(|| Error::MalformedText {
        position: 0,
        message: format!("arc index {idx} out of range"),
    })?;
    Ok(if reversed {
        arc.iter().rev().copied().collect()
    } else {
        arc.clone()
    })
}

fn close_enough(a: Coord, b: Coord) -> bool {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    if (dx > 0.0 || dy > 0.0) && dx <= CHAIN_TOLERANCE && dy <= CHAIN_TOLERANCE {
        log::warn!("tolerating a sub-unit seam of ({dx}, {dy}) while chaining arcs");
    }
    dx <= CHAIN_TOLERANCE && dy <= CHAIN_TOLERANCE
}

/// Concatenates the arcs named by `refs`, sharing each junction point once.
fn resolve_line(refs: &[ArcRef], arcs: &[Vec<Coord>]) -> Result<Vec<Coord>> {
    let mut coords: Vec<Coord> = Vec::new();
    for (i, &r) in refs.iter().enumerate() {
        let segment = resolve_arc(r, arcs)?;
        if i == 0 {
            coords.extend(segment);
            continue;
        }
        match (coords.last().copied(), segment.first().copied()) {
            (Some(last), Some(first)) if close_enough(last, first) => {
                coords.extend(segment.into_iter().skip(1));
            }
            _ => {
                return Err(Error::MalformedText {
                    position: 0,
                    message: "consecutive arc references do not chain".to_string(),
                })
            }
        }
    }
    Ok(coords)
}

fn resolve_ring(refs: &[ArcRef], arcs: &[Vec<Coord>]) -> Result<Vec<Coord>> {
    let mut coords = resolve_line(refs, arcs)?;
    let first = *coords.first().ok_or_else(|| Error::MalformedText {
        position: 0,
        message: "empty ring".to_string(),
    })?;
    let last = *coords.last().unwrap();
    if !close_enough(first, last) {
        return Err(Error::UnclosedRing {
            first: (first.x, first.y),
            last: (last.x, last.y),
        });
    }
    let n = coords.len();
    coords[n - 1] = first;
    Ok(coords)
}

fn resolve_polygon(rings: &[Vec<ArcRef>], arcs: &[Vec<Coord>]) -> Result<Polygon> {
    let mut iter = rings.iter();
    let exterior = match iter.next() {
        Some(refs) => resolve_ring(refs, arcs)?,
        None => Vec::new(),
    };
    let interiors = iter.map(|refs| resolve_ring(refs, arcs)).collect::<Result<Vec<_>>>()?;
    Ok(Polygon { exterior, interiors })
}

fn resolve_arc_geometry(g: &ArcGeometry, arcs: &[Vec<Coord>]) -> Result<Geometry> {
    match g {
        ArcGeometry::Point(c) => Ok(Geometry::Point(*c)),
        ArcGeometry::MultiPoint(cs) => Ok(Geometry::MultiPoint(cs.clone())),
        ArcGeometry::LineString(refs) => Ok(Geometry::LineString(resolve_line(refs, arcs)?)),
        ArcGeometry::MultiLineString(lines) => Ok(Geometry::MultiLineString(
            lines
                .iter()
                .map(|refs| resolve_line(refs, arcs))
                .collect::<Result<Vec<_>>>()?,
        )),
        ArcGeometry::Polygon(rings) => Ok(Geometry::Polygon(resolve_polygon(rings, arcs)?)),
        ArcGeometry::MultiPolygon(polys) => Ok(Geometry::MultiPolygon(
            polys
                .iter()
                .map(|rings| resolve_polygon(rings, arcs))
                .collect::<Result<Vec<_>>>()?,
        )),
        ArcGeometry::GeometryCollection(gs) => Ok(Geometry::GeometryCollection(
            gs.iter()
                .map(|g| resolve_arc_geometry(g, arcs))
                .collect::<Result<Vec<_>>>()?,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_model::Geometry;
    use crate::topojson::Options;

    #[test]
    fn round_trips_two_lines_sharing_a_junction() {
        let a = Geometry::LineString(vec![
            Coord::new_2d(0., 0.),
            Coord::new_2d(5., 5.),
            Coord::new_2d(10., 10.),
        ]);
        let b = Geometry::LineString(vec![
            Coord::new_2d(10., 0.),
            Coord::new_2d(5., 5.),
            Coord::new_2d(0., 10.),
        ]);
        let topology = Topology::build(
            &[a, b],
            Options {
                quantization: (10_000, 10_000),
            },
        )
        .unwrap();
        let json = topology.to_json().unwrap();
        let roundtripped = Topology::from_json(&json).unwrap();
        let geometries = roundtripped.geometries().unwrap();
        assert_eq!(2, geometries.len());
        match &geometries[0] {
            Geometry::LineString(coords) => {
                assert!((coords.first().unwrap().x - 0.).abs() < 1e-6);
                assert!((coords.last().unwrap().x - 10.).abs() < 1e-6);
            }
            other => panic!("expected a line string, got {other:?}"),
        }
    }

    #[test]
    fn rejects_top_level_type_mismatch() {
        let err = Topology::from_json(r#"{"type":"FeatureCollection","objects":{},"arcs":[]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedText { .. }));
    }
}
