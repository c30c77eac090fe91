//! The quantize -> extract -> join -> cut -> dedup pipeline that turns a geometry set into a
//! [`Topology`](super::Topology).

use super::{ArcGeometry, ArcRef, Object, Options, Topology, Transform};
use crate::geo_model::{Coord, Geometry, Polygon};
use crate::{Error, Result};
use std::collections::{HashMap, HashSet};

impl Topology {
    /// Builds a topology from a set of geometries, sharing coordinate sequences as arcs.
    ///
    /// `options.quantization` must be a pair of powers of ten greater than one, matching the
    /// source's `(Q0, Q1)` convention; anything else is rejected with
    /// [`Error::InvalidQuantization`].
    pub fn build(geometries: &[Geometry], options: Options) -> Result<Topology> {
        let (q0, q1) = options.quantization;
        if !is_valid_quantization(q0) || !is_valid_quantization(q1) {
            return Err(Error::InvalidQuantization((q0, q1)));
        }
        let bbox = compute_bbox(geometries);
        let quantizer = Quantizer::new(bbox, q0, q1);
        let quantized: Vec<Geometry> = geometries
            .iter()
            .map(|g| quantize_geometry(g, &quantizer))
            .collect();

        let Extracted {
            mut coords,
            lines,
            rings,
            geoms,
        } = extract(&quantized);

        let junctions = join(&coords, &lines, &rings);

        let line_pieces: Vec<Vec<Piece>> = lines
            .iter()
            .map(|&(first, last)| cut_line(&coords, first, last, &junctions))
            .collect();
        let ring_pieces: Vec<Vec<Piece>> = rings
            .iter()
            .map(|&(first, last)| cut_ring(&mut coords, first, last, &junctions))
            .collect();

        let dedup_result = dedup(&coords, &line_pieces, &ring_pieces);

        let objects = geoms
            .iter()
            .enumerate()
            .map(|(i, g)| Object {
                name: format!("object{}", i + 1),
                geometry: resolve_geom(g, &dedup_result.line_refs, &dedup_result.ring_refs),
                object_id: None,
            })
            .collect();

        let transform = Transform {
            scale: (1.0 / quantizer.scale.0, 1.0 / quantizer.scale.1),
            translate: (-quantizer.translate.0, -quantizer.translate.1),
        };

        Ok(Topology {
            objects,
            arcs: dedup_result.arcs,
            transform: Some(transform),
        })
    }
}

fn is_valid_quantization(q: u32) -> bool {
    if q <= 1 {
        return false;
    }
    let mut n = q;
    while n % 10 == 0 {
        n /= 10;
    }
    n == 1
}

struct Quantizer {
    translate: (f64, f64),
    scale: (f64, f64),
}

impl Quantizer {
    fn new(bbox: (f64, f64, f64, f64), q0: u32, q1: u32) -> Quantizer {
        let (min_x, max_x, min_y, max_y) = bbox;
        let q0 = q0 as f64;
        let q1 = q1 as f64;
        let scale_x = if max_x > min_x {
            ((q1 - 1.0) / (max_x - min_x)) * (q0 / q1)
        } else {
            1.0
        };
        let scale_y = if max_y > min_y {
            ((q1 - 1.0) / (max_y - min_y)) * (q0 / q1)
        } else {
            1.0
        };
        Quantizer {
            translate: (-min_x, -min_y),
            scale: (scale_x, scale_y),
        }
    }
}

fn quantize_coord(c: Coord, q: &Quantizer) -> Coord {
    Coord {
        x: ((c.x + q.translate.0) * q.scale.0).round(),
        y: ((c.y + q.translate.1) * q.scale.1).round(),
        z: c.z,
    }
}

fn quantize_geometry(g: &Geometry, q: &Quantizer) -> Geometry {
    match g {
        Geometry::Point(c) => Geometry::Point(quantize_coord(*c, q)),
        Geometry::MultiPoint(cs) => {
            Geometry::MultiPoint(cs.iter().map(|c| quantize_coord(*c, q)).collect())
        }
        Geometry::LineString(cs) => {
            Geometry::LineString(cs.iter().map(|c| quantize_coord(*c, q)).collect())
        }
        Geometry::Polygon(p) => Geometry::Polygon(quantize_polygon(p, q)),
        Geometry::MultiLineString(ls) => Geometry::MultiLineString(
            ls.iter()
                .map(|line| line.iter().map(|c| quantize_coord(*c, q)).collect())
                .collect(),
        ),
        Geometry::MultiPolygon(ps) => {
            Geometry::MultiPolygon(ps.iter().map(|p| quantize_polygon(p, q)).collect())
        }
        Geometry::GeometryCollection(gs) => {
            Geometry::GeometryCollection(gs.iter().map(|g| quantize_geometry(g, q)).collect())
        }
    }
}

fn quantize_polygon(p: &Polygon, q: &Quantizer) -> Polygon {
    Polygon {
        exterior: p.exterior.iter().map(|c| quantize_coord(*c, q)).collect(),
        interiors: p
            .interiors
            .iter()
            .map(|ring| ring.iter().map(|c| quantize_coord(*c, q)).collect())
            .collect(),
    }
}

fn for_each_coord(g: &Geometry, f: &mut impl FnMut(Coord)) {
    match g {
        Geometry::Point(c) => f(*c),
        Geometry::MultiPoint(cs) | Geometry::LineString(cs) => {
            for c in cs {
                f(*c);
            }
        }
        Geometry::Polygon(p) => for_each_coord_polygon(p, f),
        Geometry::MultiLineString(ls) => {
            for line in ls {
                for c in line {
                    f(*c);
                }
            }
        }
        Geometry::MultiPolygon(ps) => {
            for p in ps {
                for_each_coord_polygon(p, f);
            }
        }
        Geometry::GeometryCollection(gs) => {
            for g in gs {
                for_each_coord(g, f);
            }
        }
    }
}

fn for_each_coord_polygon(p: &Polygon, f: &mut impl FnMut(Coord)) {
    for c in &p.exterior {
        f(*c);
    }
    for ring in &p.interiors {
        for c in ring {
            f(*c);
        }
    }
}

fn compute_bbox(geoms: &[Geometry]) -> (f64, f64, f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut visit = |c: Coord| {
        if c.x < min_x {
            min_x = c.x;
        }
        if c.x > max_x {
            max_x = c.x;
        }
        if c.y < min_y {
            min_y = c.y;
        }
        if c.y > max_y {
            max_y = c.y;
        }
    };
    for g in geoms {
        for_each_coord(g, &mut visit);
    }
    if !min_x.is_finite() {
        (0., 0., 0., 0.)
    } else {
        (min_x, max_x, min_y, max_y)
    }
}

/// A geometry mirroring [`Geometry`]'s shape, but with line/ring coordinates replaced by indices
/// into the extraction's descriptor lists.
enum ExtractedGeom {
    Point(Coord),
    MultiPoint(Vec<Coord>),
    LineString(usize),
    MultiLineString(Vec<usize>),
    Polygon(Vec<usize>),
    MultiPolygon(Vec<Vec<usize>>),
    GeometryCollection(Vec<ExtractedGeom>),
}

struct Extracted {
    coords: Vec<Coord>,
    lines: Vec<(usize, usize)>,
    rings: Vec<(usize, usize)>,
    geoms: Vec<ExtractedGeom>,
}

fn extract(geometries: &[Geometry]) -> Extracted {
    let mut coords = Vec::new();
    let mut lines = Vec::new();
    let mut rings = Vec::new();
    let geoms = geometries
        .iter()
        .map(|g| extract_geometry(g, &mut coords, &mut lines, &mut rings))
        .collect();
    Extracted {
        coords,
        lines,
        rings,
        geoms,
    }
}

fn push_range(coords: &mut Vec<Coord>, ranges: &mut Vec<(usize, usize)>, cs: &[Coord]) -> usize {
    let first = coords.len();
    coords.extend_from_slice(cs);
    let last = coords.len() - 1;
    ranges.push((first, last));
    ranges.len() - 1
}

fn extract_geometry(
    g: &Geometry,
    coords: &mut Vec<Coord>,
    lines: &mut Vec<(usize, usize)>,
    rings: &mut Vec<(usize, usize)>,
) -> ExtractedGeom {
    match g {
        Geometry::Point(c) => ExtractedGeom::Point(*c),
        Geometry::MultiPoint(cs) => ExtractedGeom::MultiPoint(cs.clone()),
        Geometry::LineString(cs) => ExtractedGeom::LineString(push_range(coords, lines, cs)),
        Geometry::MultiLineString(ls) => ExtractedGeom::MultiLineString(
            ls.iter().map(|cs| push_range(coords, lines, cs)).collect(),
        ),
        Geometry::Polygon(p) => ExtractedGeom::Polygon(extract_polygon_rings(p, coords, rings)),
        Geometry::MultiPolygon(ps) => ExtractedGeom::MultiPolygon(
            ps.iter()
                .map(|p| extract_polygon_rings(p, coords, rings))
                .collect(),
        ),
        Geometry::GeometryCollection(gs) => ExtractedGeom::GeometryCollection(
            gs.iter()
                .map(|g| extract_geometry(g, coords, lines, rings))
                .collect(),
        ),
    }
}

fn extract_polygon_rings(
    p: &Polygon,
    coords: &mut Vec<Coord>,
    rings: &mut Vec<(usize, usize)>,
) -> Vec<usize> {
    let mut idxs = Vec::with_capacity(1 + p.interiors.len());
    idxs.push(push_range(coords, rings, &p.exterior));
    for hole in &p.interiors {
        idxs.push(push_range(coords, rings, hole));
    }
    idxs
}

type CKey = (u64, u64, u64);

fn key(c: Coord) -> CKey {
    (c.x.to_bits(), c.y.to_bits(), c.z.to_bits())
}

fn coord_eq(a: Coord, b: Coord) -> bool {
    a.x == b.x && a.y == b.y && a.z == b.z
}

type NPair = (Option<CKey>, Option<CKey>);

fn pair_eq(a: NPair, b: NPair) -> bool {
    a == b || (a.0 == b.1 && a.1 == b.0)
}

struct Occurrence {
    arc_index: usize,
    pair: NPair,
}

struct CoordInfo {
    is_junction: bool,
    neighbours: Vec<Occurrence>,
}

/// Stage 3: a coordinate is a junction iff the unordered `{prev, next}` pairs recorded across
/// its occurrences (in different arcs) disagree.
fn join(coords: &[Coord], lines: &[(usize, usize)], rings: &[(usize, usize)]) -> HashSet<CKey> {
    let mut map: HashMap<CKey, CoordInfo> = HashMap::new();
    let mut visit = |c_key: CKey, arc_index: usize, pair: NPair| match map.get_mut(&c_key) {
        None => {
            map.insert(
                c_key,
                CoordInfo {
                    is_junction: false,
                    neighbours: vec![Occurrence { arc_index, pair }],
                },
            );
        }
        Some(info) => {
            if info.is_junction {
                return;
            }
            let first_arc = info.neighbours[0].arc_index;
            let pair_matches_existing = info.neighbours.iter().any(|o| pair_eq(o.pair, pair));
            if arc_index == first_arc {
                if !pair_matches_existing {
                    info.neighbours.push(Occurrence { arc_index, pair });
                }
            } else if pair_matches_existing {
                // consistent local topology, not a junction from this occurrence
            } else {
                info.is_junction = true;
            }
        }
    };

    for (li, &(first, last)) in lines.iter().enumerate() {
        for p in first..=last {
            let prev = if p > first {
                Some(key(coords[p - 1]))
            } else {
                None
            };
            let next = if p < last {
                Some(key(coords[p + 1]))
            } else {
                None
            };
            visit(key(coords[p]), li, (prev, next));
        }
    }
    for (ri, &(first, last)) in rings.iter().enumerate() {
        let arc_index = lines.len() + ri;
        let m = last - first;
        if m == 0 {
            continue;
        }
        for k in 0..m {
            let idx = first + k;
            let prev_idx = first + (k + m - 1) % m;
            let next_idx = first + (k + 1) % m;
            visit(
                key(coords[idx]),
                arc_index,
                (Some(key(coords[prev_idx])), Some(key(coords[next_idx]))),
            );
        }
    }

    map.into_iter()
        .filter(|(_, v)| v.is_junction)
        .map(|(k, _)| k)
        .collect()
}

#[derive(Clone, Copy)]
struct Piece {
    first: usize,
    last: usize,
}

fn cut_line(coords: &[Coord], first: usize, last: usize, junctions: &HashSet<CKey>) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut start = first;
    for p in (first + 1)..last {
        if junctions.contains(&key(coords[p])) {
            pieces.push(Piece { first: start, last: p });
            start = p;
        }
    }
    pieces.push(Piece { first: start, last });
    pieces
}

/// Stage 4 for rings: if the start is itself a junction, cut like a line; otherwise rotate the
/// ring so its first interior junction becomes the new start, then cut.
fn cut_ring(
    coords: &mut Vec<Coord>,
    first: usize,
    last: usize,
    junctions: &HashSet<CKey>,
) -> Vec<Piece> {
    let m = last - first;
    if m == 0 {
        return vec![Piece { first, last }];
    }
    if junctions.contains(&key(coords[first])) {
        return cut_line(coords, first, last, junctions);
    }
    let junction_pos = ((first + 1)..last).find(|&p| junctions.contains(&key(coords[p])));
    match junction_pos {
        None => vec![Piece { first, last }],
        Some(p) => {
            let mut rotated = Vec::with_capacity(m + 1);
            for k in 0..m {
                let idx = first + (p - first + k) % m;
                rotated.push(coords[idx]);
            }
            rotated.push(rotated[0]);
            let new_first = coords.len();
            coords.extend_from_slice(&rotated);
            let new_last = coords.len() - 1;
            cut_line(coords, new_first, new_last, junctions)
        }
    }
}

fn arc_from_piece(coords: &[Coord], piece: &Piece) -> Vec<Coord> {
    coords[piece.first..=piece.last].to_vec()
}

fn arcs_equal(a: &[Coord], b: &[Coord]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| coord_eq(*x, *y))
}

fn is_reverse(a: &[Coord], b: &[Coord]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter().rev()).all(|(x, y)| coord_eq(*x, *y))
}

fn cmp_xy(a: Coord, b: Coord) -> std::cmp::Ordering {
    a.x.partial_cmp(&b.x)
        .unwrap_or(std::cmp::Ordering::Equal)
        .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
}

fn min_offset(arc: &[Coord]) -> usize {
    let n = arc.len().saturating_sub(1);
    let mut best = 0;
    for i in 1..n {
        if cmp_xy(arc[i], arc[best]) == std::cmp::Ordering::Less {
            best = i;
        }
    }
    best
}

/// Ring-aware equality: accounts for both arcs starting at an arbitrary (but consistent)
/// rotation of the same cycle. Returns `Some(reversed)` on a match.
fn rings_match(existing: &[Coord], candidate: &[Coord]) -> Option<bool> {
    if existing.len() != candidate.len() {
        return None;
    }
    let n = existing.len().saturating_sub(1);
    if n == 0 {
        return if arcs_equal(existing, candidate) {
            Some(false)
        } else {
            None
        };
    }
    let oa = min_offset(existing);
    let ob = min_offset(candidate);
    let forward = (0..n).all(|k| coord_eq(existing[(oa + k) % n], candidate[(ob + k) % n]));
    if forward {
        return Some(false);
    }
    let reversed =
        (0..n).all(|k| coord_eq(existing[(oa + k) % n], candidate[(ob + n - k) % n]));
    if reversed {
        return Some(true);
    }
    None
}

fn arc_ref(index: usize, reversed: bool) -> ArcRef {
    if reversed {
        -(index as i64) - 1
    } else {
        index as i64
    }
}

struct DedupResult {
    arcs: Vec<Vec<Coord>>,
    line_refs: Vec<Vec<ArcRef>>,
    ring_refs: Vec<Vec<ArcRef>>,
}

/// Above this many already-emitted arcs, the per-candidate linear scan below degrades
/// noticeably; a real index (e.g. by arc endpoint) would avoid it, see module docs.
const QUADRATIC_SCAN_WARNING_THRESHOLD: usize = 512;

/// Stage 5: line arcs dedup against the whole arc list; ring arcs dedup, rotation-aware, only
/// against other ring arcs (tracked via `line_end_index`).
fn dedup(coords: &[Coord], line_pieces: &[Vec<Piece>], ring_pieces: &[Vec<Piece>]) -> DedupResult {
    let mut arcs: Vec<Vec<Coord>> = Vec::new();
    let mut line_refs = vec![Vec::new(); line_pieces.len()];
    let mut warned = false;

    for (li, pieces) in line_pieces.iter().enumerate() {
        for piece in pieces {
            if !warned && arcs.len() > QUADRATIC_SCAN_WARNING_THRESHOLD {
                log::debug!(
                    "arc dedup comparison scanning {} existing arcs linearly; this is the quadratic path",
                    arcs.len()
                );
                warned = true;
            }
            let arc = arc_from_piece(coords, piece);
            let found = arcs.iter().enumerate().find_map(|(idx, existing)| {
                if arcs_equal(existing, &arc) {
                    Some(arc_ref(idx, false))
                } else if is_reverse(existing, &arc) {
                    Some(arc_ref(idx, true))
                } else {
                    None
                }
            });
            let r = found.unwrap_or_else(|| {
                arcs.push(arc);
                arc_ref(arcs.len() - 1, false)
            });
            line_refs[li].push(r);
        }
    }

    let line_end_index = arcs.len();
    let mut ring_refs = vec![Vec::new(); ring_pieces.len()];

    for (ri, pieces) in ring_pieces.iter().enumerate() {
        for piece in pieces {
            if !warned && arcs.len() - line_end_index > QUADRATIC_SCAN_WARNING_THRESHOLD {
                log::debug!(
                    "arc dedup comparison scanning {} existing ring arcs linearly; this is the quadratic path",
                    arcs.len() - line_end_index
                );
                warned = true;
            }
            let arc = arc_from_piece(coords, piece);
            let is_closed = arc.len() > 1 && coord_eq(arc[0], *arc.last().unwrap());
            let found = (line_end_index..arcs.len()).find_map(|idx| {
                let existing = &arcs[idx];
                if is_closed && existing.len() > 1 && coord_eq(existing[0], *existing.last().unwrap()) {
                    rings_match(existing, &arc).map(|rev| arc_ref(idx, rev))
                } else if arcs_equal(existing, &arc) {
                    Some(arc_ref(idx, false))
                } else if is_reverse(existing, &arc) {
                    Some(arc_ref(idx, true))
                } else {
                    None
                }
            });
            let r = found.unwrap_or_else(|| {
                arcs.push(arc);
                arc_ref(arcs.len() - 1, false)
            });
            ring_refs[ri].push(r);
        }
    }

    DedupResult {
        arcs,
        line_refs,
        ring_refs,
    }
}

fn resolve_geom(
    eg: &ExtractedGeom,
    line_refs: &[Vec<ArcRef>],
    ring_refs: &[Vec<ArcRef>],
) -> ArcGeometry {
    match eg {
        ExtractedGeom::Point(c) => ArcGeometry::Point(*c),
        ExtractedGeom::MultiPoint(cs) => ArcGeometry::MultiPoint(cs.clone()),
        ExtractedGeom::LineString(li) => ArcGeometry::LineString(line_refs[*li].clone()),
        ExtractedGeom::MultiLineString(lis) => ArcGeometry::MultiLineString(
            lis.iter().map(|li| line_refs[*li].clone()).collect(),
        ),
        ExtractedGeom::Polygon(ris) => {
            ArcGeometry::Polygon(ris.iter().map(|ri| ring_refs[*ri].clone()).collect())
        }
        ExtractedGeom::MultiPolygon(pris) => ArcGeometry::MultiPolygon(
            pris.iter()
                .map(|ris| ris.iter().map(|ri| ring_refs[*ri].clone()).collect())
                .collect(),
        ),
        ExtractedGeom::GeometryCollection(gs) => ArcGeometry::GeometryCollection(
            gs.iter()
                .map(|g| resolve_geom(g, line_refs, ring_refs))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topojson::Options;

    fn line(coords: &[(f64, f64)]) -> Geometry {
        Geometry::LineString(coords.iter().map(|&(x, y)| Coord::new_2d(x, y)).collect())
    }

    fn ring_polygon(coords: &[(f64, f64)]) -> Geometry {
        Geometry::Polygon(Polygon {
            exterior: coords.iter().map(|&(x, y)| Coord::new_2d(x, y)).collect(),
            interiors: vec![],
        })
    }

    #[test]
    fn rejects_non_power_of_ten_quantization() {
        let geometries = vec![line(&[(0., 0.), (1., 1.)])];
        let err = Topology::build(
            &geometries,
            Options {
                quantization: (1500, 10_000),
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidQuantization(_)));
    }

    #[test]
    fn shared_junction_cuts_both_lines_into_two_arcs_each() {
        let l1 = line(&[(0., 0.), (5., 5.), (10., 10.)]);
        let l2 = line(&[(10., 0.), (5., 5.), (0., 10.)]);
        let topology = Topology::build(
            &[l1, l2],
            Options {
                quantization: (10_000, 10_000),
            },
        )
        .unwrap();
        assert_eq!(4, topology.arcs.len());
    }

    #[test]
    fn shared_ring_edge_is_emitted_once() {
        let p1 = ring_polygon(&[(0., 0.), (1., 0.), (1., 1.), (0., 1.), (0., 0.)]);
        let p2 = ring_polygon(&[(1., 0.), (2., 0.), (2., 1.), (1., 1.), (1., 0.)]);
        let topology = Topology::build(
            &[p1, p2],
            Options {
                quantization: (10_000, 10_000),
            },
        )
        .unwrap();
        assert_eq!(3, topology.arcs.len());
    }

    #[test]
    fn no_arc_duplicates_another_forward_reversed_or_rotated() {
        let p1 = ring_polygon(&[(0., 0.), (1., 0.), (1., 1.), (0., 1.), (0., 0.)]);
        let p2 = ring_polygon(&[(1., 0.), (2., 0.), (2., 1.), (1., 1.), (1., 0.)]);
        let topology = Topology::build(
            &[p1, p2],
            Options {
                quantization: (10_000, 10_000),
            },
        )
        .unwrap();
        for i in 0..topology.arcs.len() {
            for j in (i + 1)..topology.arcs.len() {
                assert!(!arcs_equal(&topology.arcs[i], &topology.arcs[j]));
                assert!(!is_reverse(&topology.arcs[i], &topology.arcs[j]));
                assert!(rings_match(&topology.arcs[i], &topology.arcs[j]).is_none());
            }
        }
    }
}
