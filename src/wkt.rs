//! Bidirectional text <-> geometry conversion for [Well-Known
//! Text](https://en.wikipedia.org/wiki/Well-known_text_representation_of_geometry).
//!
//! This is a hand-written recursive-descent parser and writer rather than a pass-through to the
//! `wkt` crate, because the `Z`/`M`/`ZM` grammar variants and the exact "shortest
//! round-trippable" double formatting need precise control that a wrapped dependency would not
//! give us.
//!
//! ```
//! use geocore::wkt;
//! let geometry = wkt::from_str("LINESTRING (0 0, 1 1)").unwrap();
//! assert_eq!("LINESTRING (0 0, 1 1)", wkt::to_string(&geometry, wkt::WriteOptions::default()));
//! ```

use crate::geo_model::{Coord, Geometry, Polygon};
use crate::{Error, Result};
use std::fmt::Write as _;

/// Controls whether [`to_string`] writes the 2D or the `Z` grammar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dimension {
    /// Write `Z` only if the geometry has a nonzero z somewhere.
    #[default]
    Auto,
    /// Always write the 2D grammar, dropping z.
    TwoD,
    /// Always write the `Z` grammar.
    ThreeD,
}

/// Options controlling WKT serialization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Whether to write the `Z` dimension tag and a z ordinate on every position.
    pub dimension: Dimension,
}

/// Parses a WKT string into a geometry.
///
/// # Examples
///
/// ```
/// use geocore::wkt;
/// let geometry = wkt::from_str("POINT (1 2)").unwrap();
/// ```
pub fn from_str(text: &str) -> Result<Geometry> {
    let mut parser = Parser::new(text);
    let geometry = parser.parse_geometry()?;
    parser.skip_ws();
    if parser.pos != parser.bytes.len() {
        return Err(parser.error("unexpected trailing characters"));
    }
    Ok(geometry)
}

/// Writes a geometry as a WKT string.
///
/// # Examples
///
/// ```
/// use geocore::wkt::{self, WriteOptions};
/// use geocore::geo_model::{Coord, Geometry};
///
/// let point = Geometry::Point(Coord::new_2d(1., 2.));
/// assert_eq!("POINT (1 2)", wkt::to_string(&point, WriteOptions::default()));
/// ```
pub fn to_string(geometry: &Geometry, options: WriteOptions) -> String {
    let mut out = String::new();
    write_geometry(&mut out, geometry, options);
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Dim {
    TwoD,
    Z,
    M,
    Zm,
}

impl Dim {
    fn is_3d(self) -> bool {
        matches!(self, Dim::Z | Dim::Zm)
    }

    fn numbers_per_position(self) -> usize {
        match self {
            Dim::TwoD => 2,
            Dim::Z | Dim::M => 3,
            Dim::Zm => 4,
        }
    }
}

struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Parser<'a> {
        Parser {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::MalformedText {
            position: self.pos,
            message: message.into(),
        }
    }

    fn skip_ws(&mut self) {
        while self
            .bytes
            .get(self.pos)
            .is_some_and(u8::is_ascii_whitespace)
        {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, c: u8) -> Result<()> {
        self.skip_ws();
        if self.peek() == Some(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", c as char)))
        }
    }

    /// Consumes an ASCII keyword case-insensitively, restoring position on mismatch.
    fn try_keyword(&mut self, word: &str) -> bool {
        let checkpoint = self.pos;
        self.skip_ws();
        let start = self.pos;
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_alphabetic) {
            self.pos += 1;
        }
        if self.input[start..self.pos].eq_ignore_ascii_case(word) {
            true
        } else {
            self.pos = checkpoint;
            false
        }
    }

    fn keyword(&mut self) -> Result<String> {
        self.skip_ws();
        let start = self.pos;
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_alphabetic) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected a geometry keyword"));
        }
        Ok(self.input[start..self.pos].to_ascii_uppercase())
    }

    fn number(&mut self) -> Result<f64> {
        self.skip_ws();
        let start = self.pos;
        if matches!(self.peek(), Some(b'+') | Some(b'-')) {
            self.pos += 1;
        }
        let mut saw_digit = false;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
            saw_digit = true;
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
                saw_digit = true;
            }
        }
        if !saw_digit {
            return Err(self.error("expected a number"));
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            let checkpoint = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            let exponent_start = self.pos;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
            if self.pos == exponent_start {
                self.pos = checkpoint;
            }
        }
        self.input[start..self.pos]
            .parse()
            .map_err(|_| self.error("malformed number"))
    }

    fn dim_suffix(&mut self) -> Dim {
        if self.try_keyword("ZM") {
            Dim::Zm
        } else if self.try_keyword("Z") {
            Dim::Z
        } else if self.try_keyword("M") {
            Dim::M
        } else {
            Dim::TwoD
        }
    }

    fn try_empty(&mut self) -> bool {
        self.try_keyword("EMPTY")
    }

    fn position(&mut self, dim: Dim) -> Result<Coord> {
        let x = self.number()?;
        let y = self.number()?;
        match dim {
            Dim::TwoD => Ok(Coord::new_2d(x, y)),
            Dim::Z => {
                let z = self.number()?;
                Ok(Coord::new_3d(x, y, z))
            }
            Dim::M => {
                let _m = self.number()?;
                Ok(Coord::new_2d(x, y))
            }
            Dim::Zm => {
                let z = self.number()?;
                let _m = self.number()?;
                Ok(Coord::new_3d(x, y, z))
            }
        }
    }

    fn position_seq(&mut self, dim: Dim) -> Result<Vec<Coord>> {
        let mut positions = vec![self.position(dim)?];
        self.skip_ws();
        while self.peek() == Some(b',') {
            self.pos += 1;
            positions.push(self.position(dim)?);
            self.skip_ws();
        }
        Ok(positions)
    }

    fn parenthesized_position_seq(&mut self, dim: Dim) -> Result<Vec<Coord>> {
        self.eat(b'(')?;
        let positions = self.position_seq(dim)?;
        self.eat(b')')?;
        Ok(positions)
    }

    fn polygon_body(&mut self, dim: Dim) -> Result<Polygon> {
        self.eat(b'(')?;
        let exterior = self.parenthesized_position_seq(dim)?;
        let mut interiors = Vec::new();
        self.skip_ws();
        while self.peek() == Some(b',') {
            self.pos += 1;
            interiors.push(self.parenthesized_position_seq(dim)?);
            self.skip_ws();
        }
        self.eat(b')')?;
        Ok(Polygon {
            exterior,
            interiors,
        })
    }

    fn parse_geometry(&mut self) -> Result<Geometry> {
        let keyword = self.keyword()?;
        let dim = self.dim_suffix();
        match keyword.as_str() {
            "POINT" => {
                if self.try_empty() {
                    return Ok(Geometry::Point(Coord::new_3d(f64::NAN, f64::NAN, f64::NAN)));
                }
                self.eat(b'(')?;
                let position = self.position(dim)?;
                self.eat(b')')?;
                Ok(Geometry::Point(position))
            }
            "LINESTRING" => {
                if self.try_empty() {
                    return Ok(Geometry::LineString(Vec::new()));
                }
                Ok(Geometry::LineString(
                    self.parenthesized_position_seq(dim)?,
                ))
            }
            "POLYGON" => {
                if self.try_empty() {
                    return Ok(Geometry::Polygon(Polygon::default()));
                }
                Ok(Geometry::Polygon(self.polygon_body(dim)?))
            }
            "MULTIPOINT" => {
                if self.try_empty() {
                    return Ok(Geometry::MultiPoint(Vec::new()));
                }
                self.eat(b'(')?;
                let mut points = Vec::new();
                loop {
                    self.skip_ws();
                    if self.peek() == Some(b'(') {
                        points.push(self.parenthesized_position_seq(dim)?[0]);
                    } else {
                        points.push(self.position(dim)?);
                    }
                    self.skip_ws();
                    if self.peek() == Some(b',') {
                        self.pos += 1;
                    } else {
                        break;
                    }
                }
                self.eat(b')')?;
                Ok(Geometry::MultiPoint(points))
            }
            "MULTILINESTRING" => {
                if self.try_empty() {
                    return Ok(Geometry::MultiLineString(Vec::new()));
                }
                self.eat(b'(')?;
                let mut lines = vec![self.parenthesized_position_seq(dim)?];
                self.skip_ws();
                while self.peek() == Some(b',') {
                    self.pos += 1;
                    lines.push(self.parenthesized_position_seq(dim)?);
                    self.skip_ws();
                }
                self.eat(b')')?;
                Ok(Geometry::MultiLineString(lines))
            }
            "MULTIPOLYGON" => {
                if self.try_empty() {
                    return Ok(Geometry::MultiPolygon(Vec::new()));
                }
                self.eat(b'(')?;
                let mut polygons = vec![self.polygon_body(dim)?];
                self.skip_ws();
                while self.peek() == Some(b',') {
                    self.pos += 1;
                    polygons.push(self.polygon_body(dim)?);
                    self.skip_ws();
                }
                self.eat(b')')?;
                Ok(Geometry::MultiPolygon(polygons))
            }
            "GEOMETRYCOLLECTION" => {
                if self.try_empty() {
                    return Ok(Geometry::GeometryCollection(Vec::new()));
                }
                self.eat(b'(')?;
                let mut geometries = vec![self.parse_geometry()?];
                self.skip_ws();
                while self.peek() == Some(b',') {
                    self.pos += 1;
                    geometries.push(self.parse_geometry()?);
                    self.skip_ws();
                }
                self.eat(b')')?;
                Ok(Geometry::GeometryCollection(geometries))
            }
            other => Err(self.error(format!("unrecognized geometry type: {other}"))),
        }
    }
}

fn resolve_dim(geometry: &Geometry, options: WriteOptions) -> Dim {
    let is_3d = match options.dimension {
        Dimension::Auto => geometry.has_z(),
        Dimension::TwoD => false,
        Dimension::ThreeD => true,
    };
    if is_3d {
        Dim::Z
    } else {
        Dim::TwoD
    }
}

fn write_position(out: &mut String, position: Coord, dim: Dim) {
    let _ = write!(out, "{}", position.x);
    let _ = write!(out, " {}", position.y);
    if dim.is_3d() {
        let _ = write!(out, " {}", position.z);
    }
}

fn write_position_seq(out: &mut String, positions: &[Coord], dim: Dim) {
    out.push('(');
    for (i, position) in positions.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_position(out, *position, dim);
    }
    out.push(')');
}

fn write_polygon_body(out: &mut String, polygon: &Polygon, dim: Dim) {
    out.push('(');
    write_position_seq(out, &polygon.exterior, dim);
    for interior in &polygon.interiors {
        out.push_str(", ");
        write_position_seq(out, interior, dim);
    }
    out.push(')');
}

fn write_dim_tag(out: &mut String, dim: Dim) {
    if dim.is_3d() {
        out.push_str(" Z");
    }
}

fn write_geometry(out: &mut String, geometry: &Geometry, options: WriteOptions) {
    let dim = resolve_dim(geometry, options);
    match geometry {
        Geometry::Point(position) => {
            out.push_str("POINT");
            write_dim_tag(out, dim);
            if position.x.is_nan() && position.y.is_nan() {
                out.push_str(" EMPTY");
            } else {
                out.push(' ');
                write_position_seq(out, std::slice::from_ref(position), dim);
            }
        }
        Geometry::LineString(positions) => {
            out.push_str("LINESTRING");
            write_dim_tag(out, dim);
            if positions.is_empty() {
                out.push_str(" EMPTY");
            } else {
                out.push(' ');
                write_position_seq(out, positions, dim);
            }
        }
        Geometry::Polygon(polygon) => {
            out.push_str("POLYGON");
            write_dim_tag(out, dim);
            if polygon.exterior.is_empty() {
                out.push_str(" EMPTY");
            } else {
                out.push(' ');
                write_polygon_body(out, polygon, dim);
            }
        }
        Geometry::MultiPoint(positions) => {
            out.push_str("MULTIPOINT");
            write_dim_tag(out, dim);
            if positions.is_empty() {
                out.push_str(" EMPTY");
            } else {
                out.push(' ');
                write_position_seq(out, positions, dim);
            }
        }
        Geometry::MultiLineString(lines) => {
            out.push_str("MULTILINESTRING");
            write_dim_tag(out, dim);
            if lines.is_empty() {
                out.push_str(" EMPTY");
            } else {
                out.push_str(" (");
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_position_seq(out, line, dim);
                }
                out.push(')');
            }
        }
        Geometry::MultiPolygon(polygons) => {
            out.push_str("MULTIPOLYGON");
            write_dim_tag(out, dim);
            if polygons.is_empty() {
                out.push_str(" EMPTY");
            } else {
                out.push_str(" (");
                for (i, polygon) in polygons.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_polygon_body(out, polygon, dim);
                }
                out.push(')');
            }
        }
        Geometry::GeometryCollection(geometries) => {
            out.push_str("GEOMETRYCOLLECTION");
            if geometries.is_empty() {
                out.push_str(" EMPTY");
            } else {
                out.push_str(" (");
                for (i, geometry) in geometries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_geometry(out, geometry, options);
                }
                out.push(')');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_2d_roundtrip() {
        let geometry = from_str("POINT (1 2)").unwrap();
        assert_eq!(Geometry::Point(Coord::new_2d(1., 2.)), geometry);
        assert_eq!("POINT (1 2)", to_string(&geometry, WriteOptions::default()));
    }

    #[test]
    fn point_z_roundtrip() {
        let geometry = from_str("POINT Z (1 2 3)").unwrap();
        assert_eq!(Geometry::Point(Coord::new_3d(1., 2., 3.)), geometry);
        assert_eq!(
            "POINT Z (1 2 3)",
            to_string(&geometry, WriteOptions::default())
        );
    }

    #[test]
    fn point_m_drops_m() {
        let geometry = from_str("POINT M (1 2 99)").unwrap();
        assert_eq!(Geometry::Point(Coord::new_2d(1., 2.)), geometry);
    }

    #[test]
    fn point_zm_keeps_z_drops_m() {
        let geometry = from_str("POINT ZM (1 2 3 99)").unwrap();
        assert_eq!(Geometry::Point(Coord::new_3d(1., 2., 3.)), geometry);
    }

    #[test]
    fn case_insensitive() {
        let geometry = from_str("point (1 2)").unwrap();
        assert_eq!(Geometry::Point(Coord::new_2d(1., 2.)), geometry);
    }

    #[test]
    fn polygon_with_hole_roundtrip() {
        let text = "POLYGON Z ((0 0 0, 10 0 0, 10 10 0, 0 10 0, 0 0 0), \
                     (2 2 0, 4 2 0, 4 4 0, 2 4 0, 2 2 0))";
        let geometry = from_str(text).unwrap();
        match &geometry {
            Geometry::Polygon(polygon) => {
                assert_eq!(5, polygon.exterior.len());
                assert_eq!(1, polygon.interiors.len());
                assert_eq!(5, polygon.interiors[0].len());
            }
            _ => panic!("expected a polygon"),
        }
        assert_eq!(text, to_string(&geometry, WriteOptions::default()));
    }

    #[test]
    fn multipolygon_roundtrip() {
        let text = "MULTIPOLYGON (((0 0, 1 0, 1 1, 0 1, 0 0)), ((2 2, 3 2, 3 3, 2 3, 2 2)))";
        let geometry = from_str(text).unwrap();
        assert_eq!(text, to_string(&geometry, WriteOptions::default()));
    }

    #[test]
    fn empty_point() {
        let geometry = from_str("POINT EMPTY").unwrap();
        assert_eq!("POINT EMPTY", to_string(&geometry, WriteOptions::default()));
    }

    #[test]
    fn empty_linestring() {
        let geometry = from_str("LINESTRING EMPTY").unwrap();
        assert_eq!(Geometry::LineString(Vec::new()), geometry);
    }

    #[test]
    fn malformed_text_reports_position() {
        let err = from_str("POLYGON ((").unwrap_err();
        assert!(matches!(err, Error::MalformedText { .. }));
    }

    #[test]
    fn geometrycollection_roundtrip() {
        let text = "GEOMETRYCOLLECTION (POINT (1 2), LINESTRING (0 0, 1 1))";
        let geometry = from_str(text).unwrap();
        assert_eq!(text, to_string(&geometry, WriteOptions::default()));
    }
}
