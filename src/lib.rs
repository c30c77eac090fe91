//! A geospatial I/O library.
//!
//! This crate bundles three pieces of geospatial plumbing that tend to show up
//! together in a LiDAR/GIS toolchain:
//!
//! - a bit-exact, streaming reader/writer for the [ASPRS
//!   LAS](https://www.asprs.org/committee-general/laser-las-file-format-exchange-activities.html)
//!   point cloud format (with an optional [LASzip](https://laszip.org/) adapter behind the
//!   `laz` feature),
//! - a [TopoJSON](https://github.com/topojson/topojson-specification) topology builder and
//!   reader, and
//! - a [Well-Known Text](https://en.wikipedia.org/wiki/Well-known_text_representation_of_geometry)
//!   geometry converter.
//!
//! # Reading points
//!
//! ```no_run
//! use geocore::Reader;
//! let mut reader = Reader::from_path("tests/data/1.0_0.las").unwrap();
//! for point in reader.points() {
//!     let point = point.unwrap();
//!     let _x = point.x;
//! }
//! ```
//!
//! # Writing points
//!
//! ```
//! use std::io::Cursor;
//! use geocore::{Point, Writer};
//! let mut writer = Writer::default();
//! let mut point = Point::default();
//! point.x = 1.;
//! writer.write_point(point).unwrap();
//! ```
//!
//! # Building a TopoJSON topology
//!
//! ```
//! use geocore::geo_model::{Coord, Geometry};
//! use geocore::topojson::{self, Topology};
//!
//! let line = Geometry::LineString(vec![Coord::new_2d(0., 0.), Coord::new_2d(1., 1.)]);
//! let topology = Topology::build(&[line], topojson::Options::default()).unwrap();
//! ```
//!
//! # Converting WKT
//!
//! ```
//! use geocore::wkt;
//! let geometry = wkt::from_str("POINT (1 2)").unwrap();
//! assert_eq!("POINT (1 2)", wkt::to_string(&geometry, wkt::WriteOptions::default()));
//! ```

#![deny(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]

pub mod feature;
pub mod geo_model;
#[cfg(feature = "laz")]
pub mod laz;
pub mod point;
pub mod raw;
pub mod topojson;
pub mod utils;
pub mod wkt;

mod bounds;
mod color;
mod error;
mod gps_time_type;
mod header;
mod reader;
mod stream;
mod transform;
mod vector;
mod version;
mod vlr;
mod writer;

pub use bounds::Bounds;
pub use color::Color;
pub use error::Error;
pub use gps_time_type::GpsTimeType;
pub use header::{Builder, Header};
pub use point::Point;
#[cfg(feature = "laz")]
pub use reader::LazParallelism;
pub use reader::{Reader, ReaderOptions};
pub use transform::{RoundingMode, Transform};
pub use vector::Vector;
pub use version::Version;
pub use vlr::Vlr;
pub use writer::{Writer, WriterOptions};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
