//! Crate-wide error type.

use crate::{point::Format, version::Version};
use thiserror::Error as ThisError;

/// Crate-specific errors.
#[derive(ThisError, Debug)]
pub enum Error {
    /// Wraps `std::io::Error`.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The underlying byte stream refused to open (or the header couldn't be read off it).
    ///
    /// Distinct from [`Error::Io`] so that callers can tell "this stream never opened" apart
    /// from an I/O failure mid-stream.
    #[error("failed to open stream: {0}")]
    StreamOpen(#[source] std::io::Error),

    /// A point was read after the stream already reported end-of-stream.
    ///
    /// The first time a reader runs out of points it reports that normally (e.g. `read_point`
    /// returns `Ok(None)`); calling the same operation again once [`end_of_stream`] is already
    /// true is what this error is for.
    ///
    /// [`end_of_stream`]: crate::Reader::end_of_stream
    #[error("read past the last record; the stream already reported end-of-stream")]
    EndOfStream,

    /// Wraps `serde_json::Error`, produced by the TopoJSON reader.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// An integer conversion overflowed, usually while sizing a point buffer.
    #[error(transparent)]
    TryFromInt(#[from] std::num::TryFromIntError),

    /// Wraps a laz-specific error, only produced when the `laz` feature is enabled.
    #[cfg(feature = "laz")]
    #[error(transparent)]
    Laz(#[from] laz::LasZipError),

    /// The file signature wasn't "LASF".
    #[error("invalid file signature: {0:?}")]
    FileSignature([u8; 4]),

    /// A point data record format number outside of 0..=10.
    #[error("unrecognized point data record format: {0}")]
    PointFormat(u8),

    /// The header size, as reported in the header, is too small for the version.
    #[error("header size is too small: {0}")]
    HeaderSizeTooSmall(u16),

    /// The header, once built, would be too large to represent in a u16.
    #[error("header size is too large: {0}")]
    HeaderTooLarge(usize),

    /// The offset to the point data, as reported in the header, is too small.
    #[error("offset to point data is too small: {0}")]
    OffsetToDataTooSmall(u32),

    /// The offset to the point data would be too large to represent in a u32.
    #[error("offset to point data is too large: {0}")]
    OffsetToPointDataTooLarge(usize),

    /// Too many variable length records to represent in a u32.
    #[error("too many variable length records: {0}")]
    TooManyVlrs(usize),

    /// Too many extended variable length records to represent in a u32.
    #[error("too many extended variable length records: {0}")]
    TooManyEvlrs(usize),

    /// Too many points for this version to represent.
    #[error("too many points ({n}) for version {version}")]
    TooManyPoints {
        /// The number of points.
        n: u64,
        /// The las version.
        version: Version,
    },

    /// A version doesn't support a feature that was asked of it.
    #[error("version {0} does not support the {1} feature")]
    Feature(Version, &'static str),

    /// A version doesn't support a point format.
    #[error("version {version} does not support point format {format:?}")]
    Format {
        /// The version.
        version: Version,
        /// The point format.
        format: Format,
    },

    /// The legacy and extended point counts in a raw header disagree with each other.
    ///
    /// Both are nonzero and don't match, so there is no way to prefer one over the other.
    #[error("legacy point count ({legacy}) and extended point count ({extended}) disagree")]
    HeaderInvalid {
        /// The legacy (32-bit) point count.
        legacy: u64,
        /// The extended (64-bit) point count.
        extended: u64,
    },

    /// A point-data-record-length in a raw header is smaller than the format requires.
    #[error("point data record length {len} is too small for format {format:?}")]
    PointDataRecordLength {
        /// The point format.
        format: Format,
        /// The on-disk record length.
        len: u16,
    },

    /// Point padding is present, but there are no extended variable length records to anchor it.
    #[error("point padding is present, but there are no evlrs")]
    PointPadding,

    /// Invalid return number for this point format.
    #[error("invalid return number {return_number} for version {version:?}")]
    ReturnNumber {
        /// The return number.
        return_number: u8,
        /// The version, if known.
        version: Option<Version>,
    },

    /// Invalid classification value.
    #[error("invalid classification: {0}")]
    Classification(u8),

    /// Invalid scanner channel, only formats 6 and up support non-zero channels.
    #[error("invalid scanner channel: {0}")]
    ScannerChannel(u8),

    /// A point is missing gps time, but the format requires it.
    #[error("point is missing gps time for format {0:?}")]
    MissingGpsTime(Format),

    /// A point is missing color, but the format requires it.
    #[error("point is missing color for format {0:?}")]
    MissingColor(Format),

    /// Variable length record data is too long to represent in a u16 (or u64 for evlrs).
    #[error("variable length record data is too long: {0} bytes")]
    VlrDataTooLong(usize),

    /// A string field held bytes that weren't nul-padded ASCII.
    #[error("field is not nul-filled: {0:?}")]
    NotNulFilled(Vec<u8>),

    /// A string field held non-ASCII bytes.
    #[error("field is not ascii: {0}")]
    NotAscii(String),

    /// A string is too long to fit into a fixed-size field.
    #[error("string is too long: {0}")]
    TooLong(String),

    /// Tried to write a point whose attributes don't match the header's configured point format.
    #[error("point attributes do not match the header's point format: {0:?}")]
    PointAttributesDoNotMatch(Format),

    /// Tried to read or write laz data, but the `laz` feature is not enabled.
    #[error("the `laz` cargo feature is not enabled")]
    LaszipNotEnabled,

    /// Couldn't find the laszip vlr needed to decompress laz data.
    #[error("no laszip vlr found")]
    LasZipVlrNotFound,

    /// A stream operation was attempted out of order: double-dispose, or any operation on a
    /// reader or writer that has already been disposed.
    #[error("illegal stream operation: {0}")]
    Contract(&'static str),

    /// A floating-point coordinate does not fit in the configured scale/offset.
    #[error("coordinate {0} overflows the configured scale and offset")]
    ScaleOverflow(f64),

    /// A TopoJSON quantization was invalid (zero width or height).
    #[error("invalid quantization: {0:?}")]
    InvalidQuantization((u32, u32)),

    /// A geometry type is not supported by this operation.
    #[error("unsupported geometry: {0}")]
    UnsupportedGeometry(&'static str),

    /// WKT or TopoJSON text could not be parsed.
    #[error("malformed text at position {position}: {message}")]
    MalformedText {
        /// Byte offset into the input where parsing failed.
        position: usize,
        /// A human-readable description of the problem.
        message: String,
    },

    /// A ring (in a polygon or arc) was not closed.
    #[error("ring is not closed, first point {first:?} != last point {last:?}")]
    UnclosedRing {
        /// The ring's first point.
        first: (f64, f64),
        /// The ring's last point.
        last: (f64, f64),
    },
}

impl Error {
    /// Reclassifies a plain I/O failure as a stream-open failure.
    ///
    /// Used at the few call sites (opening a file, reading the first bytes of a header) where
    /// an I/O error means the stream never came up at all, rather than failing partway through
    /// an otherwise-live stream.
    pub(crate) fn opening(self) -> Error {
        match self {
            Error::Io(io) => Error::StreamOpen(io),
            other => other,
        }
    }
}
