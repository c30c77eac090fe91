use crate::{Error, Result};

/// The capabilities of a point data record format.
///
/// Point data record formats are numbered 0 through 10. Rather than match on the
/// format number everywhere it matters, this structure captures what the format
/// actually implies: does it carry gps time, color, near infrared, or a waveform
/// packet, and does it use the wider (LAS 1.4) bitfield layout.
///
/// # Examples
///
/// ```
/// use geocore::point::Format;
/// let format = Format::new(1).unwrap();
/// assert!(format.has_gps_time);
/// assert!(!format.has_color);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Format {
    /// Does this format carry a gps time field?
    pub has_gps_time: bool,

    /// Does this format carry red/green/blue color?
    pub has_color: bool,

    /// Does this format carry a near infrared channel?
    pub has_nir: bool,

    /// Does this format carry a waveform packet?
    pub has_waveform: bool,

    /// Does this format use the LAS 1.4 extended bitfield (4-bit return
    /// numbers, scanner channel, 16-bit scan angle)?
    pub is_extended: bool,

    /// The number of extra bytes appended after the standard fields.
    pub extra_bytes: u16,

    /// Is the point data compressed with laszip?
    ///
    /// This isn't part of the las spec proper; by convention the high bit of the point data
    /// record format byte is set to indicate laszip-compressed data.
    pub is_compressed: bool,
}

impl Format {
    /// Creates a new format for the given point data record format number.
    ///
    /// # Examples
    ///
    /// ```
    /// use geocore::point::Format;
    /// assert!(Format::new(0).is_ok());
    /// assert!(Format::new(11).is_err());
    /// ```
    pub fn new(n: u8) -> Result<Format> {
        let (has_gps_time, has_color, has_nir, has_waveform, is_extended) = match n {
            0 => (false, false, false, false, false),
            1 => (true, false, false, false, false),
            2 => (false, true, false, false, false),
            3 => (true, true, false, false, false),
            4 => (true, false, false, true, false),
            5 => (true, true, false, true, false),
            6 => (true, false, false, false, true),
            7 => (true, true, false, false, true),
            8 => (true, true, true, false, true),
            9 => (true, false, false, true, true),
            10 => (true, true, true, true, true),
            _ => return Err(Error::PointFormat(n)),
        };
        Ok(Format {
            has_gps_time,
            has_color,
            has_nir,
            has_waveform,
            is_extended,
            extra_bytes: 0,
            is_compressed: false,
        })
    }

    /// Returns the format number that this format's *standard* fields (ignoring extra bytes)
    /// correspond to, for versions that allow non-extended formats.
    ///
    /// # Examples
    ///
    /// ```
    /// use geocore::point::Format;
    /// assert_eq!(0, Format::new(0).unwrap().to_u8().unwrap());
    /// assert_eq!(6, Format::new(6).unwrap().to_u8().unwrap());
    /// ```
    pub fn to_u8(&self) -> Result<u8> {
        self.to_writable_u8()
    }

    /// Returns the point data record format number to write to a header.
    ///
    /// This picks the lowest-numbered format that has exactly this combination of
    /// capabilities.
    pub fn to_writable_u8(&self) -> Result<u8> {
        let n = match (
            self.has_gps_time,
            self.has_color,
            self.has_nir,
            self.has_waveform,
            self.is_extended,
        ) {
            (false, false, false, false, false) => 0,
            (true, false, false, false, false) => 1,
            (false, true, false, false, false) => 2,
            (true, true, false, false, false) => 3,
            (true, false, false, true, false) => 4,
            (true, true, false, true, false) => 5,
            (true, false, false, false, true) => 6,
            (true, true, false, false, true) => 7,
            (true, true, true, false, true) => 8,
            (true, false, false, true, true) => 9,
            (true, true, true, true, true) => 10,
            _ => return Err(Error::PointFormat(255)),
        };
        Ok(n)
    }

    /// The length, in bytes, of a point in this format, not including extra bytes.
    fn standard_len(&self) -> u16 {
        let mut len = if self.is_extended { 30 } else { 20 };
        if self.has_gps_time {
            len += 8;
        }
        if self.has_color {
            len += 6;
        }
        if self.has_nir {
            len += 2;
        }
        if self.has_waveform {
            len += 29;
        }
        len
    }

    /// The length, in bytes, of a point in this format, including extra bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use geocore::point::Format;
    /// assert_eq!(20, Format::new(0).unwrap().len());
    /// assert_eq!(28, Format::new(1).unwrap().len());
    /// ```
    pub fn len(&self) -> u16 {
        self.standard_len() + self.extra_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_covers_zero_through_ten() {
        for n in 0..=10u8 {
            assert!(Format::new(n).is_ok(), "format {n} should be supported");
        }
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert!(Format::new(11).is_err());
        assert!(Format::new(255).is_err());
    }

    #[test]
    fn roundtrip_format_number() {
        for n in 0..=10u8 {
            let format = Format::new(n).unwrap();
            assert_eq!(n, format.to_writable_u8().unwrap());
        }
    }

    #[test]
    fn len_matches_known_record_lengths() {
        assert_eq!(20, Format::new(0).unwrap().len());
        assert_eq!(28, Format::new(1).unwrap().len());
        assert_eq!(26, Format::new(2).unwrap().len());
        assert_eq!(34, Format::new(3).unwrap().len());
        assert_eq!(57, Format::new(4).unwrap().len());
        assert_eq!(63, Format::new(5).unwrap().len());
        assert_eq!(30, Format::new(6).unwrap().len());
        assert_eq!(36, Format::new(7).unwrap().len());
        assert_eq!(38, Format::new(8).unwrap().len());
        assert_eq!(59, Format::new(9).unwrap().len());
        assert_eq!(67, Format::new(10).unwrap().len());
    }

    #[test]
    fn extended_formats_have_is_extended() {
        for n in 6..=10u8 {
            assert!(Format::new(n).unwrap().is_extended);
        }
        for n in 0..=5u8 {
            assert!(!Format::new(n).unwrap().is_extended);
        }
    }
}
