use crate::{Error, Result};

/// The ASPRS classification of a point.
///
/// Overlap points (classification value 12) are not represented here — overlap is tracked
/// separately as `Point::is_overlap`, see [Flags::clear_overlap_class](crate::raw::point::Flags::clear_overlap_class).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Created, never classified.
    CreatedNeverClassified,
    /// Unclassified.
    Unclassified,
    /// Ground.
    Ground,
    /// Low vegetation.
    LowVegetation,
    /// Medium vegetation.
    MediumVegetation,
    /// High vegetation.
    HighVegetation,
    /// Building.
    Building,
    /// Low point (noise).
    LowPoint,
    /// Model key-point (mass point).
    ModelKeyPoint,
    /// Water.
    Water,
    /// Reserved for ASPRS definition.
    Reserved(u8),
}

impl Classification {
    /// Creates a new classification from a raw classification byte.
    ///
    /// Returns an error if the byte is the overlap-points code (12); overlap is represented
    /// on `Point` directly.
    ///
    /// # Examples
    ///
    /// ```
    /// use geocore::point::Classification;
    /// assert_eq!(Classification::Ground, Classification::new(2).unwrap());
    /// assert!(Classification::new(12).is_err());
    /// ```
    pub fn new(n: u8) -> Result<Classification> {
        match n {
            0 => Ok(Classification::CreatedNeverClassified),
            1 => Ok(Classification::Unclassified),
            2 => Ok(Classification::Ground),
            3 => Ok(Classification::LowVegetation),
            4 => Ok(Classification::MediumVegetation),
            5 => Ok(Classification::HighVegetation),
            6 => Ok(Classification::Building),
            7 => Ok(Classification::LowPoint),
            8 => Ok(Classification::ModelKeyPoint),
            9 => Ok(Classification::Water),
            12 => Err(Error::Classification(n)),
            _ => Ok(Classification::Reserved(n)),
        }
    }
}

impl Default for Classification {
    fn default() -> Classification {
        Classification::CreatedNeverClassified
    }
}

impl From<Classification> for u8 {
    fn from(classification: Classification) -> u8 {
        match classification {
            Classification::CreatedNeverClassified => 0,
            Classification::Unclassified => 1,
            Classification::Ground => 2,
            Classification::LowVegetation => 3,
            Classification::MediumVegetation => 4,
            Classification::HighVegetation => 5,
            Classification::Building => 6,
            Classification::LowPoint => 7,
            Classification::ModelKeyPoint => 8,
            Classification::Water => 9,
            Classification::Reserved(n) => n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_overlap_code() {
        assert!(Classification::new(12).is_err());
    }

    #[test]
    fn roundtrip() {
        for n in (0..12).chain(13..32) {
            let classification = Classification::new(n).unwrap();
            assert_eq!(n, u8::from(classification));
        }
    }
}
