use crate::{Error, Result};

/// A scale and an offset that transforms xyz coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// The scale.
    pub scale: f64,
    /// The offset.
    pub offset: f64,
}

/// Which way to round when an inverse transform lands exactly between two integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round to the nearest representable integer, ties away from zero.
    Nearest,
    /// Always round down.
    Floor,
    /// Always round up.
    Ceil,
}

impl Transform {
    /// Applies this transform to an i32, returning a float.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geocore::Transform;
    /// let transform = Transform { scale: 2., offset: 1. };
    /// assert_eq!(3., transform.direct(1));
    /// ```
    pub fn direct(&self, n: i32) -> f64 {
        self.scale * f64::from(n) + self.offset
    }

    /// Applies the inverse transform, rounding to the nearest integer.
    ///
    /// Returns an error if the rounded value doesn't fit in an `i32`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geocore::Transform;
    /// let transform = Transform { scale: 2., offset: 1. };
    /// assert_eq!(1, transform.inverse(2.9).unwrap());
    /// ```
    pub fn inverse(&self, n: f64) -> Result<i32> {
        self.inverse_with_rounding_mode(n, RoundingMode::Nearest)
    }

    /// Applies the inverse transform with an explicit rounding mode, checking for overflow.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geocore::{Transform, RoundingMode};
    /// let transform = Transform { scale: 1., offset: 0. };
    /// assert_eq!(3, transform.inverse_with_rounding_mode(2.1, RoundingMode::Ceil).unwrap());
    /// assert_eq!(2, transform.inverse_with_rounding_mode(2.1, RoundingMode::Floor).unwrap());
    /// ```
    pub fn inverse_with_rounding_mode(&self, n: f64, mode: RoundingMode) -> Result<i32> {
        let unrounded = (n - self.offset) / self.scale;
        let rounded = match mode {
            RoundingMode::Nearest => unrounded.round(),
            RoundingMode::Floor => unrounded.floor(),
            RoundingMode::Ceil => unrounded.ceil(),
        };
        if rounded.is_finite() && rounded >= f64::from(i32::MIN) && rounded <= f64::from(i32::MAX)
        {
            Ok(rounded as i32)
        } else {
            Err(Error::ScaleOverflow(n))
        }
    }
}

impl Default for Transform {
    fn default() -> Transform {
        Transform {
            scale: 0.001,
            offset: 0.,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct() {
        let transform = Transform {
            scale: 2.,
            offset: 1.,
        };
        assert_eq!(3., transform.direct(1));
    }

    #[test]
    fn inverse() {
        let transform = Transform {
            scale: 2.,
            offset: 1.,
        };
        assert_eq!(3, transform.inverse(7.).unwrap());
    }

    #[test]
    fn inverse_with_rounding_mode_ceil_and_floor() {
        let transform = Transform {
            scale: 1.,
            offset: 0.,
        };
        assert_eq!(
            3,
            transform
                .inverse_with_rounding_mode(2.1, RoundingMode::Ceil)
                .unwrap()
        );
        assert_eq!(
            2,
            transform
                .inverse_with_rounding_mode(2.1, RoundingMode::Floor)
                .unwrap()
        );
    }

    #[test]
    fn inverse_with_rounding_mode_overflow() {
        let transform = Transform {
            scale: 1e-300,
            offset: 0.,
        };
        assert!(transform
            .inverse_with_rounding_mode(1e300, RoundingMode::Nearest)
            .is_err());
    }
}
