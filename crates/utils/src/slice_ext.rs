use crate::error::{Error, Result};

/// Extends functionality for slices of float arrays
pub trait SliceExt<T> {
    /// Find the maximum value in float arrays
    ///
    /// Only provides the maximum value from a collection of valid numbers. Any
    /// NAN values, infinite values, or empty slices will return an error.
    ///
    /// ```rust
    /// # use rnlib_utils::SliceExt;
    /// # use rnlib_utils::Error;
    /// // Successful cases
    /// assert_eq!([1.1, 0.5, 2.2].try_max(), Ok(2.2));
    /// assert_eq!([1.1, f64::MAX, 2.2].try_max(), Ok(f64::MAX));
    ///
    /// // Error cases
    /// assert_eq!([1.1, f64::INFINITY, 2.2].try_max(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!(Vec::<f64>::new().try_max(), Err(Error::SliceContainsNoValues));
    /// ```
    ///
    /// The float primitives do not implement `Ord` due to `NaN` being
    /// incomparable, so this uses `total_cmp` once the values are known to be
    /// finite.
    fn try_max(&self) -> Result<T>;
}

impl SliceExt<f64> for [f64] {
    fn try_max(&self) -> Result<f64> {
        check_finite(self)?;
        self.iter()
            .copied()
            .max_by(|a, b| a.total_cmp(b))
            .ok_or(Error::SliceContainsNoValues)
    }
}

fn check_finite(values: &[f64]) -> Result<()> {
    if values.is_empty() {
        Err(Error::SliceContainsNoValues)
    } else if values.iter().any(|v| !v.is_finite()) {
        Err(Error::SliceContainsUndefinedValues)
    } else {
        Ok(())
    }
}
