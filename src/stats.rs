//! Descriptive statistics over draw vectors.
//!
//! Quantiles use the R-7 method (Hyndman & Fan 1996) with linear
//! interpolation, matching the convention of R, NumPy and Pandas so
//! interval bounds line up with what the original analysis reported.

use crate::error::{InferirError, Result};
use crate::primitives::Vector;

/// Descriptive statistics computed on a vector of f32 values.
///
/// Holds a reference to the data vector to avoid unnecessary copying.
///
/// # Examples
///
/// ```
/// use inferir::stats::DescriptiveStats;
/// use inferir::primitives::Vector;
///
/// let data = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
/// let stats = DescriptiveStats::new(&data);
/// assert_eq!(stats.quantile(0.5).unwrap(), 3.0);
/// ```
#[derive(Debug)]
pub struct DescriptiveStats<'a> {
    data: &'a Vector<f32>,
}

impl<'a> DescriptiveStats<'a> {
    /// Wraps a data vector.
    #[must_use]
    pub fn new(data: &'a Vector<f32>) -> Self {
        Self { data }
    }

    /// Compute a single quantile using linear interpolation (R-7 method).
    ///
    /// Uses `QuickSelect` (`select_nth_unstable`) for O(n) average-case
    /// performance instead of a full sort.
    ///
    /// # Arguments
    /// * `q` - Quantile value in [0, 1]
    ///
    /// # Errors
    ///
    /// Returns an error if the data vector is empty or `q` is outside
    /// [0, 1].
    pub fn quantile(&self, q: f64) -> Result<f32> {
        if self.data.is_empty() {
            return Err(InferirError::empty_input("quantile data"));
        }
        if !(0.0..=1.0).contains(&q) {
            return Err(InferirError::Other(format!(
                "quantile must be in [0, 1], got {q}"
            )));
        }

        let n = self.data.len();
        if n == 1 {
            return Ok(self.data.as_slice()[0]);
        }

        // R-7: h = (n - 1) * q, interpolate between floor and ceil.
        let h = (n - 1) as f64 * q;
        let h_floor = h.floor() as usize;
        let h_ceil = h.ceil() as usize;

        let mut working_copy = self.data.as_slice().to_vec();

        if h_floor == h_ceil {
            working_copy.select_nth_unstable_by(h_floor, |a, b| {
                a.partial_cmp(b)
                    .expect("f32 values should be comparable (not NaN)")
            });
            return Ok(working_copy[h_floor]);
        }

        working_copy.select_nth_unstable_by(h_floor, |a, b| {
            a.partial_cmp(b)
                .expect("f32 values should be comparable (not NaN)")
        });
        let lower = working_copy[h_floor];

        working_copy.select_nth_unstable_by(h_ceil, |a, b| {
            a.partial_cmp(b)
                .expect("f32 values should be comparable (not NaN)")
        });
        let upper = working_copy[h_ceil];

        let fraction = h - h_floor as f64;
        Ok(lower + (fraction as f32) * (upper - lower))
    }

    /// Compute multiple quantiles efficiently (single sort).
    ///
    /// # Arguments
    /// * `qs` - Quantile values in [0, 1], e.g. `&[0.025, 0.975]`
    ///
    /// # Returns
    /// Quantile values in the same order as the input.
    ///
    /// # Errors
    ///
    /// Returns an error if the data vector is empty or any quantile is
    /// outside [0, 1].
    ///
    /// # Examples
    /// ```
    /// use inferir::stats::DescriptiveStats;
    /// use inferir::primitives::Vector;
    ///
    /// let data = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    /// let stats = DescriptiveStats::new(&data);
    /// let q = stats.quantiles(&[0.25, 0.5, 0.75]).unwrap();
    /// assert_eq!(q, vec![2.0, 3.0, 4.0]);
    /// ```
    pub fn quantiles(&self, qs: &[f64]) -> Result<Vec<f32>> {
        if self.data.is_empty() {
            return Err(InferirError::empty_input("quantile data"));
        }
        for &q in qs {
            if !(0.0..=1.0).contains(&q) {
                return Err(InferirError::Other(format!(
                    "quantile must be in [0, 1], got {q}"
                )));
            }
        }

        let mut sorted = self.data.as_slice().to_vec();
        sorted.sort_by(|a, b| {
            a.partial_cmp(b)
                .expect("f32 values should be comparable (not NaN)")
        });

        let n = sorted.len();
        let mut results = Vec::with_capacity(qs.len());

        for &q in qs {
            let h = (n - 1) as f64 * q;
            let h_floor = h.floor() as usize;
            let h_ceil = h.ceil() as usize;

            let value = if h_floor == h_ceil {
                sorted[h_floor]
            } else {
                let fraction = h - h_floor as f64;
                sorted[h_floor] + (fraction as f32) * (sorted[h_ceil] - sorted[h_floor])
            };

            results.push(value);
        }

        Ok(results)
    }
}
