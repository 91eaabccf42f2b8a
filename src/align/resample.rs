use crate::data::model::RawSeries;
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// UniformResampler – fixed-stride subsample across the full series
// ---------------------------------------------------------------------------

/// Reduce `series` to `n` values spanning its full numeric range.
///
/// Blanks are filtered first.  For `n == 1` the first value is returned (an
/// explicit simplification, not the midpoint).  Otherwise index `i` maps to
/// `round(i * (m - 1) / (n - 1))` with ties rounded **half-to-even**, so
/// indices are non-decreasing and may repeat for small `n`.  First and last
/// outputs equal the input endpoints only when the stride divides evenly.
pub fn resample(series: &RawSeries, n: usize) -> Result<Vec<f64>> {
    resample_labeled(series, n, "series")
}

/// As [`resample`], reporting `label` in errors.
pub fn resample_labeled(series: &RawSeries, n: usize, label: &str) -> Result<Vec<f64>> {
    let data = series.numeric();
    let m = data.len();
    if n == 0 || m < n {
        return Err(PipelineError::InvalidSampleCount {
            label: label.to_string(),
            requested: n,
            available: m,
        });
    }
    if n == 1 {
        return Ok(vec![data[0]]);
    }

    let step = (m - 1) as f64 / (n - 1) as f64;
    Ok((0..n)
        .map(|i| data[(i as f64 * step).round_ties_even() as usize])
        .collect())
}
