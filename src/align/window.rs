use crate::data::model::RawSeries;
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// SeriesWindower – peak-anchored fixed-length window
// ---------------------------------------------------------------------------

/// Return the contiguous `n`-point window of `series` ending at the last
/// occurrence of its maximum value.
///
/// Blanks are filtered first; the window is taken over the numeric form.
/// When the maximum repeats, the most recent occurrence wins (series that
/// plateau at the peak anchor to the end of the plateau).
///
/// Boundary rule: when `max_index < n` the window is the first `n` points of
/// the series, anchored to the start rather than the peak, so it may not end
/// at the peak.  Downstream scoring depends on this exact behavior; do not
/// "fix" it to peak-anchor.
pub fn window(series: &RawSeries, n: usize) -> Result<Vec<f64>> {
    window_values(&series.numeric(), n, "series")
}

/// As [`window`], reporting `label` in errors.
pub fn window_labeled(series: &RawSeries, n: usize, label: &str) -> Result<Vec<f64>> {
    window_values(&series.numeric(), n, label)
}

fn window_values(data: &[f64], n: usize, label: &str) -> Result<Vec<f64>> {
    let m = data.len();
    if n == 0 || m < n {
        return Err(PipelineError::InvalidSampleCount {
            label: label.to_string(),
            requested: n,
            available: m,
        });
    }

    let max_value = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Last index attaining the maximum.
    let max_index = data
        .iter()
        .rposition(|&x| x == max_value)
        .unwrap_or(0);

    let start = max_index.saturating_sub(n - 1);
    if max_index < n {
        Ok(data[start..n].to_vec())
    } else {
        Ok(data[start..=max_index].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawValue;

    fn series(values: &[f64]) -> RawSeries {
        RawSeries::from_numbers(values)
    }

    #[test]
    fn returns_exactly_n_contiguous_values() {
        let s = series(&[1.0, 2.0, 7.0, 3.0, 4.0, 7.0, 5.0, 6.0, 0.0, 7.0]);
        for n in 1..=10 {
            let w = window(&s, n).unwrap();
            assert_eq!(w.len(), n, "n = {n}");
        }
    }

    #[test]
    fn anchors_to_last_occurrence_of_maximum() {
        // Maximum 7.0 at indices 2, 5, and 9: the window must end at 9.
        let s = series(&[1.0, 2.0, 7.0, 3.0, 4.0, 7.0, 5.0, 6.0, 0.0, 7.0]);
        assert_eq!(window(&s, 4).unwrap(), vec![5.0, 6.0, 0.0, 7.0]);
    }

    #[test]
    fn peak_past_n_ends_window_at_peak() {
        let s = series(&[1.0, 2.0, 3.0, 10.0, 4.0, 10.0, 2.0]);
        // Last max at index 5, 5 >= n, window = indices 3..=5.
        assert_eq!(window(&s, 3).unwrap(), vec![10.0, 4.0, 10.0]);
    }

    #[test]
    fn early_peak_returns_start_anchored_window() {
        // Max at index 0 < n: the window is the first n points and does not
        // end at the peak.
        let s = series(&[10.0, 2.0, 1.0]);
        assert_eq!(window(&s, 3).unwrap(), vec![10.0, 2.0, 1.0]);
    }

    #[test]
    fn blanks_are_filtered_before_windowing() {
        let s = RawSeries::new(vec![
            RawValue::Number(1.0),
            RawValue::Blank,
            RawValue::Number(5.0),
            RawValue::Blank,
            RawValue::Number(2.0),
        ]);
        assert_eq!(window(&s, 2).unwrap(), vec![1.0, 5.0]);
    }

    #[test]
    fn rejects_zero_and_oversized_sample_counts() {
        let s = series(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            window(&s, 0),
            Err(PipelineError::InvalidSampleCount { requested: 0, .. })
        ));
        assert!(matches!(
            window(&s, 4),
            Err(PipelineError::InvalidSampleCount {
                requested: 4,
                available: 3,
                ..
            })
        ));
    }
}
