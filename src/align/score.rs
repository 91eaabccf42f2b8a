use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// OffsetScorer – endpoint-offset-corrected mean squared error
// ---------------------------------------------------------------------------

/// The constant vertical shift implied by aligning the two series' final
/// points: `candidate[last] - reference[last]`.
pub fn endpoint_offset(reference: &[f64], candidate: &[f64]) -> f64 {
    match (reference.last(), candidate.last()) {
        (Some(r), Some(c)) => c - r,
        _ => 0.0,
    }
}

/// Mean of `(reference[i] - candidate[i] + offset)^2` over both series.
///
/// Raw MSE would penalize curves that are shaped identically but vertically
/// shifted (re-scaled chart axes produce exactly that); adding the endpoint
/// offset before squaring isolates shape mismatch from constant bias.  No
/// rounding happens here; presentation rounding is the caller's concern.
pub fn offset_mse(reference: &[f64], candidate: &[f64], offset: f64) -> Result<f64> {
    if reference.len() != candidate.len() || reference.is_empty() {
        return Err(PipelineError::LengthMismatch {
            left: reference.len(),
            right: candidate.len(),
        });
    }

    let sum: f64 = reference
        .iter()
        .zip(candidate)
        .map(|(r, c)| (r - c + offset).powi(2))
        .sum();
    Ok(sum / reference.len() as f64)
}

/// [`offset_mse`] with the offset taken from the series' own endpoints.
pub fn score(reference: &[f64], candidate: &[f64]) -> Result<f64> {
    offset_mse(reference, candidate, endpoint_offset(reference, candidate))
}

/// Round to two decimal places, half away from zero.  Applied once at the
/// presentation boundary so composed scores never accumulate rounding error.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
