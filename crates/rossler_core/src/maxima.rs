use crate::error::{Result, RosslerError};
use crate::trajectory::analysis_window;

/// Flatness tolerance for peak detection.
pub const PEAK_TOLERANCE: f64 = 1e-6;

/// Local maxima of the post-transient half of `series`, with [`PEAK_TOLERANCE`].
///
/// See [`find_maxima_with_tolerance`].
pub fn find_maxima(series: &[f64]) -> Result<Vec<f64>> {
    find_maxima_with_tolerance(series, PEAK_TOLERANCE)
}

/// Returns the largest value in the analysis window `[len / 2, len - 1)` followed by every
/// `series[i]` in that window with `series[i] - tolerance` strictly above both neighbours.
///
/// The window maximum is always reported first, even when it sits on the window boundary and
/// is not a strict peak. Series too short to have a non-empty window are rejected.
pub fn find_maxima_with_tolerance(series: &[f64], tolerance: f64) -> Result<Vec<f64>> {
    let window = analysis_window(series.len());
    if window.is_empty() {
        return Err(RosslerError::IndexOutOfRange {
            index: window.start,
            len: series.len(),
        });
    }

    let window_max = series[window.clone()]
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    let mut maxima = vec![window_max];
    for i in window {
        let v = series[i];
        if v - tolerance > series[i - 1] && v - tolerance > series[i + 1] {
            maxima.push(v);
        }
    }
    Ok(maxima)
}
