//! Interpolation math shared by builders and the reference evaluator.

/// Bracketing children and weights of a one-axis node at control value `x`.
///
/// `thresholds` must be sorted ascending and non-empty. Outside the range
/// all weight clamps onto the boundary child; the second entry then carries
/// weight zero.
pub fn one_axis_weights(thresholds: &[f32], x: f32) -> [(usize, f32); 2] {
    let n = thresholds.len();
    debug_assert!(n > 0, "one-axis node with no thresholds");
    if n == 1 || x <= thresholds[0] {
        return [(0, 1.0), (0, 0.0)];
    }
    if x >= thresholds[n - 1] {
        return [(n - 1, 1.0), (n - 1, 0.0)];
    }
    for i in 0..n - 1 {
        let (t0, t1) = (thresholds[i], thresholds[i + 1]);
        if x >= t0 && x <= t1 {
            let u = (x - t0) / (t1 - t0);
            return [(i, 1.0 - u), (i + 1, u)];
        }
    }
    [(n - 1, 1.0), (n - 1, 0.0)]
}

/// Piecewise-linear interpolation over `(threshold, value)` anchors sorted
/// by threshold, clamped to the boundary anchors outside the range.
///
/// Empty anchor lists evaluate to 0 (fail-soft, matching an evaluator with
/// nothing to blend).
pub fn piecewise_linear(anchors: &[(f32, f32)], x: f32) -> f32 {
    if anchors.is_empty() {
        return 0.0;
    }
    let thresholds: Vec<f32> = anchors.iter().map(|&(t, _)| t).collect();
    let [(i0, w0), (i1, w1)] = one_axis_weights(&thresholds, x);
    anchors[i0].1 * w0 + anchors[i1].1 * w1
}
