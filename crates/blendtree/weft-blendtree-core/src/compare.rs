//! Comparator builders: boolean combinators realized as epsilon-stepped
//! interpolation nodes.

use weft_api_core::Signal;

use crate::boolean::{CondExpr, Condition};
use crate::session::OPERATING_RANGE;

/// Offset of the true anchor off the `a = b` diagonal in the two-signal
/// comparator. Differences smaller than this resolve to false.
pub const HALF_PLANE_NUDGE: f32 = 1e-3;

impl Condition {
    /// True exactly at `b`, fading to false one interpolation step below
    /// `b - epsilon` and above `b + epsilon`.
    ///
    /// With `epsilon = 0` the outer thresholds sit one ULP off `b`, so the
    /// band degenerates into a single-point spike: any representable value
    /// other than `b` selects the false branch outright.
    pub fn equals(a: &Signal, b: f32, epsilon: f32) -> Condition {
        let (lo, hi) = if epsilon == 0.0 {
            (b.next_down(), b.next_up())
        } else {
            ((b - epsilon).next_down(), (b + epsilon).next_up())
        };
        Condition::leaf(
            CondExpr::Band {
                control: a.clone(),
                lo,
                mid: b,
                hi,
            },
            a.default == b,
        )
    }

    /// True when `a` exceeds `threshold`; `or_equal` makes the boundary
    /// inclusive.
    ///
    /// The boundary anchor is stepped one ULP so strict and inclusive
    /// comparisons differ by exactly one representable value under linear
    /// interpolation.
    pub fn greater_than(a: &Signal, threshold: f32, or_equal: bool) -> Condition {
        let (false_at, true_at) = if or_equal {
            (threshold.next_down(), threshold)
        } else {
            (threshold, threshold.next_up())
        };
        let default = if or_equal {
            a.default >= threshold
        } else {
            a.default > threshold
        };
        Condition::leaf(
            CondExpr::Step {
                control: a.clone(),
                false_at,
                true_at,
            },
            default,
        )
    }

    /// True when `a` is below `threshold`; the negated greater-than.
    pub fn less_than(a: &Signal, threshold: f32, or_equal: bool) -> Condition {
        Condition::greater_than(a, threshold, !or_equal).not()
    }

    /// True when `a > b` for two live signals.
    ///
    /// An anchor-point half-plane test over the `±OPERATING_RANGE` square:
    /// the corners and center carry the false branch, and one anchor nudged
    /// off the diagonal into the `a > b` half-plane carries the true
    /// branch. This is the most fragile operator in the crate: it depends
    /// on the evaluator's proximity metric concentrating weight on the
    /// nearest anchor, it only holds while both inputs stay inside the
    /// square, and differences below [`HALF_PLANE_NUDGE`] resolve to
    /// false. Outside that domain the result is wrong, not an error.
    pub fn greater_than_signal(a: &Signal, b: &Signal) -> Condition {
        let r = OPERATING_RANGE;
        let false_anchors = vec![[-r, -r], [-r, r], [r, -r], [r, r], [0.0, 0.0]];
        let true_anchor = [HALF_PLANE_NUDGE, -HALF_PLANE_NUDGE];
        Condition::leaf(
            CondExpr::HalfPlane {
                x: a.clone(),
                y: b.clone(),
                true_anchor,
                false_anchors,
            },
            a.default > b.default,
        )
    }
}
