//! Arithmetic builders: each derives a new output signal plus the fragment
//! that drives it.
//!
//! All of these target an evaluator whose only semantics are weighted
//! blending, so multiplication, remapping, and reciprocals are expressed as
//! copier leaves and interpolation nodes rather than arithmetic ops. Domain
//! assumptions (operating ranges, sign constraints) are documented per
//! builder and never checked: violating them yields wrong output, not an
//! error, because the runtime has no error channel.

use weft_api_core::{BuildError, NodeId, Remap, Signal};

use crate::interp::piecewise_linear;
use crate::session::{BuildSession, OPERATING_RANGE};

/// Support range of [`BuildSession::invert`].
pub const INVERT_MIN: f32 = 0.01;
pub const INVERT_MAX: f32 = 100.0;

/// Log-spaced reciprocal anchors; linear interpolation between neighbours
/// keeps the approximation error within a few percent.
const INVERT_ANCHORS: [f32; 29] = [
    0.01, 0.015, 0.02, 0.03, 0.04, 0.05, 0.07, 0.1, 0.15, 0.2, 0.3, 0.4, 0.5, 0.7, 1.0, 1.5, 2.0,
    3.0, 4.0, 5.0, 7.0, 10.0, 15.0, 20.0, 30.0, 40.0, 50.0, 70.0, 100.0,
];

impl BuildSession {
    /// Weighted sum of `terms` plus a constant `offset`.
    ///
    /// A single term with multiplier 1 and zero offset is returned as-is
    /// without emitting anything. Otherwise the output signal defaults to
    /// `sum(default_i * mult_i) + offset` and a direct fragment drives it:
    /// each term is a setter of its multiplier weighted by the input
    /// signal, and the offset (if any) is a setter weighted by always-one.
    pub fn add(
        &mut self,
        name: &str,
        terms: &[(Signal, f32)],
        offset: f32,
    ) -> Result<Signal, BuildError> {
        if let [(only, mult)] = terms {
            if *mult == 1.0 && offset == 0.0 {
                return Ok(only.clone());
            }
        }
        let default = terms
            .iter()
            .map(|(input, mult)| input.default * mult)
            .sum::<f32>()
            + offset;
        let out = self.allocate(name, default)?;

        let mut children: Vec<(Signal, NodeId)> = Vec::with_capacity(terms.len() + 1);
        for (input, mult) in terms {
            let leaf = self.setter(&out, *mult);
            children.push((input.clone(), leaf));
        }
        if offset != 0.0 {
            let leaf = self.setter(&out, offset);
            children.push((self.one().clone(), leaf));
        }
        let node = self.direct(children, false)?;
        self.append_to_root(node);
        Ok(out)
    }

    /// `a - b`.
    pub fn subtract(&mut self, name: &str, a: &Signal, b: &Signal) -> Result<Signal, BuildError> {
        self.add(name, &[(a.clone(), 1.0), (b.clone(), -1.0)], 0.0)
    }

    /// `a * k` as a single scaled copier.
    ///
    /// A linear operation across the whole operating range, so it stays
    /// exact when chained through further fragments.
    pub fn multiply_const(
        &mut self,
        name: &str,
        a: &Signal,
        k: f32,
    ) -> Result<Signal, BuildError> {
        let out = self.allocate(name, a.default * k)?;
        let leaf = self.copier(&out, a, Remap::scaled(-OPERATING_RANGE, OPERATING_RANGE, k));
        let one = self.one().clone();
        let node = self.direct(vec![(one, leaf)], false)?;
        self.append_to_root(node);
        Ok(out)
    }

    /// Product of two live signals.
    ///
    /// Realized as "drive by `b`, scaled by `a`'s live value": `b` gates a
    /// nested direct fragment whose only child is a copier of `a`, so each
    /// frame the output receives `b * a`. Both inputs are assumed to stay
    /// within the operating range; outside it the copier clamps and the
    /// product is silently wrong.
    pub fn multiply(&mut self, name: &str, a: &Signal, b: &Signal) -> Result<Signal, BuildError> {
        let out = self.allocate(name, a.default * b.default)?;
        let leaf = self.copier(&out, a, Remap::identity(-OPERATING_RANGE, OPERATING_RANGE));
        let gated = self.direct(vec![(b.clone(), leaf)], false)?;
        self.append_to_root(gated);
        Ok(out)
    }

    /// Linear remap of `input` from `[in_min, in_max]` to
    /// `[out_min, out_max]`, clamped at both extremes.
    ///
    /// Two setter children at the range ends; interpolation covers
    /// everything in between and the one-axis boundary clamp covers
    /// everything outside. `in_min == in_max` is a duplicate threshold and
    /// fails.
    pub fn map(
        &mut self,
        name: &str,
        input: &Signal,
        in_min: f32,
        in_max: f32,
        out_min: f32,
        out_max: f32,
    ) -> Result<Signal, BuildError> {
        let remap = Remap::new(in_min, in_max, out_min, out_max);
        let out = self.allocate(name, remap.apply(input.default))?;
        let lo = self.setter(&out, out_min);
        let hi = self.setter(&out, out_max);
        let node = self.one_axis(input, vec![(in_min, lo), (in_max, hi)])?;
        self.append_to_root(node);
        Ok(out)
    }

    /// Identity passthrough of `from`, valid on `[min, max]`.
    ///
    /// Re-scopes a signal for consumption by a bounded-domain builder; the
    /// copy lags its source by one frame.
    pub fn buffer(
        &mut self,
        from: &Signal,
        name: &str,
        min: f32,
        max: f32,
    ) -> Result<Signal, BuildError> {
        let out = self.allocate(name, from.default.max(min).min(max))?;
        let leaf = self.copier(&out, from, Remap::identity(min, max));
        let one = self.one().clone();
        let node = self.direct(vec![(one, leaf)], false)?;
        self.append_to_root(node);
        Ok(out)
    }

    /// Approximate `1 / input` on `[INVERT_MIN, INVERT_MAX]`.
    ///
    /// A buffered copy first re-scopes the input into the positive support
    /// range, then a one-axis node over log-spaced anchors interpolates the
    /// reciprocal. Composing the two dependent fragments means the result
    /// lags the input by two frames.
    pub fn invert(&mut self, name: &str, input: &Signal) -> Result<Signal, BuildError> {
        let scoped = self.buffer(input, &format!("{name}/scoped"), INVERT_MIN, INVERT_MAX)?;

        let anchors: Vec<(f32, f32)> = INVERT_ANCHORS.iter().map(|&t| (t, 1.0 / t)).collect();
        let out = self.allocate(name, piecewise_linear(&anchors, scoped.default))?;

        let mut children: Vec<(f32, NodeId)> = Vec::with_capacity(anchors.len());
        for &(threshold, value) in &anchors {
            let leaf = self.setter(&out, value);
            children.push((threshold, leaf));
        }
        let node = self.one_axis(&scoped, children)?;
        self.append_to_root(node);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_computes_static_default() {
        let mut session = BuildSession::new();
        let a = session.well_known("a", 2.0);
        let b = session.well_known("b", 3.0);
        let sum = session
            .add("sum", &[(a.clone(), 1.0), (b.clone(), 1.0)], 0.0)
            .expect("add");
        assert_eq!(sum.default, 5.0);

        let biased = session
            .add("biased", &[(a, 2.0)], 10.0)
            .expect("add with offset");
        assert_eq!(biased.default, 14.0);
    }

    #[test]
    fn add_fuses_single_identity_term() {
        let mut session = BuildSession::new();
        let a = session.well_known("a", 2.0);
        let fused = session.add("sum", &[(a.clone(), 1.0)], 0.0).expect("add");
        assert_eq!(fused, a, "identity add must return the input unchanged");
        assert!(
            session.registry().default_of("sum").is_none(),
            "fusion must not allocate an output signal"
        );
    }

    #[test]
    fn subtract_defaults_follow_inputs() {
        let mut session = BuildSession::new();
        let a = session.well_known("a", 7.0);
        let b = session.well_known("b", 3.0);
        let diff = session.subtract("diff", &a, &b).expect("subtract");
        assert_eq!(diff.default, 4.0);
    }

    #[test]
    fn multiply_const_defaults_scale() {
        let mut session = BuildSession::new();
        let a = session.well_known("a", 4.0);
        let m = session.multiply_const("m", &a, 3.0).expect("multiply");
        assert_eq!(m.default, 12.0);
    }

    #[test]
    fn map_default_is_clamped_lerp() {
        let mut session = BuildSession::new();
        let mid = session.well_known("mid", 0.5);
        let below = session.well_known("below", -1.0);
        let mapped = session
            .map("mapped", &mid, 0.0, 1.0, 0.0, 100.0)
            .expect("map");
        assert_eq!(mapped.default, 50.0);
        let clamped = session
            .map("clamped", &below, 0.0, 1.0, 0.0, 100.0)
            .expect("map");
        assert_eq!(clamped.default, 0.0);
    }

    #[test]
    fn map_rejects_degenerate_range() {
        let mut session = BuildSession::new();
        let input = session.well_known("input", 0.0);
        let err = session
            .map("bad", &input, 1.0, 1.0, 0.0, 100.0)
            .expect_err("degenerate input range must fail");
        assert!(matches!(err, BuildError::DuplicateThreshold { .. }));
    }

    #[test]
    fn invert_default_tracks_reciprocal() {
        let mut session = BuildSession::new();
        let a = session.well_known("a", 2.0);
        let inv = session.invert("inv", &a).expect("invert");
        assert!((inv.default - 0.5).abs() < 1e-6);

        let tiny = session.well_known("tiny", 0.0);
        let clamped = session.invert("inv_tiny", &tiny).expect("invert");
        assert!((clamped.default - 1.0 / INVERT_MIN).abs() < 1e-2);
    }
}
