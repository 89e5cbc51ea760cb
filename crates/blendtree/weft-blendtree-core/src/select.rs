//! Priority-ordered guarded assignment with previous-value retention.

use weft_api_core::{BuildError, NodeId, Remap, Signal};

use crate::boolean::Condition;
use crate::session::{BuildSession, OPERATING_RANGE};

impl BuildSession {
    /// Assign the first `value` whose guard is true this frame.
    ///
    /// Cases are folded right-to-left into nested guarded fragments, each
    /// wrapping the next as its false branch. The innermost else is a
    /// self-copier, so when no guard is true the output holds whatever it
    /// was last frame (latch semantics) rather than snapping back to its
    /// default.
    ///
    /// A guard of `None` is statically always true: such a case seeds the
    /// output's default but adds no runtime branch, since the latch already
    /// retains the value. The default is the first statically-true case's
    /// value, or 0 when every guard is statically false.
    pub fn set_value_with_conditions(
        &mut self,
        name: &str,
        cases: &[(f32, Option<Condition>)],
    ) -> Result<Signal, BuildError> {
        if cases.is_empty() {
            return Err(BuildError::EmptyCases);
        }
        let default = cases
            .iter()
            .find(|(_, guard)| guard.as_ref().map_or(true, |c| c.default_is_true()))
            .map(|(value, _)| *value)
            .unwrap_or(0.0);
        let out = self.allocate(name, default)?;

        let latch = self.copier(&out, &out, Remap::identity(-OPERATING_RANGE, OPERATING_RANGE));
        let mut selected = latch;
        for (value, guard) in cases.iter().rev() {
            let Some(cond) = guard else { continue };
            let when_true = self.setter(&out, *value);
            selected = cond.realize(self, when_true, selected)?;
        }
        self.append_to_root(selected);
        Ok(out)
    }

    /// Raw-motion variant: select between already-built fragments.
    ///
    /// Skips signal allocation entirely; the guarded chain composes
    /// straight into the accumulator with a caller-provided final else
    /// branch. Returns the appended fragment.
    pub fn select_motions(
        &mut self,
        cases: &[(NodeId, Condition)],
        otherwise: NodeId,
    ) -> Result<NodeId, BuildError> {
        if cases.is_empty() {
            return Err(BuildError::EmptyCases);
        }
        let mut selected = otherwise;
        for (fragment, guard) in cases.iter().rev() {
            selected = guard.realize(self, *fragment, selected)?;
        }
        self.append_to_root(selected);
        Ok(selected)
    }
}
