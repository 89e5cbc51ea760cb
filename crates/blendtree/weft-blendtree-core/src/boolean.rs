//! Boolean combinators: deferred branch selection over blend nodes.
//!
//! A [`Condition`] is not a value the evaluator ever sees. It is a recipe
//! that, given a true branch and a false branch, builds the node selecting
//! between them; composition rewrites the recipe algebraically and no
//! intermediate motion is materialized until [`Condition::realize`] runs.

use weft_api_core::{BuildError, NodeId, Signal};

use crate::session::BuildSession;

/// Leaf and composite shapes of a condition expression.
///
/// Kept as an explicit tree walked by the realizer so the algebra stays
/// inspectable and referentially transparent.
#[derive(Clone, Debug)]
pub(crate) enum CondExpr {
    Always(bool),
    /// One-axis band: false at `lo`, true at `mid`, false at `hi`.
    Band {
        control: Signal,
        lo: f32,
        mid: f32,
        hi: f32,
    },
    /// One-axis step between two adjacent thresholds.
    Step {
        control: Signal,
        false_at: f32,
        true_at: f32,
    },
    /// Two-axis anchor-point half-plane test.
    HalfPlane {
        x: Signal,
        y: Signal,
        true_anchor: [f32; 2],
        false_anchors: Vec<[f32; 2]>,
    },
    Not(Box<CondExpr>),
    And(Box<CondExpr>, Box<CondExpr>),
    Or(Box<CondExpr>, Box<CondExpr>),
    Xor(Box<CondExpr>, Box<CondExpr>),
}

/// A deferred boolean expression over signals, carrying its statically
/// known truth value at the signals' declared defaults.
#[derive(Clone, Debug)]
pub struct Condition {
    expr: CondExpr,
    default_is_true: bool,
}

impl Condition {
    pub(crate) fn leaf(expr: CondExpr, default_is_true: bool) -> Self {
        Condition {
            expr,
            default_is_true,
        }
    }

    /// Constant condition.
    pub fn always(value: bool) -> Self {
        Condition::leaf(CondExpr::Always(value), value)
    }

    /// Truth value at the signals' declared defaults.
    pub fn default_is_true(&self) -> bool {
        self.default_is_true
    }

    pub fn not(self) -> Self {
        Condition {
            default_is_true: !self.default_is_true,
            expr: CondExpr::Not(Box::new(self.expr)),
        }
    }

    pub fn and(self, other: Condition) -> Self {
        Condition {
            default_is_true: self.default_is_true && other.default_is_true,
            expr: CondExpr::And(Box::new(self.expr), Box::new(other.expr)),
        }
    }

    pub fn or(self, other: Condition) -> Self {
        Condition {
            default_is_true: self.default_is_true || other.default_is_true,
            expr: CondExpr::Or(Box::new(self.expr), Box::new(other.expr)),
        }
    }

    pub fn xor(self, other: Condition) -> Self {
        Condition {
            default_is_true: self.default_is_true != other.default_is_true,
            expr: CondExpr::Xor(Box::new(self.expr), Box::new(other.expr)),
        }
    }

    /// Build the node selecting `when_true` or `when_false`.
    ///
    /// Referentially transparent: callable any number of times with
    /// different branches, and branch ids may be shared between
    /// sub-expressions (the arena forms a DAG, not a tree).
    pub fn realize(
        &self,
        session: &mut BuildSession,
        when_true: NodeId,
        when_false: NodeId,
    ) -> Result<NodeId, BuildError> {
        realize_expr(&self.expr, session, when_true, when_false)
    }
}

fn realize_expr(
    expr: &CondExpr,
    session: &mut BuildSession,
    t: NodeId,
    f: NodeId,
) -> Result<NodeId, BuildError> {
    match expr {
        CondExpr::Always(true) => Ok(t),
        CondExpr::Always(false) => Ok(f),
        CondExpr::Band {
            control,
            lo,
            mid,
            hi,
        } => session.one_axis(control, vec![(*lo, f), (*mid, t), (*hi, f)]),
        CondExpr::Step {
            control,
            false_at,
            true_at,
        } => session.one_axis(control, vec![(*false_at, f), (*true_at, t)]),
        CondExpr::HalfPlane {
            x,
            y,
            true_anchor,
            false_anchors,
        } => {
            let mut children: Vec<([f32; 2], NodeId)> =
                false_anchors.iter().map(|&anchor| (anchor, f)).collect();
            children.push((*true_anchor, t));
            session.two_axis(x, y, children)
        }
        CondExpr::Not(inner) => realize_expr(inner, session, f, t),
        CondExpr::And(a, b) => {
            let rest = realize_expr(b, session, t, f)?;
            realize_expr(a, session, rest, f)
        }
        CondExpr::Or(a, b) => {
            let rest = realize_expr(b, session, t, f)?;
            realize_expr(a, session, t, rest)
        }
        CondExpr::Xor(a, b) => {
            let swapped = realize_expr(b, session, f, t)?;
            let straight = realize_expr(b, session, t, f)?;
            realize_expr(a, session, swapped, straight)
        }
    }
}
