//! Construction-time failures.

use thiserror::Error;

/// Precondition violations raised while building a graph.
///
/// These indicate a programming error in the caller and surface
/// immediately. Domain-contract violations (values outside a builder's
/// documented operating range) are deliberately absent: the target runtime
/// has no error channel, so such graphs evaluate to wrong values rather
/// than failing.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("signal '{name}' declared with non-finite default {value}")]
    NonFiniteDefault { name: String, value: f32 },

    #[error("one-axis node on '{control}' repeats threshold {threshold}")]
    DuplicateThreshold { control: String, threshold: f32 },

    #[error("one-axis node on '{control}' has non-finite threshold {threshold}")]
    NonFiniteThreshold { control: String, threshold: f32 },

    #[error("blend node built with no children")]
    EmptyNode,

    #[error("conditional assignment built with no cases")]
    EmptyCases,
}
