//! Blendtree math: compiles arithmetic and boolean signal derivations into a
//! frozen graph of interpolation-only blend nodes.
//!
//! The target evaluator supports exactly three primitive operations --
//! weighted sums, piecewise-linear interpolation, and anchor-point proximity
//! blending -- with no general arithmetic, branching, or memory. Every
//! operator here is therefore re-derived as an interpolation trick:
//! comparisons become epsilon-stepped thresholds, boolean expressions become
//! deferred branch-selection recipes, and conditional assignment gains latch
//! semantics from a self-copying leaf. The modules are organised to keep the
//! derivation layers separate:
//!
//! - [`registry`] allocates named signals with declared defaults.
//! - [`session`] owns the node arena and the root accumulator.
//! - [`nodes`] builds the three primitive node kinds and motion leaves.
//! - [`arith`] derives add/subtract/multiply/map/invert/buffer signals.
//! - [`compare`] and [`boolean`] build and compose [`Condition`]s.
//! - [`select`] folds guarded assignments with previous-value retention.
//! - [`surgery`] rewrites already-built fragments in place.
//! - [`sim`] is a reference evaluator used to validate compiled graphs.
//!
//! Integration code should primarily interact with [`BuildSession`] and
//! [`Condition`].

pub mod arith;
pub mod boolean;
pub mod compare;
pub mod interp;
pub mod nodes;
pub mod registry;
pub mod select;
pub mod session;
pub mod sim;
pub mod surgery;

pub use boolean::Condition;
pub use registry::SignalRegistry;
pub use session::{BuildSession, ALWAYS_ONE, OPERATING_RANGE};
pub use sim::Evaluator;
pub use weft_api_core::{BlendKind, BuildError, DirectChild, Graph, Motion, NodeId, Remap, Signal};
