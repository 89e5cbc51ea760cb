//! weft-api-core: the contract between the blendtree compiler and evaluators.
//!
//! A build session emits a frozen [`Graph`]: an arena of blend nodes rooted at
//! a single accumulator, plus the table of every [`Signal`] the build
//! declared. Evaluators re-run the graph once per frame; the only semantics
//! they need are the three blend schemes described on [`BlendKind`].

pub mod error;
pub mod graph;
pub mod motion;
pub mod signal;

pub use error::BuildError;
pub use graph::{BlendKind, DirectChild, Graph, NodeId};
pub use motion::{Motion, Remap};
pub use signal::Signal;
