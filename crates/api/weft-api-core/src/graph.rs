//! The frozen blend graph handed to evaluators.

use serde::{Deserialize, Serialize};

use crate::motion::Motion;
use crate::signal::Signal;

/// Index of a node in the graph's arena.
///
/// Ids are dense and never invalidated; surgery rewrites a slot in place
/// rather than removing it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One child of a `Direct` node: a subtree scaled by the current value of
/// the `weight` signal.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DirectChild {
    pub weight: String,
    pub child: NodeId,
}

/// A graph element blending children with one of three fixed schemes.
///
/// - `Direct`: output is the sum of each child scaled by its weight
///   signal's current value (optionally normalized by the weight total).
/// - `OneAxis`: piecewise-linear interpolation between the two children
///   whose thresholds bracket the control value, clamped to the boundary
///   child outside the range.
/// - `TwoAxis`: proximity blend over anchors in `(control_x, control_y)`
///   space. The exact metric is owned by the evaluator; the only property
///   relied upon is that dominance concentrates on the nearest anchor.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum BlendKind {
    Motion(Motion),
    Direct {
        children: Vec<DirectChild>,
        normalized: bool,
    },
    OneAxis {
        control: String,
        children: Vec<(f32, NodeId)>,
    },
    TwoAxis {
        control_x: String,
        control_y: String,
        children: Vec<([f32; 2], NodeId)>,
    },
}

/// The frozen artifact produced by a build session.
///
/// `nodes` is the arena addressed by [`NodeId`]; `root` is the accumulator
/// every top-level fragment was appended into; `signals` lists every signal
/// the build declared, with defaults, in registration order so an evaluator
/// can seed its bindings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Graph {
    pub nodes: Vec<BlendKind>,
    pub root: NodeId,
    pub signals: Vec<Signal>,
}

impl Graph {
    pub fn node(&self, id: NodeId) -> &BlendKind {
        &self.nodes[id.index()]
    }

    /// Declared default of a signal, if the build registered it.
    pub fn default_of(&self, name: &str) -> Option<f32> {
        self.signals
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.default)
    }
}
