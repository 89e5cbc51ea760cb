//! Reference evaluator: fixed-step frame simulation of a frozen graph.
//!
//! The production evaluator is an external runtime; this one exists so
//! compiled graphs can be validated frame-by-frame. Semantics:
//!
//! - Every read during a frame samples the previous frame's values, and
//!   writes land together afterwards. That one-frame pipeline is exactly
//!   what the buffer and latch builders rely on.
//! - `Direct` is a weighted sum (optionally normalized by the weight
//!   total), `OneAxis` piecewise-linear with boundary clamping.
//! - `TwoAxis` gives all weight to the nearest anchor, with distances in
//!   f64. This is the limiting case of any proximity metric whose
//!   dominance concentrates on the nearest anchor -- the only property the
//!   compiler's anchor placements rely on. Ties keep the earliest child.
//!
//! Signals no fragment drives keep their current value across frames;
//! driven targets are replaced wholesale by the frame's blended total.

use hashbrown::HashMap;

use crate::interp::one_axis_weights;
use weft_api_core::{BlendKind, Graph, Motion, NodeId};

/// Contributions below this weight are dropped, mirroring runtimes that
/// cull inactive blend children.
const WEIGHT_EPSILON: f32 = 1e-6;

#[derive(Debug, Default)]
pub struct Evaluator {
    values: HashMap<String, f32>,
}

impl Evaluator {
    /// Seed every declared signal at its default.
    pub fn new(graph: &Graph) -> Self {
        let values = graph
            .signals
            .iter()
            .map(|signal| (signal.name.clone(), signal.default))
            .collect();
        Evaluator { values }
    }

    /// Override a signal, as the host runtime does for driven inputs.
    pub fn set(&mut self, name: &str, value: f32) {
        self.values.insert(name.to_string(), value);
    }

    /// Current value of a signal; unknown names read as 0.
    pub fn get(&self, name: &str) -> f32 {
        self.values.get(name).copied().unwrap_or(0.0)
    }

    /// Advance one frame.
    pub fn step(&mut self, graph: &Graph) {
        let mut writes: HashMap<String, f32> = HashMap::new();
        self.walk(graph, graph.root, 1.0, &mut writes);
        for (name, value) in writes {
            self.values.insert(name, value);
        }
    }

    /// Advance `frames` frames.
    pub fn run(&mut self, graph: &Graph, frames: usize) {
        for _ in 0..frames {
            self.step(graph);
        }
    }

    fn walk(&self, graph: &Graph, id: NodeId, weight: f32, writes: &mut HashMap<String, f32>) {
        if weight.abs() <= WEIGHT_EPSILON {
            return;
        }
        match graph.node(id) {
            BlendKind::Motion(Motion::Set { target, value }) => {
                *writes.entry(target.clone()).or_insert(0.0) += weight * value;
            }
            BlendKind::Motion(Motion::Copy {
                target,
                source,
                remap,
            }) => {
                *writes.entry(target.clone()).or_insert(0.0) += weight * remap.apply(self.get(source));
            }
            BlendKind::Direct {
                children,
                normalized,
            } => {
                let mut scale = 1.0;
                if *normalized {
                    let total: f32 = children.iter().map(|c| self.get(&c.weight)).sum();
                    if total.abs() > WEIGHT_EPSILON {
                        scale = 1.0 / total;
                    }
                }
                for child in children {
                    let w = weight * self.get(&child.weight) * scale;
                    self.walk(graph, child.child, w, writes);
                }
            }
            BlendKind::OneAxis { control, children } => {
                let thresholds: Vec<f32> = children.iter().map(|&(t, _)| t).collect();
                let x = self.get(control);
                for (index, w) in one_axis_weights(&thresholds, x) {
                    self.walk(graph, children[index].1, weight * w, writes);
                }
            }
            BlendKind::TwoAxis {
                control_x,
                control_y,
                children,
            } => {
                let qx = self.get(control_x) as f64;
                let qy = self.get(control_y) as f64;
                let nearest = children.iter().min_by(|a, b| {
                    distance_sq(qx, qy, a.0).total_cmp(&distance_sq(qx, qy, b.0))
                });
                if let Some(&(_, child)) = nearest {
                    self.walk(graph, child, weight, writes);
                }
            }
        }
    }
}

fn distance_sq(qx: f64, qy: f64, anchor: [f32; 2]) -> f64 {
    let dx = qx - anchor[0] as f64;
    let dy = qy - anchor[1] as f64;
    dx * dx + dy * dy
}
