//! Build-session context: the node arena and the root accumulator.

use hashbrown::HashMap;
use log::debug;
use weft_api_core::{BlendKind, BuildError, DirectChild, Graph, NodeId, Signal};

use crate::registry::SignalRegistry;

/// Name of the constant-one weight signal every session registers.
///
/// The evaluator never drives it, so it holds its default of 1 and makes
/// root-level contributions unconditional.
pub const ALWAYS_ONE: &str = "weft/one";

/// Input range every scaled or identity copier claims by default, and the
/// half-width of the square domain the two-signal comparator operates on.
/// Values outside evaluate clamped: wrong, not erroring.
pub const OPERATING_RANGE: f32 = 10_000.0;

/// Session-scoped construction context.
///
/// Owns the signal registry, the node arena, and the child list of the root
/// accumulator. Every top-level fragment is appended weighted by the
/// always-one signal; append order is the only construction order, and no
/// node is ever removed -- surgery rewrites arena slots in place. Sessions
/// are independent: building two graphs concurrently from two sessions
/// shares no state.
#[derive(Debug)]
pub struct BuildSession {
    pub(crate) registry: SignalRegistry,
    pub(crate) nodes: Vec<BlendKind>,
    pub(crate) root_children: Vec<DirectChild>,
    pub(crate) leaves_by_target: HashMap<String, Vec<NodeId>>,
    one: Signal,
}

impl BuildSession {
    pub fn new() -> Self {
        let mut registry = SignalRegistry::new();
        let one = registry.well_known(ALWAYS_ONE, 1.0);
        BuildSession {
            registry,
            nodes: Vec::new(),
            root_children: Vec::new(),
            leaves_by_target: HashMap::new(),
            one,
        }
    }

    /// The constant-one weight signal.
    pub fn one(&self) -> &Signal {
        &self.one
    }

    pub fn registry(&self) -> &SignalRegistry {
        &self.registry
    }

    /// Allocate a fresh output signal (deduped name, finite default).
    pub fn allocate(&mut self, name: &str, default: f32) -> Result<Signal, BuildError> {
        self.registry.allocate(name, default)
    }

    /// Bind an evaluator-provided input signal.
    pub fn well_known(&mut self, name: &str, default: f32) -> Signal {
        self.registry.well_known(name, default)
    }

    /// Intern a node into the arena, indexing motion leaves by target.
    pub(crate) fn push(&mut self, kind: BlendKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        if let BlendKind::Motion(motion) = &kind {
            self.leaves_by_target
                .entry(motion.target().to_string())
                .or_default()
                .push(id);
        }
        self.nodes.push(kind);
        id
    }

    /// Append a fragment to the root accumulator, weighted by always-one.
    pub fn append_to_root(&mut self, node: NodeId) {
        debug!("append fragment {node:?} to root accumulator");
        self.root_children.push(DirectChild {
            weight: self.one.name.clone(),
            child: node,
        });
    }

    /// Freeze the accumulated graph.
    ///
    /// The root is materialized as an unnormalized `Direct` node over every
    /// appended fragment; the signal table is published in registration
    /// order. Nothing can be rewritten afterwards.
    pub fn finish(mut self) -> Graph {
        let root = NodeId(self.nodes.len() as u32);
        self.nodes.push(BlendKind::Direct {
            children: self.root_children,
            normalized: false,
        });
        debug!(
            "freeze graph: {} nodes, {} signals",
            self.nodes.len(),
            self.registry.signals().len()
        );
        Graph {
            nodes: self.nodes,
            root,
            signals: self.registry.signals(),
        }
    }
}

impl Default for BuildSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_api_core::Motion;

    #[test]
    fn sessions_are_independent() {
        let mut first = BuildSession::new();
        let mut second = BuildSession::new();
        first.allocate("x", 1.0).expect("finite default");
        let a = second.allocate("x", 2.0).expect("finite default");
        assert_eq!(a.name, "x", "second session must not see the first's names");
    }

    #[test]
    fn finish_publishes_root_and_signals() {
        let mut session = BuildSession::new();
        let out = session.allocate("out", 0.0).expect("finite default");
        let leaf = session.push(BlendKind::Motion(Motion::Set {
            target: out.name.clone(),
            value: 1.0,
        }));
        session.append_to_root(leaf);
        let graph = session.finish();

        assert_eq!(graph.default_of(ALWAYS_ONE), Some(1.0));
        match graph.node(graph.root) {
            BlendKind::Direct { children, .. } => {
                assert_eq!(children.len(), 1);
                assert_eq!(children[0].weight, ALWAYS_ONE);
            }
            other => panic!("root should be a direct node, got {other:?}"),
        }
    }

    #[test]
    fn push_indexes_motion_leaves() {
        let mut session = BuildSession::new();
        let id = session.push(BlendKind::Motion(Motion::Set {
            target: "out".to_string(),
            value: 0.5,
        }));
        assert_eq!(session.leaves_by_target["out"], vec![id]);
    }
}
