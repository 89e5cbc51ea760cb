//! Post-hoc rewriting of already-built fragments.
//!
//! Both operations rewrite arena slots in place using the leaf side table
//! maintained during construction, so the guard structure above each leaf
//! survives untouched and no re-scan of the graph is needed. They must run
//! before [`BuildSession::finish`] freezes the graph.

use log::debug;
use weft_api_core::{BlendKind, DirectChild, Motion, NodeId, Signal};

use crate::session::BuildSession;

fn leaf_matches(motion: &Motion, at_values: Option<&[f32]>) -> bool {
    match (motion, at_values) {
        (_, None) => true,
        (Motion::Set { value, .. }, Some(values)) => values.iter().any(|v| v == value),
        (Motion::Copy { .. }, Some(_)) => false,
    }
}

fn retarget(motion: Motion, new_target: &str) -> Motion {
    match motion {
        Motion::Set { value, .. } => Motion::Set {
            target: new_target.to_string(),
            value,
        },
        Motion::Copy { source, remap, .. } => Motion::Copy {
            target: new_target.to_string(),
            source,
            remap,
        },
    }
}

impl BuildSession {
    /// Scale every motion leaf driving `target` through `factor`.
    ///
    /// `at_values` narrows the rewrite to setter leaves at those exact
    /// constants; `None` rewrites every leaf, copiers included. Each match
    /// is replaced by a nested direct fragment gating the original leaf by
    /// `factor`. Returns the number of leaves rewritten.
    pub fn multiply_in_place(
        &mut self,
        target: &Signal,
        factor: &Signal,
        at_values: Option<&[f32]>,
    ) -> usize {
        let candidates = self.leaf_candidates(target);
        let mut rewritten = 0;
        for id in candidates {
            let Some(motion) = self.take_matching_leaf(id, target, at_values) else {
                continue;
            };
            let inner = self.push(BlendKind::Motion(motion));
            self.nodes[id.index()] = BlendKind::Direct {
                children: vec![DirectChild {
                    weight: factor.name.clone(),
                    child: inner,
                }],
                normalized: false,
            };
            rewritten += 1;
        }
        debug!(
            "multiply_in_place: {rewritten} leaves of '{}' now scale through '{}'",
            target.name, factor.name
        );
        rewritten
    }

    /// Mirror every motion leaf driving `target` onto `mirror` as well.
    ///
    /// Each match becomes a direct fragment carrying the original leaf plus
    /// a retargeted clone, both weighted by always-one, so `mirror`
    /// receives the same contributions as `target` without re-deriving the
    /// guard structure. Returns the number of leaves rewritten.
    pub fn copy_in_place(
        &mut self,
        target: &Signal,
        mirror: &Signal,
        at_values: Option<&[f32]>,
    ) -> usize {
        let candidates = self.leaf_candidates(target);
        let mut rewritten = 0;
        for id in candidates {
            let Some(motion) = self.take_matching_leaf(id, target, at_values) else {
                continue;
            };
            let mirrored = retarget(motion.clone(), &mirror.name);
            let original = self.push(BlendKind::Motion(motion));
            let copy = self.push(BlendKind::Motion(mirrored));
            let one = self.one().name.clone();
            self.nodes[id.index()] = BlendKind::Direct {
                children: vec![
                    DirectChild {
                        weight: one.clone(),
                        child: original,
                    },
                    DirectChild {
                        weight: one,
                        child: copy,
                    },
                ],
                normalized: false,
            };
            rewritten += 1;
        }
        debug!(
            "copy_in_place: {rewritten} leaves of '{}' now mirror onto '{}'",
            target.name, mirror.name
        );
        rewritten
    }

    fn leaf_candidates(&self, target: &Signal) -> Vec<NodeId> {
        self.leaves_by_target
            .get(target.name.as_str())
            .cloned()
            .unwrap_or_default()
    }

    /// Detach the motion at `id` from the leaf index if it matches,
    /// returning it for re-interning under a rewritten slot.
    fn take_matching_leaf(
        &mut self,
        id: NodeId,
        target: &Signal,
        at_values: Option<&[f32]>,
    ) -> Option<Motion> {
        let motion = match &self.nodes[id.index()] {
            BlendKind::Motion(motion) if leaf_matches(motion, at_values) => motion.clone(),
            _ => return None,
        };
        if let Some(leaves) = self.leaves_by_target.get_mut(target.name.as_str()) {
            leaves.retain(|&leaf| leaf != id);
        }
        Some(motion)
    }
}
