//! Primitive node builders: motion leaves and the three blend node kinds.

use weft_api_core::{BlendKind, BuildError, DirectChild, Motion, NodeId, Remap, Signal};

use crate::session::BuildSession;

impl BuildSession {
    /// Leaf that forces `target` to a constant.
    pub fn setter(&mut self, target: &Signal, value: f32) -> NodeId {
        self.push(BlendKind::Motion(Motion::Set {
            target: target.name.clone(),
            value,
        }))
    }

    /// Leaf that mirrors `source` into `target` through `remap`.
    pub fn copier(&mut self, target: &Signal, source: &Signal, remap: Remap) -> NodeId {
        self.push(BlendKind::Motion(Motion::Copy {
            target: target.name.clone(),
            source: source.name.clone(),
            remap,
        }))
    }

    /// Weighted-sum node over explicit children.
    pub fn direct(
        &mut self,
        children: Vec<(Signal, NodeId)>,
        normalized: bool,
    ) -> Result<NodeId, BuildError> {
        if children.is_empty() {
            return Err(BuildError::EmptyNode);
        }
        let children = children
            .into_iter()
            .map(|(weight, child)| DirectChild {
                weight: weight.name,
                child,
            })
            .collect();
        Ok(self.push(BlendKind::Direct {
            children,
            normalized,
        }))
    }

    /// Piecewise-linear node over strictly distinct thresholds.
    ///
    /// Children are sorted by threshold here; evaluation interpolates
    /// between the bracketing pair and clamps to the boundary child outside
    /// the range. That clamping is the mechanism step functions are built
    /// from, so duplicate or non-finite thresholds fail loudly.
    pub fn one_axis(
        &mut self,
        control: &Signal,
        mut children: Vec<(f32, NodeId)>,
    ) -> Result<NodeId, BuildError> {
        if children.is_empty() {
            return Err(BuildError::EmptyNode);
        }
        for &(threshold, _) in &children {
            if !threshold.is_finite() {
                return Err(BuildError::NonFiniteThreshold {
                    control: control.name.clone(),
                    threshold,
                });
            }
        }
        children.sort_by(|a, b| a.0.total_cmp(&b.0));
        for pair in children.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(BuildError::DuplicateThreshold {
                    control: control.name.clone(),
                    threshold: pair[0].0,
                });
            }
        }
        Ok(self.push(BlendKind::OneAxis {
            control: control.name.clone(),
            children,
        }))
    }

    /// Anchor-point node over two control signals.
    ///
    /// Anchors are arbitrary points in control space; a builder choosing
    /// them must guarantee that exactly one anchor dominates over the
    /// input domain it claims to support.
    pub fn two_axis(
        &mut self,
        control_x: &Signal,
        control_y: &Signal,
        children: Vec<([f32; 2], NodeId)>,
    ) -> Result<NodeId, BuildError> {
        if children.is_empty() {
            return Err(BuildError::EmptyNode);
        }
        Ok(self.push(BlendKind::TwoAxis {
            control_x: control_x.name.clone(),
            control_y: control_y.name.clone(),
            children,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_axis_sorts_children() {
        let mut session = BuildSession::new();
        let control = session.allocate("c", 0.0).expect("finite default");
        let out = session.allocate("out", 0.0).expect("finite default");
        let hi = session.setter(&out, 1.0);
        let lo = session.setter(&out, 0.0);
        let node = session
            .one_axis(&control, vec![(1.0, hi), (0.0, lo)])
            .expect("distinct thresholds");
        match session.nodes[node.index()].clone() {
            BlendKind::OneAxis { children, .. } => {
                assert_eq!(children[0].0, 0.0);
                assert_eq!(children[1].0, 1.0);
            }
            other => panic!("expected one-axis node, got {other:?}"),
        }
    }

    #[test]
    fn one_axis_rejects_duplicate_thresholds() {
        let mut session = BuildSession::new();
        let control = session.allocate("c", 0.0).expect("finite default");
        let out = session.allocate("out", 0.0).expect("finite default");
        let a = session.setter(&out, 1.0);
        let b = session.setter(&out, 2.0);
        let err = session
            .one_axis(&control, vec![(0.5, a), (0.5, b)])
            .expect_err("duplicate thresholds must fail");
        assert!(matches!(err, BuildError::DuplicateThreshold { .. }));
    }

    #[test]
    fn one_axis_rejects_non_finite_thresholds() {
        let mut session = BuildSession::new();
        let control = session.allocate("c", 0.0).expect("finite default");
        let out = session.allocate("out", 0.0).expect("finite default");
        let a = session.setter(&out, 1.0);
        let err = session
            .one_axis(&control, vec![(f32::NAN, a)])
            .expect_err("NaN threshold must fail");
        assert!(matches!(err, BuildError::NonFiniteThreshold { .. }));
    }

    #[test]
    fn empty_nodes_are_rejected() {
        let mut session = BuildSession::new();
        let control = session.allocate("c", 0.0).expect("finite default");
        assert!(matches!(
            session.direct(vec![], false),
            Err(BuildError::EmptyNode)
        ));
        assert!(matches!(
            session.one_axis(&control, vec![]),
            Err(BuildError::EmptyNode)
        ));
        let other = session.allocate("d", 0.0).expect("finite default");
        assert!(matches!(
            session.two_axis(&control, &other, vec![]),
            Err(BuildError::EmptyNode)
        ));
    }
}
