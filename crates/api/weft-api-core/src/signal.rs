//! Named scalar signals sampled by the evaluator once per frame.

use serde::{Deserialize, Serialize};

/// A named, float-valued input or output with a statically known default.
///
/// Signals are allocated once by the registry and referenced by name
/// everywhere else; the name is the stable identity for the remainder of a
/// build and is usable as a map key.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Signal {
    pub name: String,
    pub default: f32,
}

impl Signal {
    pub fn new(name: impl Into<String>, default: f32) -> Self {
        Self {
            name: name.into(),
            default,
        }
    }
}
