//! Signal allocation: unique names, declared defaults.

use hashbrown::HashMap;
use log::debug;
use weft_api_core::{BuildError, Signal};

/// Allocates named float signals and keeps the session's signal table.
///
/// Allocation dedupes by uniquifying the requested name with a numeric
/// suffix; well-known signals bind to evaluator-provided inputs verbatim.
/// Every signal handed out is recorded so the frozen graph can publish the
/// complete table in registration order.
#[derive(Debug, Default)]
pub struct SignalRegistry {
    defaults: HashMap<String, f32>,
    order: Vec<String>,
}

impl SignalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new signal, uniquifying `name` if it is already taken.
    ///
    /// A non-finite default is a caller bug and fails immediately.
    pub fn allocate(&mut self, name: &str, default: f32) -> Result<Signal, BuildError> {
        if !default.is_finite() {
            return Err(BuildError::NonFiniteDefault {
                name: name.to_string(),
                value: default,
            });
        }
        let unique = self.unique_name(name);
        debug!("allocate signal '{unique}' (default {default})");
        self.record(unique.clone(), default);
        Ok(Signal::new(unique, default))
    }

    /// Bind a signal provided by the host runtime.
    ///
    /// The name is used verbatim; binding the same name twice returns the
    /// originally declared default without any collision check.
    pub fn well_known(&mut self, name: &str, default: f32) -> Signal {
        if let Some(&existing) = self.defaults.get(name) {
            return Signal::new(name, existing);
        }
        self.record(name.to_string(), default);
        Signal::new(name, default)
    }

    /// Declared default of a signal, if registered.
    pub fn default_of(&self, name: &str) -> Option<f32> {
        self.defaults.get(name).copied()
    }

    /// Every registered signal, in registration order.
    pub fn signals(&self) -> Vec<Signal> {
        self.order
            .iter()
            .map(|name| Signal::new(name.clone(), self.defaults[name]))
            .collect()
    }

    fn record(&mut self, name: String, default: f32) {
        self.defaults.insert(name.clone(), default);
        self.order.push(name);
    }

    fn unique_name(&self, name: &str) -> String {
        if !self.defaults.contains_key(name) {
            return name.to_string();
        }
        let mut suffix = 1u32;
        loop {
            let candidate = format!("{name}_{suffix}");
            if !self.defaults.contains_key(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_dedupes_names() {
        let mut registry = SignalRegistry::new();
        let a = registry.allocate("gesture", 0.0).expect("finite default");
        let b = registry.allocate("gesture", 1.0).expect("finite default");
        let c = registry.allocate("gesture", 2.0).expect("finite default");
        assert_eq!(a.name, "gesture");
        assert_eq!(b.name, "gesture_1");
        assert_eq!(c.name, "gesture_2");
        assert_eq!(registry.default_of("gesture_1"), Some(1.0));
    }

    #[test]
    fn allocate_rejects_non_finite_defaults() {
        let mut registry = SignalRegistry::new();
        assert!(matches!(
            registry.allocate("bad", f32::NAN),
            Err(BuildError::NonFiniteDefault { .. })
        ));
        assert!(matches!(
            registry.allocate("bad", f32::INFINITY),
            Err(BuildError::NonFiniteDefault { .. })
        ));
    }

    #[test]
    fn well_known_keeps_first_default() {
        let mut registry = SignalRegistry::new();
        let first = registry.well_known("viseme", 3.0);
        let second = registry.well_known("viseme", 9.0);
        assert_eq!(first.default, 3.0);
        assert_eq!(second.default, 3.0);
        assert_eq!(registry.signals().len(), 1);
    }

    #[test]
    fn signals_preserve_registration_order() {
        let mut registry = SignalRegistry::new();
        registry.allocate("a", 0.0).expect("finite default");
        registry.well_known("b", 1.0);
        registry.allocate("c", 2.0).expect("finite default");
        let names: Vec<_> = registry.signals().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
