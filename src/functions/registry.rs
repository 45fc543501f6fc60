use crate::error::{EvolveError, Result};
use crate::functions::indicators::{MaCrossoverBuilder, MomentumBuilder};
use crate::types::ResolvedSignal;
use std::{collections::HashMap, sync::Arc};

use super::traits::{SignalBuilder, SignalGenerator};

/// Named signal builders, looked up when a genome is evaluated
pub struct StrategyRegistry {
    builders: HashMap<String, Arc<dyn SignalBuilder>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_builtins();
        registry
    }

    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    pub fn register(&mut self, builder: Arc<dyn SignalBuilder>) {
        self.builders.insert(builder.alias().to_string(), builder);
    }

    pub fn get_builder(&self, name: &str) -> Result<Arc<dyn SignalBuilder>> {
        self.builders
            .get(name)
            .cloned()
            .ok_or_else(|| EvolveError::UnknownStrategy(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.builders.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve a signal to its executable generator
    pub fn build(&self, signal: &ResolvedSignal) -> anyhow::Result<Box<dyn SignalGenerator>> {
        let builder = self.get_builder(&signal.strategy)?;
        builder.build(&signal.params)
    }

    fn register_builtins(&mut self) {
        let builders: Vec<Arc<dyn SignalBuilder>> =
            vec![Arc::new(MaCrossoverBuilder), Arc::new(MomentumBuilder)];
        for builder in builders {
            self.register(builder);
        }
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SignalKind;

    #[test]
    fn test_registry_builtin_retrieval() {
        let registry = StrategyRegistry::new();
        let builder = registry.get_builder("ma_crossover").unwrap();
        assert_eq!(builder.alias(), "ma_crossover");
        assert_eq!(builder.parameter_names(), &["ma_short", "ma_long"]);
        assert_eq!(registry.names(), vec!["ma_crossover", "momentum"]);
    }

    #[test]
    fn test_unknown_strategy() {
        let registry = StrategyRegistry::new();
        assert!(matches!(
            registry.get_builder("NonExistent"),
            Err(EvolveError::UnknownStrategy(_))
        ));
        assert!(!registry.contains("NonExistent"));
    }

    #[test]
    fn test_build_from_resolved_signal() {
        let registry = StrategyRegistry::new();
        let signal = ResolvedSignal {
            strategy: "momentum".to_string(),
            signal_kind: SignalKind::Long,
            params: HashMap::from([("period".to_string(), 2)]),
        };
        let generator = registry.build(&signal).unwrap();
        assert_eq!(generator.calculate(&[1.0, 2.0, 3.0]).len(), 3);
    }
}
