//! Genome representation for strategy parameter evolution
//!
//! A genome is an ordered list of signals, each a `StratParameter` holding the
//! integer genes for one named strategy builder plus how its events are
//! traded. Lineage metadata (parents, generation, elite/mutant flags) travels
//! with it so a run's log can be replayed.
//!
//! Genomes never change after creation: operators in
//! [`operators`](super::operators) and [`selection`](super::selection) build
//! new ones.
//!
//! # Example
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use stratevolve::engines::generation::{Parameter, StratParameter};
//! use stratevolve::types::SignalKind;
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let signal = StratParameter::new(
//!     vec![
//!         Parameter::new("ma_short", 5, 100, 20, &mut rng).unwrap(),
//!         Parameter::new("ma_long", 100, 200, 150, &mut rng).unwrap(),
//!     ],
//!     SignalKind::LongShort,
//!     "ma_crossover",
//! );
//! assert_eq!(signal.resolve().params["ma_long"], 150);
//! ```
use super::parameter::Parameter;
use crate::types::{ResolvedSignal, SignalKind};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StratParameter {
    params: Vec<Parameter>,
    #[serde(rename = "signal_type")]
    signal_kind: SignalKind,
    #[serde(skip)]
    strategy: String,
}

impl StratParameter {
    pub fn new(params: Vec<Parameter>, signal_kind: SignalKind, strategy: impl Into<String>) -> Self {
        Self {
            params,
            signal_kind,
            strategy: strategy.into(),
        }
    }

    /// Same signal kind and strategy, different genes
    pub fn with_params(&self, params: Vec<Parameter>) -> Self {
        Self {
            params,
            signal_kind: self.signal_kind,
            strategy: self.strategy.clone(),
        }
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    pub fn signal_kind(&self) -> SignalKind {
        self.signal_kind
    }

    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    pub fn resolve(&self) -> ResolvedSignal {
        ResolvedSignal {
            strategy: self.strategy.clone(),
            signal_kind: self.signal_kind,
            params: self
                .params
                .iter()
                .map(|p| (p.name().to_string(), p.value()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Genome {
    #[serde(rename = "name")]
    pub(crate) id: String,
    pub(crate) signals: Vec<StratParameter>,
    #[serde(rename = "elite")]
    pub(crate) is_elite: bool,
    #[serde(rename = "parents")]
    pub(crate) parent_ids: Vec<String>,
    pub(crate) generation: usize,
    pub(crate) fitness: i64,
    #[serde(rename = "mutant")]
    pub(crate) is_mutant: bool,
}

impl Genome {
    /// Generation-0 genome with no parents
    pub fn seed(id: impl Into<String>, signals: Vec<StratParameter>) -> Self {
        Self {
            id: id.into(),
            signals,
            is_elite: false,
            parent_ids: Vec::new(),
            generation: 0,
            fitness: 0,
            is_mutant: false,
        }
    }

    /// Copy carrying a new fitness score; identity and lineage are kept
    pub fn scored(&self, fitness: i64) -> Self {
        Self {
            fitness,
            ..self.clone()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn signals(&self) -> &[StratParameter] {
        &self.signals
    }

    pub fn is_elite(&self) -> bool {
        self.is_elite
    }

    pub fn parent_ids(&self) -> &[String] {
        &self.parent_ids
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn fitness(&self) -> i64 {
        self.fitness
    }

    pub fn is_mutant(&self) -> bool {
        self.is_mutant
    }

    pub fn resolve(&self) -> Vec<ResolvedSignal> {
        self.signals.iter().map(StratParameter::resolve).collect()
    }
}
