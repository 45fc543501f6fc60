use super::traits::ConfigSection;
use crate::engines::generation::operators::{CrossoverMethod, MutationPolicy};
use crate::error::EvolveError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub breeding_percentage: f64,
    pub mutate_random: bool,
    pub mutation_rate: f64,
    pub mutation_strength: i64,
    pub elitism: usize,
    pub num_generations: usize,
    #[serde(default)]
    pub crossover: CrossoverMethod,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            breeding_percentage: 0.2,
            mutate_random: true,
            mutation_rate: 0.04,
            mutation_strength: 0,
            elitism: 5,
            num_generations: 10,
            crossover: CrossoverMethod::SinglePoint,
            parallel: false,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    pub fn mutation_policy(&self) -> Result<MutationPolicy, EvolveError> {
        MutationPolicy::new(self.mutate_random, self.mutation_rate, self.mutation_strength)
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), EvolveError> {
        if self.population_size == 0 {
            return Err(EvolveError::Configuration(
                "Population size must be positive".to_string()
            ));
        }
        if !(self.breeding_percentage > 0.0 && self.breeding_percentage <= 1.0) {
            return Err(EvolveError::Configuration(
                "Breeding percentage must be in (0, 1]".to_string()
            ));
        }
        if self.elitism >= self.population_size {
            return Err(EvolveError::Configuration(format!(
                "Elitism ({}) must be smaller than the population size ({})",
                self.elitism, self.population_size
            )));
        }
        let breeders = (self.population_size as f64 * self.breeding_percentage).round_ties_even();
        if breeders < 1.0 {
            return Err(EvolveError::Configuration(format!(
                "Breeding percentage {} selects no breeders from {} genomes",
                self.breeding_percentage, self.population_size
            )));
        }
        self.mutation_policy()
            .map_err(|e| EvolveError::Configuration(e.to_string()))?;
        Ok(())
    }
}
