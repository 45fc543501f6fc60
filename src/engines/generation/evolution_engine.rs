use crate::config::{ConfigSection, EvolutionConfig};
use crate::engines::evaluation::oracle::{evaluate_population, FitnessOracle};
use crate::engines::generation::{
    generation_log::GenerationLog,
    genome::{Genome, StratParameter},
    operators::MutationPolicy,
    selection::{breeding_pool, get_elites},
};
use crate::error::{EvolveError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::io::Write;

/// Fitness figures for one scored generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSummary {
    pub generation: usize,
    pub best_fitness: i64,
    pub average_fitness: f64,
    pub population_size: usize,
}

impl GenerationSummary {
    pub fn from_scored(generation: usize, scored: &[Genome]) -> Self {
        let best_fitness = scored.iter().map(Genome::fitness).max().unwrap_or(0);
        let average_fitness = if scored.is_empty() {
            0.0
        } else {
            scored.iter().map(|g| g.fitness() as f64).sum::<f64>() / scored.len() as f64
        };
        Self {
            generation,
            best_fitness,
            average_fitness,
            population_size: scored.len(),
        }
    }
}

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, summary: &GenerationSummary);

    /// Surveyed between generations; returning true stops the run
    fn should_abort(&self) -> bool {
        false
    }
}

/// Callback that ignores progress and never aborts
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _summary: &GenerationSummary) {}
}

pub struct EvolutionEngine<O> {
    config: EvolutionConfig,
    mutation: MutationPolicy,
    oracle: O,
    rng: StdRng,
}

impl<O> EvolutionEngine<O> {
    pub fn new(config: EvolutionConfig, oracle: O) -> Result<Self> {
        config.validate()?;
        let mutation = config.mutation_policy()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            mutation,
            oracle,
            rng,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Run the whole evolution and return the last scored generation.
    ///
    /// Every scored generation, starting with generation 0, is appended to
    /// `log`. The log is closed on every exit path, so a failed or cancelled
    /// run still leaves a well-formed JSON array behind.
    pub fn run<D, W, C>(
        &mut self,
        template: &[StratParameter],
        data: &D,
        mut log: GenerationLog<W>,
        callback: &mut C,
    ) -> Result<Vec<Genome>>
    where
        D: Sync + ?Sized,
        O: FitnessOracle<D>,
        W: Write,
        C: ProgressCallback + ?Sized,
    {
        let outcome = self.evolve(template, data, &mut log, callback);
        let closed = log.finish();
        let population = outcome?;
        closed?;
        Ok(population)
    }

    fn evolve<D, W, C>(
        &mut self,
        template: &[StratParameter],
        data: &D,
        log: &mut GenerationLog<W>,
        callback: &mut C,
    ) -> Result<Vec<Genome>>
    where
        D: Sync + ?Sized,
        O: FitnessOracle<D>,
        W: Write,
        C: ProgressCallback + ?Sized,
    {
        let mut population = self.first_generation(template)?;

        for generation in 0..=self.config.num_generations {
            if callback.should_abort() {
                log::warn!("Run cancelled before generation {}", generation);
                return Err(EvolveError::Cancelled { generation });
            }
            callback.on_generation_start(generation);

            let evaluated = evaluate_population(&self.oracle, &population, data, self.config.parallel)?;
            log.append(&evaluated)?;

            let summary = GenerationSummary::from_scored(generation, &evaluated);
            log::info!(
                "Generation {} complete: best fitness {}, average fitness {:.2}",
                generation,
                summary.best_fitness,
                summary.average_fitness
            );
            callback.on_generation_complete(&summary);

            if generation == self.config.num_generations {
                return Ok(evaluated);
            }

            population = self.next_generation(&population, &evaluated)?;
        }

        Ok(population)
    }

    /// Generation 0: the template fully randomized, once per slot
    pub fn first_generation(&mut self, template: &[StratParameter]) -> Result<Vec<Genome>> {
        let reset = MutationPolicy::RandomReset { rate: 1.0 };
        (0..self.config.population_size)
            .map(|i| {
                let signals = template
                    .iter()
                    .map(|s| reset.mutate_signal(s, &mut self.rng))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Genome::seed(format!("genome{}", i), signals))
            })
            .collect()
    }

    /// Breed the next population.
    ///
    /// Parents come from the scored generation; elites are cloned from the
    /// population as it was before scoring.
    pub fn next_generation(&mut self, population: &[Genome], evaluated: &[Genome]) -> Result<Vec<Genome>> {
        let pool = breeding_pool(evaluated, self.config.breeding_percentage)?;
        let elites = get_elites(population, self.config.elitism);
        log::debug!(
            "Breeding pool holds {} entries, carrying {} elites",
            pool.len(),
            elites.len()
        );

        let children = self.config.population_size.saturating_sub(self.config.elitism);
        let mut next_generation = Vec::with_capacity(self.config.population_size);
        while next_generation.len() < children {
            let (Some(mother), Some(father)) = (pool.choose(&mut self.rng), pool.choose(&mut self.rng)) else {
                return Err(EvolveError::EmptyBreedingPool);
            };
            let child = self.config.crossover.apply(mother, father, &mut self.rng)?;
            next_generation.push(self.mutation.mutate_genome(&child, &mut self.rng)?);
        }

        next_generation.extend(elites);
        Ok(next_generation)
    }
}
