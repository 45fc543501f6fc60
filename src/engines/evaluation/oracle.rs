use crate::engines::generation::Genome;
use crate::error::{EvolveError, Result};
use crate::types::ResolvedSignal;
use rayon::prelude::*;

/// External evaluator turning a parameter assignment into a fitness score.
///
/// Implementations only read the dataset, so one oracle can score a whole
/// generation from several threads at once.
pub trait FitnessOracle<D: ?Sized>: Sync {
    fn evaluate(&self, signals: &[ResolvedSignal], data: &D) -> anyhow::Result<i64>;
}

/// Score one genome; non-positive scores are raised to 1
pub fn evaluate_genome<D, O>(oracle: &O, genome: &Genome, data: &D) -> Result<Genome>
where
    D: ?Sized,
    O: FitnessOracle<D> + ?Sized,
{
    let raw = oracle
        .evaluate(&genome.resolve(), data)
        .map_err(|e| EvolveError::Oracle {
            genome: genome.id().to_string(),
            source: e.into(),
        })?;
    let fitness = if raw <= 0 { 1 } else { raw };
    log::debug!("{} scored {} (raw {})", genome.id(), fitness, raw);
    Ok(genome.scored(fitness))
}

/// Score a whole generation, in order.
///
/// With `parallel` the oracle calls fan out over the rayon pool; results are
/// collected before returning either way.
pub fn evaluate_population<D, O>(
    oracle: &O,
    population: &[Genome],
    data: &D,
    parallel: bool,
) -> Result<Vec<Genome>>
where
    D: Sync + ?Sized,
    O: FitnessOracle<D> + ?Sized,
{
    if parallel {
        population
            .par_iter()
            .map(|g| evaluate_genome(oracle, g, data))
            .collect()
    } else {
        population
            .iter()
            .map(|g| evaluate_genome(oracle, g, data))
            .collect()
    }
}
