use crate::engines::generation::genome::Genome;
use crate::error::{EvolveError, Result};

/// Build the breeding pool from a scored population.
///
/// The top `round(len * breeding_percentage)` genomes by fitness are kept, ties
/// favouring the later genome. Each appears in the pool once per fitness point,
/// so drawing uniformly from the pool is fitness-proportionate among breeders.
pub fn breeding_pool(evaluated: &[Genome], breeding_percentage: f64) -> Result<Vec<&Genome>> {
    if !(breeding_percentage > 0.0 && breeding_percentage <= 1.0) {
        return Err(EvolveError::InvalidArgument(format!(
            "breeding percentage must be in (0, 1], got {}",
            breeding_percentage
        )));
    }

    let cutoff = (evaluated.len() as f64 * breeding_percentage).round_ties_even() as usize;

    // ascending then reversed: among equal fitness the later genome ranks first
    let mut sorted: Vec<&Genome> = evaluated.iter().collect();
    sorted.sort_by_key(|g| g.fitness);
    sorted.reverse();

    let pool: Vec<&Genome> = sorted
        .into_iter()
        .take(cutoff)
        .flat_map(|g| std::iter::repeat(g).take(g.fitness.max(0) as usize))
        .collect();

    if pool.is_empty() {
        return Err(EvolveError::EmptyBreedingPool);
    }
    Ok(pool)
}

/// Clone the single fittest genome `elitism` times.
///
/// The first genome wins ties. Clones are marked elite, take the source as
/// their only parent and move one generation forward.
pub fn get_elites(population: &[Genome], elitism: usize) -> Vec<Genome> {
    let fittest = population
        .iter()
        .reduce(|best, g| if g.fitness > best.fitness { g } else { best });

    let Some(fittest) = fittest else {
        return Vec::new();
    };

    let elite = Genome {
        id: format!("{}E", fittest.id),
        signals: fittest.signals.clone(),
        is_elite: true,
        parent_ids: vec![fittest.id.clone()],
        generation: fittest.generation + 1,
        fitness: fittest.fitness,
        is_mutant: false,
    };
    vec![elite; elitism]
}
