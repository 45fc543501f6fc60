use crate::engines::generation::{genome::Genome, parameter::Parameter, StratParameter};
use crate::error::{EvolveError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Random-reset mutation: with probability `rate`, draw a fresh value in range
pub fn mutate_random<R: Rng + ?Sized>(param: &Parameter, rate: f64, rng: &mut R) -> Result<Parameter> {
    if !(rate > 0.0 && rate <= 1.0) {
        return Err(EvolveError::InvalidArgument(format!(
            "random-reset mutation rate must be in (0, 1], got {}",
            rate
        )));
    }

    if rng.gen::<f64>() < rate {
        let value = rng.gen_range(param.minimum()..param.maximum());
        Ok(param.with_value(value, rng))
    } else {
        Ok(param.clone())
    }
}

/// Perturbation mutation: with probability `rate`, move the value by `strength`.
///
/// The decrease is only taken when it stays strictly above `minimum`; otherwise
/// the value is increased. The increase is not bounded, so an overshoot past
/// `maximum` gets repaired into a random in-range value.
pub fn mutate_perturb<R: Rng + ?Sized>(
    param: &Parameter,
    rate: f64,
    strength: i64,
    rng: &mut R,
) -> Result<Parameter> {
    if !(rate > 0.0 && rate < 1.0) {
        return Err(EvolveError::InvalidArgument(format!(
            "perturbation mutation rate must be in (0, 1), got {}",
            rate
        )));
    }

    if rng.gen::<f64>() >= rate {
        return Ok(param.clone());
    }

    let decrease = rng.gen::<f64>() > 0.5;
    let lowered = param.value().saturating_sub(strength);
    let value = if decrease && lowered > param.minimum() {
        lowered
    } else {
        param.value().saturating_add(strength)
    };
    Ok(param.with_value(value, rng))
}

/// Mutation policy fixed for a whole run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MutationPolicy {
    RandomReset { rate: f64 },
    Perturb { rate: f64, strength: i64 },
}

impl MutationPolicy {
    pub fn new(mutate_random: bool, rate: f64, strength: i64) -> Result<Self> {
        let policy = if mutate_random {
            Self::RandomReset { rate }
        } else {
            Self::Perturb { rate, strength }
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<()> {
        if let Self::Perturb { strength, .. } = *self {
            if strength < 0 {
                return Err(EvolveError::InvalidArgument(format!(
                    "perturbation strength must not be negative, got {}",
                    strength
                )));
            }
        }
        let (rate, valid) = match *self {
            Self::RandomReset { rate } => (rate, rate > 0.0 && rate <= 1.0),
            Self::Perturb { rate, .. } => (rate, rate > 0.0 && rate < 1.0),
        };
        if valid {
            Ok(())
        } else {
            Err(EvolveError::InvalidArgument(format!(
                "mutation rate {} is out of range for {:?}",
                rate, self
            )))
        }
    }

    pub fn mutate_parameter<R: Rng + ?Sized>(&self, param: &Parameter, rng: &mut R) -> Result<Parameter> {
        match *self {
            Self::RandomReset { rate } => mutate_random(param, rate, rng),
            Self::Perturb { rate, strength } => mutate_perturb(param, rate, strength, rng),
        }
    }

    pub fn mutate_signal<R: Rng + ?Sized>(&self, signal: &StratParameter, rng: &mut R) -> Result<StratParameter> {
        let params = signal
            .params()
            .iter()
            .map(|p| self.mutate_parameter(p, rng))
            .collect::<Result<Vec<_>>>()?;
        Ok(signal.with_params(params))
    }

    /// Mutate every signal of a genome.
    ///
    /// The result keeps id, parents and generation, has its fitness reset and
    /// is flagged as a mutant iff at least one parameter value changed.
    pub fn mutate_genome<R: Rng + ?Sized>(&self, genome: &Genome, rng: &mut R) -> Result<Genome> {
        let signals = genome
            .signals
            .iter()
            .map(|s| self.mutate_signal(s, rng))
            .collect::<Result<Vec<_>>>()?;

        let is_mutant = genome
            .signals
            .iter()
            .zip(&signals)
            .flat_map(|(before, after)| before.params().iter().zip(after.params()))
            .any(|(before, after)| before.value() != after.value());

        Ok(Genome {
            id: genome.id.clone(),
            signals,
            is_elite: false,
            parent_ids: genome.parent_ids.clone(),
            generation: genome.generation,
            fitness: 0,
            is_mutant,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverMethod {
    #[default]
    SinglePoint,
    Uniform,
}

impl CrossoverMethod {
    pub fn apply<R: Rng + ?Sized>(&self, mother: &Genome, father: &Genome, rng: &mut R) -> Result<Genome> {
        match self {
            Self::SinglePoint => single_point_crossover(mother, father, rng),
            Self::Uniform => uniform_crossover(mother, father, rng),
        }
    }
}

pub fn new_genome_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("genome{}", rng.gen_range(0..1_000_000))
}

fn child_of<R: Rng + ?Sized>(mother: &Genome, father: &Genome, signals: Vec<StratParameter>, rng: &mut R) -> Genome {
    Genome {
        id: new_genome_id(rng),
        signals,
        is_elite: false,
        parent_ids: vec![mother.id.clone(), father.id.clone()],
        generation: mother.generation.max(father.generation) + 1,
        fitness: 0,
        is_mutant: false,
    }
}

/// Single-point crossover weighted by fitness.
///
/// The split point is `round(fittest / (mother + father))`, which can only be
/// 0 or 1: the child takes the fitter parent's first signal (when the fitter
/// parent holds a strict majority of the combined fitness) followed by the
/// weaker parent's remaining signals.
pub fn single_point_crossover<R: Rng + ?Sized>(mother: &Genome, father: &Genome, rng: &mut R) -> Result<Genome> {
    let total_fitness = mother.fitness + father.fitness;
    if total_fitness == 0 {
        return Err(EvolveError::ZeroFitnessSum {
            mother: mother.id.clone(),
            father: father.id.clone(),
        });
    }

    let (fittest, weakest) = if father.fitness > mother.fitness {
        (father, mother)
    } else {
        (mother, father)
    };

    let ratio = fittest.fitness as f64 / total_fitness as f64;
    let point = ratio.round_ties_even().max(0.0) as usize;

    let head = &fittest.signals[..point.min(fittest.signals.len())];
    let tail = &weakest.signals[point.min(weakest.signals.len())..];
    let signals = head.iter().chain(tail).cloned().collect();

    Ok(child_of(mother, father, signals, rng))
}

/// Uniform crossover: each signal position comes from either parent.
///
/// Both parents must carry the same strategies, position for position.
pub fn uniform_crossover<R: Rng + ?Sized>(mother: &Genome, father: &Genome, rng: &mut R) -> Result<Genome> {
    let mut mother_names: Vec<&str> = mother.signals.iter().map(|s| s.strategy()).collect();
    let mut father_names: Vec<&str> = father.signals.iter().map(|s| s.strategy()).collect();
    mother_names.sort_unstable();
    father_names.sort_unstable();
    if mother_names != father_names {
        return Err(EvolveError::IncompatibleParents(format!(
            "{} carries {:?} but {} carries {:?}",
            mother.id, mother_names, father.id, father_names
        )));
    }

    let signals = mother
        .signals
        .iter()
        .zip(&father.signals)
        .map(|(m, f)| if rng.gen_bool(0.5) { m.clone() } else { f.clone() })
        .collect();

    Ok(child_of(mother, father, signals, rng))
}
