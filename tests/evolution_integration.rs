use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use stratevolve::config::signals::build_template;
use stratevolve::config::{AppConfig, EvolutionConfig};
use stratevolve::data::MarketData;
use stratevolve::engines::evaluation::{FitnessOracle, SignalBacktester};
use stratevolve::engines::generation::{
    ConsoleProgressCallback, CrossoverMethod, EvolutionEngine, GenerationLog, GenerationSummary, NoProgress,
    Parameter, ProgressCallback, StratParameter,
};
use stratevolve::error::EvolveError;
use stratevolve::functions::StrategyRegistry;
use stratevolve::types::{ResolvedSignal, SignalKind};

/// Scores every genome the same
struct ConstantOracle(i64);

impl FitnessOracle<()> for ConstantOracle {
    fn evaluate(&self, _signals: &[ResolvedSignal], _data: &()) -> anyhow::Result<i64> {
        Ok(self.0)
    }
}

/// Fails once more than `limit` genomes have been scored
struct FlakyOracle {
    calls: AtomicUsize,
    limit: usize,
}

impl FitnessOracle<()> for FlakyOracle {
    fn evaluate(&self, _signals: &[ResolvedSignal], _data: &()) -> anyhow::Result<i64> {
        if self.calls.fetch_add(1, Ordering::SeqCst) >= self.limit {
            anyhow::bail!("backtest service unavailable");
        }
        Ok(7)
    }
}

/// Records every summary it sees
#[derive(Default)]
struct Recorder {
    started: Vec<usize>,
    summaries: Vec<GenerationSummary>,
}

impl ProgressCallback for Recorder {
    fn on_generation_start(&mut self, generation: usize) {
        self.started.push(generation);
    }

    fn on_generation_complete(&mut self, summary: &GenerationSummary) {
        self.summaries.push(*summary);
    }
}

fn ma_short_template() -> Vec<StratParameter> {
    let mut rng = StdRng::seed_from_u64(1);
    vec![StratParameter::new(
        vec![Parameter::new("ma_short", 5, 10, 6, &mut rng).unwrap()],
        SignalKind::Long,
        "ma_crossover",
    )]
}

fn small_config() -> EvolutionConfig {
    EvolutionConfig {
        population_size: 4,
        breeding_percentage: 0.5,
        mutate_random: true,
        mutation_rate: 0.04,
        mutation_strength: 0,
        elitism: 1,
        num_generations: 1,
        seed: Some(2024),
        ..Default::default()
    }
}

fn parse_log(buffer: &[u8]) -> Vec<Value> {
    let parsed: Value = serde_json::from_slice(buffer).expect("log is valid JSON");
    parsed.as_array().expect("log is a JSON array").clone()
}

#[test]
fn test_one_generation_end_to_end() {
    let mut engine = EvolutionEngine::new(small_config(), ConstantOracle(10)).unwrap();
    let mut buffer = Vec::new();
    let log = GenerationLog::new(&mut buffer).unwrap();

    let population = engine.run(&ma_short_template(), &(), log, &mut NoProgress).unwrap();

    assert_eq!(population.len(), 4);
    let elites: Vec<_> = population.iter().filter(|g| g.is_elite()).collect();
    assert_eq!(elites.len(), 1);
    assert_eq!(elites[0].fitness(), 10);
    assert_eq!(elites[0].generation(), 1);
    assert_eq!(elites[0].parent_ids().len(), 1);

    for child in population.iter().filter(|g| !g.is_elite()) {
        assert_eq!(child.generation(), 1);
        assert_eq!(child.parent_ids().len(), 2);
        let value = child.signals()[0].params()[0].value();
        assert!((5..10).contains(&value), "ma_short {} out of range", value);
    }

    // generation 0 plus the final generation
    assert_eq!(parse_log(&buffer).len(), 2);
}

#[test]
fn test_log_layout() {
    let config = EvolutionConfig {
        num_generations: 2,
        ..small_config()
    };
    let mut engine = EvolutionEngine::new(config, ConstantOracle(3)).unwrap();
    let mut buffer = Vec::new();
    let log = GenerationLog::new(&mut buffer).unwrap();
    engine.run(&ma_short_template(), &(), log, &mut NoProgress).unwrap();

    let generations = parse_log(&buffer);
    assert_eq!(generations.len(), 3);

    let first = &generations[0][0];
    assert_eq!(first["name"], "genome0");
    assert_eq!(first["fitness"], 3);
    assert_eq!(first["generation"], 0);
    assert_eq!(first["elite"], false);
    assert_eq!(first["parents"], Value::Array(vec![]));
    assert_eq!(first["signals"][0]["signal_type"], "LONG");
    assert_eq!(first["signals"][0]["params"][0]["name"], "ma_short");
    assert_eq!(first["signals"][0]["params"][0]["minimum"], 5);
    assert_eq!(first["signals"][0]["params"][0]["maximum"], 10);

    for (index, generation) in generations.iter().enumerate() {
        let genomes = generation.as_array().unwrap();
        assert_eq!(genomes.len(), 4);
        assert!(genomes.iter().all(|g| g["generation"] == index));
    }
}

#[test]
fn test_population_size_holds_every_generation() {
    let config = EvolutionConfig {
        population_size: 12,
        elitism: 3,
        breeding_percentage: 0.25,
        num_generations: 5,
        mutate_random: false,
        mutation_rate: 0.3,
        mutation_strength: 2,
        ..small_config()
    };
    let mut engine = EvolutionEngine::new(config, ConstantOracle(5)).unwrap();
    let mut recorder = Recorder::default();
    let mut buffer = Vec::new();
    let log = GenerationLog::new(&mut buffer).unwrap();

    let population = engine.run(&ma_short_template(), &(), log, &mut recorder).unwrap();

    assert_eq!(population.len(), 12);
    assert_eq!(population.iter().filter(|g| g.is_elite()).count(), 3);
    assert_eq!(recorder.started, vec![0, 1, 2, 3, 4, 5]);
    assert!(recorder.summaries.iter().all(|s| s.population_size == 12 && s.best_fitness == 5));

    for generation in parse_log(&buffer) {
        for genome in generation.as_array().unwrap() {
            let value = genome["signals"][0]["params"][0]["value"].as_i64().unwrap();
            assert!((5..10).contains(&value));
        }
    }
}

#[test]
fn test_cancellation_keeps_log_valid() {
    let flag = Arc::new(AtomicBool::new(true));
    let mut callback = ConsoleProgressCallback::with_cancel_flag(flag);
    let mut engine = EvolutionEngine::new(small_config(), ConstantOracle(1)).unwrap();
    let mut buffer = Vec::new();
    let log = GenerationLog::new(&mut buffer).unwrap();

    let result = engine.run(&ma_short_template(), &(), log, &mut callback);

    assert!(matches!(result, Err(EvolveError::Cancelled { generation: 0 })));
    assert!(parse_log(&buffer).is_empty());
}

#[test]
fn test_oracle_failure_propagates() {
    let oracle = FlakyOracle {
        calls: AtomicUsize::new(0),
        limit: 4,
    };
    let mut engine = EvolutionEngine::new(small_config(), oracle).unwrap();
    let mut buffer = Vec::new();
    let log = GenerationLog::new(&mut buffer).unwrap();

    let result = engine.run(&ma_short_template(), &(), log, &mut NoProgress);

    match result {
        Err(EvolveError::Oracle { source, .. }) => {
            assert!(source.to_string().contains("unavailable"));
        }
        other => panic!("expected oracle error, got {:?}", other.map(|p| p.len())),
    }
    // generation 0 was scored before the failure
    assert_eq!(parse_log(&buffer).len(), 1);
}

#[test]
fn test_parallel_matches_sequential() {
    let run = |parallel: bool| {
        let config = EvolutionConfig {
            population_size: 16,
            elitism: 2,
            num_generations: 3,
            crossover: CrossoverMethod::Uniform,
            parallel,
            ..small_config()
        };
        let mut engine = EvolutionEngine::new(config, ConstantOracle(9)).unwrap();
        let log = GenerationLog::new(Vec::new()).unwrap();
        engine.run(&ma_short_template(), &(), log, &mut NoProgress).unwrap()
    };

    assert_eq!(run(true), run(false));
}

fn synthetic_market() -> MarketData {
    let close = (0..300)
        .map(|i| {
            let t = i as f64;
            100.0 + 10.0 * (t / 15.0).sin() + 4.0 * (t / 4.0).cos() + t * 0.05
        })
        .collect();
    MarketData::new(close)
}

#[test]
fn test_backtester_driven_run() {
    let raw = r#"{
        "evolution": {
            "population_size": 10,
            "breeding_percentage": 0.4,
            "mutate_random": true,
            "mutation_rate": 0.2,
            "mutation_strength": 0,
            "elitism": 2,
            "num_generations": 3,
            "parallel": true,
            "seed": 11
        },
        "data": { "path": "unused.csv" },
        "output": { "path": "unused.json" },
        "signals": [
            {
                "strategy": "ma_crossover",
                "signal_type": "LONGSHORT",
                "params": [
                    { "name": "ma_short", "minimum": 2, "maximum": 10 },
                    { "name": "ma_long", "minimum": 12, "maximum": 40 }
                ]
            },
            {
                "strategy": "momentum",
                "signal_type": "LONGEXIT",
                "params": [{ "name": "period", "minimum": 1, "maximum": 8 }]
            }
        ]
    }"#;
    let path = std::env::temp_dir().join(format!("stratevolve_run_{}.json", std::process::id()));
    std::fs::write(&path, raw).unwrap();
    let config = AppConfig::load_from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let registry = Arc::new(StrategyRegistry::new());
    config.validate_signals(&registry).unwrap();
    let template = build_template(&config.signals, &mut StdRng::seed_from_u64(11)).unwrap();

    let mut engine = EvolutionEngine::new(config.evolution.clone(), SignalBacktester::new(registry)).unwrap();
    let mut buffer = Vec::new();
    let log = GenerationLog::new(&mut buffer).unwrap();
    let population = engine
        .run(&template, &synthetic_market(), log, &mut NoProgress)
        .unwrap();

    assert_eq!(population.len(), 10);
    assert!(population.iter().all(|g| g.fitness() >= 1));
    assert_eq!(parse_log(&buffer).len(), 4);
}
