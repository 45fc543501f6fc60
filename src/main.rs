use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;
use stratevolve::config::signals::build_template;
use stratevolve::config::AppConfig;
use stratevolve::data::CsvConnector;
use stratevolve::engines::evaluation::SignalBacktester;
use stratevolve::engines::generation::{ConsoleProgressCallback, EvolutionEngine, GenerationLog};
use stratevolve::functions::StrategyRegistry;

const DEFAULT_CONFIG: &str = "stratevolve.toml";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Evolve trading-signal parameters with a genetic algorithm", long_about = None)]
struct Args {
    /// TOML or JSON run configuration
    #[arg(default_value = DEFAULT_CONFIG)]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = AppConfig::load_from_file(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;

    let registry = Arc::new(StrategyRegistry::new());
    config.validate_signals(&registry)?;

    let data = CsvConnector::load(&config.data.path, config.data.reverse)
        .with_context(|| format!("loading market data from {}", config.data.path.display()))?;

    let mut template_rng = match config.evolution.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let template = build_template(&config.signals, &mut template_rng)?;

    let output = File::create(&config.output.path)
        .with_context(|| format!("creating {}", config.output.path.display()))?;
    let log = GenerationLog::new(BufWriter::new(output))?;

    let mut engine = EvolutionEngine::new(config.evolution.clone(), SignalBacktester::new(registry))?;
    let mut progress = ConsoleProgressCallback::new();
    let population = engine.run(&template, &data, log, &mut progress)?;

    if let Some(best) = population.iter().max_by_key(|g| g.fitness()) {
        log::info!("Best genome {} with fitness {}", best.id(), best.fitness());
        for signal in best.resolve() {
            log::info!(
                "  {} {} {:?}",
                signal.signal_kind,
                signal.strategy,
                signal.params
            );
        }
    }
    log::info!("Generation log written to {}", config.output.path.display());

    Ok(())
}
