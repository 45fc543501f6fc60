pub mod parameter;
pub mod genome;
pub mod operators;
pub mod selection;
pub mod generation_log;
pub mod evolution_engine;
pub mod progress;

pub use parameter::Parameter;
pub use genome::{Genome, StratParameter};
pub use operators::{CrossoverMethod, MutationPolicy};
pub use selection::{breeding_pool, get_elites};
pub use generation_log::GenerationLog;
pub use evolution_engine::{EvolutionEngine, GenerationSummary, NoProgress, ProgressCallback};
pub use progress::{ChannelProgressCallback, ConsoleProgressCallback, ProgressMessage};
