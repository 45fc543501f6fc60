pub mod backtester;
pub mod oracle;

pub use backtester::{system_quality_number, SignalBacktester};
pub use oracle::{evaluate_genome, evaluate_population, FitnessOracle};
