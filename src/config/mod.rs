pub mod traits;
pub mod evolution;
pub mod signals;
pub mod manager;

pub use manager::{AppConfig, DataConfig, OutputConfig};
pub use evolution::EvolutionConfig;
pub use signals::{ParameterSpec, SignalTemplate};
pub use traits::ConfigSection;
