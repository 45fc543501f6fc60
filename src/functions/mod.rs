pub mod indicators;
pub mod registry;
pub mod traits;

pub use registry::StrategyRegistry;
pub use traits::{SignalBuilder, SignalGenerator};
