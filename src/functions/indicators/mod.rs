pub mod momentum;
pub mod trend;

pub use momentum::{Momentum, MomentumBuilder};
pub use trend::{sma, MaCrossover, MaCrossoverBuilder};
