mod csv;
mod types;
mod validator;

pub use csv::CsvConnector;
pub use types::{MarketData, CLOSE_ALIASES};
pub use validator::DataValidator;
