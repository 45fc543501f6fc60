use serde::{Deserialize, Serialize};

/// Common spellings of the close column
pub const CLOSE_ALIASES: [&str; 5] = ["close", "Close", "CLOSE", "c", "adj_close"];

/// Training dataset handed to the fitness oracle, oldest bar first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub close: Vec<f64>,
}

impl MarketData {
    pub fn new(close: Vec<f64>) -> Self {
        Self { close }
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }
}
