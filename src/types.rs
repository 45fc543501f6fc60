use crate::error::EvolveError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// How a signal's events are turned into orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalKind {
    Long,       // Bullish events open longs
    LongShort,  // Bullish opens long, bearish opens short
    Short,      // Bearish events open shorts
    LongExit,   // Bearish events close longs
    ShortExit,  // Bullish events close shorts
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "LONG",
            Self::LongShort => "LONGSHORT",
            Self::Short => "SHORT",
            Self::LongExit => "LONGEXIT",
            Self::ShortExit => "SHORTEXIT",
        }
    }

    /// Numeric signal codes used by backtesting frameworks
    pub fn code(&self) -> i32 {
        match self {
            Self::LongShort => 1,
            Self::Long => 2,
            Self::Short => 5,
            Self::LongExit => 8,
            Self::ShortExit => 11,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::Long,
            Self::LongShort,
            Self::Short,
            Self::LongExit,
            Self::ShortExit,
        ]
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i32> for SignalKind {
    type Error = EvolveError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::all()
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| EvolveError::InvalidSignalKind(code.to_string()))
    }
}

impl FromStr for SignalKind {
    type Err = EvolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| EvolveError::InvalidSignalKind(s.to_string()))
    }
}

/// A signal flattened to what the fitness oracle consumes
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSignal {
    pub strategy: String,
    pub signal_kind: SignalKind,
    pub params: HashMap<String, i64>,
}

/// Closed trade record
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Trade {
    pub entry_bar: usize,
    pub exit_bar: usize,
    pub entry_price: f64,
    pub exit_price: f64,
    pub direction: Direction,
}

impl Trade {
    /// Percentage return of the trade, signed by direction
    pub fn return_pct(&self) -> f64 {
        let raw = (self.exit_price - self.entry_price) / self.entry_price * 100.0;
        match self.direction {
            Direction::Long => raw,
            Direction::Short => -raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}
