use crate::{
    data::MarketData,
    engines::evaluation::oracle::FitnessOracle,
    functions::registry::StrategyRegistry,
    types::{Direction, ResolvedSignal, SignalKind, Trade},
};
use anyhow::{bail, Result};
use std::sync::Arc;

/// Reference fitness oracle: trades the combined signals over the close
/// series and scores the run by its system quality number.
pub struct SignalBacktester {
    registry: Arc<StrategyRegistry>,
}

/// Per-bar entry/exit intents after combining all signals
#[derive(Debug, Default, Clone, Copy)]
struct BarIntent {
    enter_long: bool,
    enter_short: bool,
    exit_long: bool,
    exit_short: bool,
}

impl SignalBacktester {
    pub fn new(registry: Arc<StrategyRegistry>) -> Self {
        Self { registry }
    }

    pub fn run(&self, signals: &[ResolvedSignal], data: &MarketData) -> Result<Vec<Trade>> {
        let close = &data.close;
        if close.len() < 2 {
            bail!("need at least two bars, got {}", close.len());
        }

        let mut series = Vec::with_capacity(signals.len());
        for signal in signals {
            let generator = self.registry.build(signal)?;
            let values = generator.calculate(close);
            if values.len() != close.len() {
                bail!(
                    "{} produced {} values for {} bars",
                    signal.strategy,
                    values.len(),
                    close.len()
                );
            }
            series.push((signal.signal_kind, values));
        }

        let explicit_long_exit = signals.iter().any(|s| s.signal_kind == SignalKind::LongExit);
        let explicit_short_exit = signals.iter().any(|s| s.signal_kind == SignalKind::ShortExit);

        let mut trades = Vec::new();
        let mut position: Option<(Direction, usize)> = None;

        for (bar, &price) in close.iter().enumerate() {
            let mut intent = BarIntent::default();
            for (kind, values) in &series {
                let value = values[bar];
                let bullish = value > 0.0;
                let bearish = value < 0.0;
                match kind {
                    SignalKind::Long => {
                        intent.enter_long |= bullish;
                        intent.exit_long |= bearish && !explicit_long_exit;
                    }
                    SignalKind::Short => {
                        intent.enter_short |= bearish;
                        intent.exit_short |= bullish && !explicit_short_exit;
                    }
                    SignalKind::LongShort => {
                        intent.enter_long |= bullish;
                        intent.enter_short |= bearish;
                    }
                    SignalKind::LongExit => intent.exit_long |= bearish,
                    SignalKind::ShortExit => intent.exit_short |= bullish,
                }
            }

            let closes_current = match position {
                Some((Direction::Long, _)) => intent.exit_long || intent.enter_short,
                Some((Direction::Short, _)) => intent.exit_short || intent.enter_long,
                None => false,
            };
            if closes_current {
                if let Some((direction, entry_bar)) = position.take() {
                    trades.push(Trade {
                        entry_bar,
                        exit_bar: bar,
                        entry_price: close[entry_bar],
                        exit_price: price,
                        direction,
                    });
                }
            }

            if position.is_none() {
                // conflicting entries on the same bar cancel out
                position = match (intent.enter_long, intent.enter_short) {
                    (true, false) => Some((Direction::Long, bar)),
                    (false, true) => Some((Direction::Short, bar)),
                    _ => None,
                };
            }
        }

        let last = close.len() - 1;
        if let Some((direction, entry_bar)) = position {
            if entry_bar < last {
                trades.push(Trade {
                    entry_bar,
                    exit_bar: last,
                    entry_price: close[entry_bar],
                    exit_price: close[last],
                    direction,
                });
            }
        }

        Ok(trades)
    }
}

/// System quality number: `sqrt(n) * mean / stdev` of per-trade returns
pub fn system_quality_number(trades: &[Trade]) -> f64 {
    let n = trades.len();
    if n < 2 {
        return 0.0;
    }
    let returns: Vec<f64> = trades.iter().map(Trade::return_pct).collect();
    let mean = returns.iter().sum::<f64>() / n as f64;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let stdev = variance.sqrt();
    if stdev == 0.0 || !stdev.is_finite() {
        return 0.0;
    }
    (n as f64).sqrt() * mean / stdev
}

impl FitnessOracle<MarketData> for SignalBacktester {
    fn evaluate(&self, signals: &[ResolvedSignal], data: &MarketData) -> Result<i64> {
        let trades = self.run(signals, data)?;
        let sqn = system_quality_number(&trades);
        Ok((sqn * 100.0).round() as i64)
    }
}
