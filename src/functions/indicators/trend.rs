use crate::functions::traits::{period, SignalBuilder, SignalGenerator};
use anyhow::Result;
use std::collections::{HashMap, VecDeque};

/// Simple moving average; `None` until `period` bars are available
pub fn sma(close: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut window = VecDeque::with_capacity(period);
    let mut sum = 0.0;
    close
        .iter()
        .map(|&price| {
            window.push_back(price);
            sum += price;
            if window.len() > period {
                sum -= window.pop_front().unwrap_or(0.0);
            }
            (period > 0 && window.len() == period).then(|| sum / period as f64)
        })
        .collect()
}

// --- MA crossover ---
pub struct MaCrossoverBuilder;

pub struct MaCrossover {
    pub ma_short: usize,
    pub ma_long: usize,
}

impl SignalBuilder for MaCrossoverBuilder {
    fn alias(&self) -> &'static str {
        "ma_crossover"
    }

    fn ui_name(&self) -> &'static str {
        "Moving Average Crossover"
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["ma_short", "ma_long"]
    }

    fn build(&self, params: &HashMap<String, i64>) -> Result<Box<dyn SignalGenerator>> {
        Ok(Box::new(MaCrossover {
            ma_short: period(params, "ma_short")?,
            ma_long: period(params, "ma_long")?,
        }))
    }
}

impl SignalGenerator for MaCrossover {
    /// +1 when the short average crosses above the long one, -1 when it
    /// crosses below
    fn calculate(&self, close: &[f64]) -> Vec<f64> {
        let short = sma(close, self.ma_short);
        let long = sma(close, self.ma_long);

        let mut signal = vec![0.0; close.len()];
        for i in 1..close.len() {
            let (Some(s0), Some(l0), Some(s1), Some(l1)) = (short[i - 1], long[i - 1], short[i], long[i]) else {
                continue;
            };
            if s0 <= l0 && s1 > l1 {
                signal[i] = 1.0;
            } else if s0 >= l0 && s1 < l1 {
                signal[i] = -1.0;
            }
        }
        signal
    }
}
