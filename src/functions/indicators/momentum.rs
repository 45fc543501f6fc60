use crate::functions::traits::{period, SignalBuilder, SignalGenerator};
use anyhow::Result;
use std::collections::HashMap;

pub struct MomentumBuilder;

/// Emits an event whenever `close[i] - close[i - period]` changes sign
pub struct Momentum {
    pub period: usize,
}

impl SignalBuilder for MomentumBuilder {
    fn alias(&self) -> &'static str {
        "momentum"
    }

    fn ui_name(&self) -> &'static str {
        "Momentum"
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["period"]
    }

    fn build(&self, params: &HashMap<String, i64>) -> Result<Box<dyn SignalGenerator>> {
        Ok(Box::new(Momentum {
            period: period(params, "period")?,
        }))
    }
}

impl SignalGenerator for Momentum {
    fn calculate(&self, close: &[f64]) -> Vec<f64> {
        let mut signal = vec![0.0; close.len()];
        let mut previous: Option<f64> = None;

        for i in self.period..close.len() {
            let current = close[i] - close[i - self.period];
            if let Some(prev) = previous {
                if prev <= 0.0 && current > 0.0 {
                    signal[i] = 1.0;
                } else if prev >= 0.0 && current < 0.0 {
                    signal[i] = -1.0;
                }
            }
            previous = Some(current);
        }
        signal
    }
}
