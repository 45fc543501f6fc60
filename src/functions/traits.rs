use anyhow::Result;
use std::collections::HashMap;

/// Named factory turning resolved parameter values into a signal generator
pub trait SignalBuilder: Send + Sync {
    /// Name used by strategy templates and the registry
    fn alias(&self) -> &'static str;

    /// Display name
    fn ui_name(&self) -> &'static str;

    /// Parameters the builder expects to find in the assignment
    fn parameter_names(&self) -> &'static [&'static str];

    fn build(&self, params: &HashMap<String, i64>) -> Result<Box<dyn SignalGenerator>>;
}

/// Produces one event value per bar.
///
/// Positive values are bullish events, negative values bearish events and zero
/// means nothing happened on that bar.
pub trait SignalGenerator: Send {
    fn calculate(&self, close: &[f64]) -> Vec<f64>;
}

/// Fetch a required parameter from an assignment as a positive window length
pub fn period(params: &HashMap<String, i64>, name: &str) -> Result<usize> {
    match params.get(name) {
        Some(&value) if value > 0 => Ok(value as usize),
        Some(&value) => anyhow::bail!("{} must be positive, got {}", name, value),
        None => anyhow::bail!("missing parameter {}", name),
    }
}
