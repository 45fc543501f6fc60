use crate::engines::generation::{Parameter, StratParameter};
use crate::error::{EvolveError, Result};
use crate::functions::registry::StrategyRegistry;
use crate::types::SignalKind;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Bounds (and optional starting value) of one parameter in a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub minimum: i64,
    pub maximum: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

/// Generation-0 description of one signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalTemplate {
    pub strategy: String,
    pub signal_type: SignalKind,
    pub params: Vec<ParameterSpec>,
}

impl SignalTemplate {
    /// Check the strategy exists and every parameter it needs is declared
    pub fn validate(&self, registry: &StrategyRegistry) -> Result<()> {
        let builder = registry.get_builder(&self.strategy)?;
        for required in builder.parameter_names() {
            if !self.params.iter().any(|p| p.name == *required) {
                return Err(EvolveError::Configuration(format!(
                    "Strategy '{}' needs parameter '{}'",
                    self.strategy, required
                )));
            }
        }
        for spec in &self.params {
            if spec.minimum >= spec.maximum {
                return Err(EvolveError::Configuration(format!(
                    "Parameter '{}' has empty range [{}, {})",
                    spec.name, spec.minimum, spec.maximum
                )));
            }
        }
        Ok(())
    }

    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<StratParameter> {
        let params = self
            .params
            .iter()
            .map(|spec| match spec.value {
                Some(value) => Parameter::new(&spec.name, spec.minimum, spec.maximum, value, rng),
                None => Parameter::random(&spec.name, spec.minimum, spec.maximum, rng),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(StratParameter::new(params, self.signal_type, &self.strategy))
    }
}

/// Build the full generation-0 template
pub fn build_template<R: Rng + ?Sized>(
    templates: &[SignalTemplate],
    rng: &mut R,
) -> Result<Vec<StratParameter>> {
    templates.iter().map(|t| t.build(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ma_template() -> SignalTemplate {
        SignalTemplate {
            strategy: "ma_crossover".to_string(),
            signal_type: SignalKind::LongShort,
            params: vec![
                ParameterSpec {
                    name: "ma_long".to_string(),
                    minimum: 100,
                    maximum: 200,
                    value: None,
                },
                ParameterSpec {
                    name: "ma_short".to_string(),
                    minimum: 5,
                    maximum: 100,
                    value: Some(20),
                },
            ],
        }
    }

    #[test]
    fn test_template_builds_signal() {
        let mut rng = StdRng::seed_from_u64(1);
        let signal = ma_template().build(&mut rng).unwrap();
        assert_eq!(signal.strategy(), "ma_crossover");
        assert_eq!(signal.signal_kind(), SignalKind::LongShort);
        assert!((100..200).contains(&signal.params()[0].value()));
        assert_eq!(signal.params()[1].value(), 20);
    }

    #[test]
    fn test_template_validation() {
        let registry = StrategyRegistry::new();
        assert!(ma_template().validate(&registry).is_ok());

        let mut missing = ma_template();
        missing.params.pop();
        assert!(matches!(
            missing.validate(&registry),
            Err(EvolveError::Configuration(_))
        ));

        let mut unknown = ma_template();
        unknown.strategy = "tea_leaves".to_string();
        assert!(matches!(
            unknown.validate(&registry),
            Err(EvolveError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn test_bad_signal_type_rejected_on_parse() {
        let raw = r#"{"strategy": "momentum", "signal_type": "SIDEWAYS", "params": []}"#;
        assert!(serde_json::from_str::<SignalTemplate>(raw).is_err());
    }
}
