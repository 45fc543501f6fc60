use super::{
    evolution::EvolutionConfig,
    signals::SignalTemplate,
    traits::ConfigSection,
};
use crate::error::EvolveError;
use crate::functions::registry::StrategyRegistry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of environment overrides, e.g. `STRATEVOLVE__EVOLUTION__SEED=7`
pub const ENV_PREFIX: &str = "STRATEVOLVE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub path: PathBuf,
    /// The file lists the newest bar first
    #[serde(default)]
    pub reverse: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data.csv"),
            reverse: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("results.json"),
        }
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), EvolveError> {
        if self.path.as_os_str().is_empty() {
            return Err(EvolveError::Configuration("Data path is empty".to_string()));
        }
        Ok(())
    }
}

impl ConfigSection for OutputConfig {
    fn section_name() -> &'static str {
        "output"
    }

    fn validate(&self) -> Result<(), EvolveError> {
        if self.path.as_os_str().is_empty() {
            return Err(EvolveError::Configuration("Output path is empty".to_string()));
        }
        Ok(())
    }
}

/// Validate one section, naming it in the error
fn validate_section<S: ConfigSection>(section: &S) -> Result<(), EvolveError> {
    section.validate().map_err(|e| match e {
        EvolveError::Configuration(msg) => {
            EvolveError::Configuration(format!("[{}] {}", S::section_name(), msg))
        }
        other => other,
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub data: DataConfig,
    pub output: OutputConfig,
    pub signals: Vec<SignalTemplate>,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), EvolveError> {
        validate_section(&self.evolution)?;
        validate_section(&self.data)?;
        validate_section(&self.output)?;
        if self.signals.is_empty() {
            return Err(EvolveError::Configuration(
                "At least one signal template is required".to_string()
            ));
        }
        Ok(())
    }

    /// Check every template against the strategies that can be built
    pub fn validate_signals(&self, registry: &StrategyRegistry) -> Result<(), EvolveError> {
        for template in &self.signals {
            template.validate(registry)?;
        }
        Ok(())
    }

    /// Load from a TOML or JSON file, with `STRATEVOLVE__*` environment overrides
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, EvolveError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), EvolveError> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| EvolveError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| EvolveError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::signals::ParameterSpec;
    use crate::types::SignalKind;

    fn sample() -> AppConfig {
        AppConfig {
            signals: vec![SignalTemplate {
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
                        value: None,
                    },
                ],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_signals_required() {
        assert!(AppConfig::default().validate().is_err());
        assert!(sample().validate().is_ok());
        assert!(sample().validate_signals(&StrategyRegistry::new()).is_ok());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = std::env::temp_dir().join(format!("stratevolve_config_{}.toml", std::process::id()));
        let mut config = sample();
        config.evolution.seed = Some(42);
        config.evolution.population_size = 30;
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.evolution.population_size, 30);
        assert_eq!(loaded.evolution.seed, Some(42));
        assert_eq!(loaded.signals, config.signals);
        assert_eq!(loaded.output.path, PathBuf::from("results.json"));
    }
}
