use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvolveError {
    #[error("Invalid signal kind: {0}")]
    InvalidSignalKind(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Cannot cross over {mother} and {father}: combined fitness is zero")]
    ZeroFitnessSum { mother: String, father: String },

    #[error("Breeding pool is empty")]
    EmptyBreedingPool,

    #[error("Incompatible parents: {0}")]
    IncompatibleParents(String),

    #[error("Fitness oracle failed for {genome}: {source}")]
    Oracle {
        genome: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Run cancelled before generation {generation}")]
    Cancelled { generation: usize },

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, EvolveError>;
