use thiserror::Error;

/// Why a configuration could not be loaded or used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Parsed fine but describes a solver that cannot run.
    #[error("invalid config: {0}")]
    Invalid(String),
}
