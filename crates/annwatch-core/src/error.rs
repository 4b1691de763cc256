use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read rules file {path}: {source}")]
    RulesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file: {0}")]
    RulesFileParse(#[from] serde_yaml::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
