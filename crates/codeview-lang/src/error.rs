use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading a [`LanguageConfiguration`](crate::LanguageConfiguration).
pub enum LanguageConfigError {
    #[error("YAML parse error: {0}")]
    /// YAML parsing or serialization failed.
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    /// Filesystem I/O failed.
    Io(#[from] std::io::Error),
}
