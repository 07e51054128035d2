/// Errors from loading configuration. Kept out of [`super::AugurError`] so
/// the domain taxonomy stays comparable in tests.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
