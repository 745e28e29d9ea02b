use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The application requires this environment variable to be defined. Check the
    /// documentation or `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Channel name template does not contain exactly one `{n}` placeholder.
    #[error("Invalid channel name format '{0}': expected exactly one {{n}} placeholder")]
    InvalidNameFormat(String),
}
