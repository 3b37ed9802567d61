use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Configuration Error: {yaml_key} (yaml) / {env_key} (env) not set")]
    MissingSetting {
        yaml_key: &'static str,
        env_key: &'static str,
    },

    #[error("Configuration Error: invalid entry '{entry}' in {env_key}: {source}")]
    InvalidListEntry {
        env_key: &'static str,
        entry: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Authentication Failed for Nx server {endpoint}: {details}")]
    Authentication { endpoint: String, details: String },

    #[error("Network Error: {0}")]
    Network(String),

    #[error("HTTP Error: '{endpoint}' returned status {status}")]
    HttpStatus { endpoint: String, status: u16 },

    #[error("Decode Error: {0}")]
    Decode(String),

    #[error("Telegram Error: {0}")]
    Telegram(String),

    #[error("File I/O Error: {0}")]
    Io(String),
}

// Allow conversion from std::io::Error to AppError::Io
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<teloxide::RequestError> for AppError {
    fn from(err: teloxide::RequestError) -> Self {
        AppError::Telegram(err.to_string())
    }
}
