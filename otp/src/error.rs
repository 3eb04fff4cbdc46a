use std::path::PathBuf;

use thiserror::Error;

/// Raised by [`crate::base32::decode`] for input outside the RFC 4648 alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid base32 character {character:?} at position {position}")]
pub struct DecodeError {
    pub character: char,
    pub position: usize,
}

#[derive(Debug, Error)]
pub enum TotpError {
    #[error("secret is not valid base32: {0}")]
    Decode(#[from] DecodeError),

    #[error("invalid secret: {0}")]
    InvalidSecret(&'static str),

    #[error("system clock is set before the unix epoch")]
    Clock(#[from] std::time::SystemTimeError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no TOTP secret configured")]
    MissingSecret,
}
