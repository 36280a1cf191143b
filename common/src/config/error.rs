use derive_more::{Display, Error};

#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum ConfigError {
    #[display("Failed to read config file: {_0}")]
    Read(#[error(not(source))] String),
    #[display("Failed to write config file: {_0}")]
    Write(#[error(not(source))] String),
    #[display("Failed to serialize config: {_0}")]
    Serialize(#[error(not(source))] String),
    #[display("Failed to deserialize config: {_0}")]
    Deserialize(#[error(not(source))] String),
    #[display("Config validation error: {_0}")]
    Invalid(#[error(not(source))] String),
}
