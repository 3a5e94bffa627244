use eyre::{Error, WrapErr};
use std::path::Path;
use std::str::FromStr;
use toml::{Table, Value};

pub const DEFAULT_CONFIG_FILE: &str = "rcohort.toml";

#[derive(Debug, Default)]
pub struct Config {
    conf: Table,
}

impl Config {
    pub fn load(file_name: impl AsRef<Path>) -> Result<Config, Error> {
        let file_name = file_name.as_ref();
        let text = std::fs::read_to_string(file_name)
            .wrap_err_with(|| format!("cannot load configuration file {}", file_name.display()))?;
        text.parse()
            .wrap_err_with(|| format!("cannot parse configuration file {}", file_name.display()))
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Config {
            conf: s.parse::<Table>()?,
        })
    }
}

pub fn get_config(config: &Config, section: &str, key: &str) -> Option<String> {
    config
        .conf
        .get(section)
        .and_then(Value::as_table)
        .and_then(|s| s.get(key))
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

/// Parse an optional configuration entry, falling back to `default`.
pub fn parse_config<T>(config: &Config, section: &str, key: &str, default: T) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get_config(config, section, key) {
        Some(value) => value
            .parse::<T>()
            .wrap_err_with(|| format!("cannot parse {}.{} configuration parameter", section, key)),
        None => Ok(default),
    }
}
