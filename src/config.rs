use std::env;

use thiserror::Error;

use crate::auth::Credentials;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} has an invalid value: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Startup configuration. Built once in `main` and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub credentials: Credentials,
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| lookup(var).ok_or(ConfigError::Missing(var));

        let server_port = match lookup("SERVER_PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid {
                    var: "SERVER_PORT",
                    value,
                })?,
            None => DEFAULT_PORT,
        };

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Invalid {
                var: "JWT_SECRET",
                value: String::new(),
            });
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            server_port,
            credentials: Credentials::new(required("AUTH_USERNAME")?, required("AUTH_PASSWORD")?),
            jwt_secret,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
