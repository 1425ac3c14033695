use std::env;
use std::time::Duration;

use once_cell::sync::OnceCell;
use secrecy::SecretString;
use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Prefix shared by every variable bound into [`MongoDbConfig`].
pub const ENV_PREFIX: &str = "DOCUMENTDB_";

/// The only variables read. Any other name, including differently cased
/// or doubly prefixed ones, is ignored.
pub const ENV_VARS: [&str; 5] = [
    "DOCUMENTDB_REGION",
    "DOCUMENTDB_ENDPOINT",
    "DOCUMENTDB_USER",
    "DOCUMENTDB_PASSWORD",
    "DOCUMENTDB_CONNECT_TIMEOUT_SECS",
];

const DEFAULT_REGION: &str = "ap-northeast-1";
const DEFAULT_ENDPOINT: &str = "0.0.0.0:27017";
const DEFAULT_USER: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Process-wide configuration, set once by [`init`].
static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Clone)]
pub struct Config {
    pub mongodb: MongoDbConfig,
}

/// Connection parameters for the DocumentDB cluster.
///
/// Every field falls back to its default when the matching
/// `DOCUMENTDB_*` variable is unset. Set values are taken verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct MongoDbConfig {
    #[serde(default = "default_region")]
    pub region: String,
    /// `host:port` of the cluster.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(
        default = "default_password",
        deserialize_with = "secret_string::deserialize"
    )]
    pub password: SecretString,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl MongoDbConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Config {
    /// Build a fresh configuration from the process environment.
    ///
    /// Nothing is cached; use this to construct the config once at startup
    /// and hand it to whatever needs it.
    pub fn from_env() -> Result<Self> {
        let mut vars = Vec::new();
        for (key, value) in env::vars_os() {
            let Some(key) = key.to_str().filter(|key| ENV_VARS.contains(key)) else {
                continue;
            };
            let value = value
                .into_string()
                .map_err(|_| ConfigError::NotUnicode(key.to_string()))?;
            vars.push((key.to_string(), value));
        }
        Self::from_vars(vars)
    }

    /// Build a configuration from explicit `(name, value)` pairs, using the
    /// same names and defaults as [`Config::from_env`].
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars = vars
            .into_iter()
            .filter(|(key, _)| ENV_VARS.contains(&key.as_str()));
        let mongodb = envy::prefixed(ENV_PREFIX).from_iter::<_, MongoDbConfig>(vars)?;
        Ok(Config { mongodb })
    }
}

/// Load the process-wide configuration.
///
/// The environment is read on the first successful call only; later calls
/// return the cached instance even if the environment has changed since.
/// A `.env` file in the working directory is loaded first, without
/// overriding variables that are already set.
pub fn init() -> Result<&'static Config> {
    CONFIG.get_or_try_init(|| {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("loaded environment from {}", path.display());
        }
        let config = Config::from_env()?;
        tracing::debug!(
            region = %config.mongodb.region,
            endpoint = %config.mongodb.endpoint,
            "configuration loaded"
        );
        Ok(config)
    })
}

/// Get the process-wide configuration, loading it on first use.
pub fn get_config() -> Result<&'static Config> {
    init()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

fn default_password() -> SecretString {
    SecretString::new(DEFAULT_PASSWORD.into())
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

mod secret_string {
    use secrecy::SecretString;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}
