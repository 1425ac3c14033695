pub mod config;
pub mod db;
pub mod error;

pub use config::{Config, MongoDbConfig, get_config, init};
pub use error::ConfigError;
