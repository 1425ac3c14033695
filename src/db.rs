use anyhow::{Context, Result};
use mongodb::options::{ClientOptions, Credential, ServerAddress};
use mongodb::{Client, Database as MongoDatabase, bson::doc};
use secrecy::ExposeSecret;

use crate::config::MongoDbConfig;

/// Application name reported to the server in the connection handshake.
const APP_NAME: &str = "docdb-config";

/// Database wrapper providing connection management for a DocumentDB cluster.
#[derive(Debug, Clone)]
pub struct Database {
    client: Client,
    db: MongoDatabase,
}

impl Database {
    /// Driver options for the cluster described by `config`.
    ///
    /// DocumentDB does not support retryable writes, so they are turned off.
    pub fn client_options(config: &MongoDbConfig) -> Result<ClientOptions> {
        let host = ServerAddress::parse(&config.endpoint)
            .with_context(|| format!("Invalid DocumentDB endpoint: {}", config.endpoint))?;

        let mut credential = Credential::default();
        credential.username = Some(config.user.clone());
        credential.password = Some(config.password.expose_secret().to_string());

        let mut options = ClientOptions::default();
        options.hosts = vec![host];
        options.credential = Some(credential);
        options.connect_timeout = Some(config.connect_timeout());
        options.server_selection_timeout = Some(config.connect_timeout());
        options.direct_connection = Some(true);
        options.retry_writes = Some(false);
        options.app_name = Some(APP_NAME.to_string());

        Ok(options)
    }

    /// Connect to the cluster and select `db_name`.
    /// The connection is verified with a `ping` before returning.
    pub async fn connect(config: &MongoDbConfig, db_name: &str) -> Result<Self> {
        let client_options = Self::client_options(config)?;

        let client =
            Client::with_options(client_options).context("Failed to create MongoDB client")?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .with_context(|| format!("Failed to connect to DocumentDB at {}", config.endpoint))?;

        tracing::info!(
            region = %config.region,
            endpoint = %config.endpoint,
            "Connected to DocumentDB database: {}",
            db_name
        );

        let db = client.database(db_name);

        Ok(Self { client, db })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database(&self) -> &MongoDatabase {
        &self.db
    }
}
