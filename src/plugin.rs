//! Inventory plugin entry point
//!
//! Wires the pipeline together: configuration → fetch → validate →
//! transform → register. Every step before registration is fallible
//! without side effects: a fetch, validation or transform failure never
//! touches the sink. Registrations are replayed into a scratch
//! [`Inventory`] first, so names the inventory rejects also fail before
//! the caller's sink sees a call.

use crate::config::{self, PluginConfigFile, PluginOptions};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::inventory::{register, Inventory, InventorySink};
use crate::schema::Schema;
use crate::transform::{transform, RawPayload};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Where a raw inventory payload comes from
#[async_trait]
pub trait PayloadSource: Send + Sync {
    /// Fetch the raw payload
    async fn fetch(&self) -> Result<Value>;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// Payload source backed by the CMDB API
pub struct CmdbSource<'a> {
    client: &'a HttpClient,
    options: &'a PluginOptions,
}

impl<'a> CmdbSource<'a> {
    /// Create a source for the configured CMDB endpoint
    pub fn new(client: &'a HttpClient, options: &'a PluginOptions) -> Self {
        Self { client, options }
    }
}

#[async_trait]
impl<'a> PayloadSource for CmdbSource<'a> {
    async fn fetch(&self) -> Result<Value> {
        self.client
            .fetch_payload(&self.options.api_url, &self.options.bearer_token)
            .await
    }

    fn describe(&self) -> String {
        format!("CMDB at {}", self.options.api_url)
    }
}

/// The `portal` dynamic inventory plugin
#[derive(Debug)]
pub struct InventoryPlugin {
    client: HttpClient,
    schema: Schema,
}

impl InventoryPlugin {
    /// Create the plugin, checking its requirements
    ///
    /// Fails with a requirement error if the HTTP client cannot be built or
    /// the bundled schema cannot be loaded.
    pub fn new() -> Result<Self> {
        Self::with_http_config(HttpClientConfig::default())
    }

    /// Create the plugin with a custom HTTP client configuration
    pub fn with_http_config(config: HttpClientConfig) -> Result<Self> {
        let client = HttpClient::with_config(config)?;
        let schema = Schema::bundled()?;
        debug!("Inventory plugin requirements satisfied");
        Ok(Self { client, schema })
    }

    /// Check whether `path` is a configuration file for this plugin
    pub fn verify_file(&self, path: impl AsRef<Path>) -> bool {
        config::verify_file(path)
    }

    /// The schema payloads are validated against
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Parse the inventory described by a plugin configuration file
    pub async fn parse(&self, sink: &mut dyn InventorySink, path: impl AsRef<Path>) -> Result<()> {
        let file = PluginConfigFile::load(path)?;
        let options = PluginOptions::from_env(Some(&file))?;
        self.parse_with_options(sink, &options).await
    }

    /// Parse the inventory from already resolved options
    pub async fn parse_with_options(
        &self,
        sink: &mut dyn InventorySink,
        options: &PluginOptions,
    ) -> Result<()> {
        let source = CmdbSource::new(&self.client, options);
        self.parse_source(sink, &source).await
    }

    /// Parse the inventory from any payload source
    pub async fn parse_source(
        &self,
        sink: &mut dyn InventorySink,
        source: &dyn PayloadSource,
    ) -> Result<()> {
        info!("Loading inventory from {}", source.describe());
        let payload = source.fetch().await?;
        self.parse_payload(sink, payload)
    }

    /// Validate, transform and register a raw payload
    ///
    /// Errors raised by the caller's own sink during registration are
    /// propagated as-is; calls made before the failing one are not undone.
    pub fn parse_payload(&self, sink: &mut dyn InventorySink, payload: Value) -> Result<()> {
        self.schema.validate(&payload)?;
        let raw = RawPayload::from_value(payload)?;
        let transformed = transform(raw)?;

        register(&mut Inventory::new(), &transformed)?;
        register(sink, &transformed)?;

        info!(
            "Loaded {} hosts in {} groups",
            transformed.records.len(),
            transformed.groups.len()
        );
        Ok(())
    }

    /// Build a fresh in-memory inventory from resolved options
    ///
    /// The inventory is only returned when every registration succeeded.
    pub async fn load_inventory(&self, options: &PluginOptions) -> Result<Inventory> {
        let mut inventory = Inventory::new();
        self.parse_with_options(&mut inventory, options).await?;
        Ok(inventory)
    }
}
