//! CLI runner - loads the inventory and prints it

use crate::cli::commands::Cli;
use crate::config::{self, PluginConfigFile, PluginOptions};
use crate::error::{Error, Result};
use crate::inventory::Inventory;
use crate::plugin::InventoryPlugin;
use serde_json::Value;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing JSON to stdout
    pub async fn run(&self) -> Result<()> {
        let options = self.load_options()?;
        let output = self.render(&options).await?;
        println!("{output}");
        Ok(())
    }

    /// Resolve plugin options from the config file and environment
    pub fn load_options(&self) -> Result<PluginOptions> {
        let file = match &self.cli.inventory {
            Some(path) => {
                if !config::verify_file(path) {
                    return Err(Error::config(format!(
                        "'{}' is not a portal inventory file (expected an existing file ending in portal.yml or portal.yaml)",
                        path.display()
                    )));
                }
                Some(PluginConfigFile::load(path)?)
            }
            None => None,
        };

        PluginOptions::from_env(file.as_ref())
    }

    /// Load the inventory and render the requested output
    pub async fn render(&self, options: &PluginOptions) -> Result<String> {
        let plugin = InventoryPlugin::new()?;
        let inventory = plugin.load_inventory(options).await?;
        self.format(&self.select(&inventory))
    }

    /// Pick the document for the requested mode
    fn select(&self, inventory: &Inventory) -> Value {
        match &self.cli.host {
            Some(host) => inventory.host_vars_json(host),
            None => inventory.to_list_json(),
        }
    }

    fn format(&self, value: &Value) -> Result<String> {
        let text = if self.cli.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        text.map_err(|e| Error::output(format!("Failed to render inventory JSON: {e}")))
    }
}
