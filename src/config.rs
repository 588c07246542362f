//! Plugin configuration
//!
//! The host runtime selects this inventory through a small YAML file whose
//! name ends in `portal.yml` or `portal.yaml`:
//!
//! ```yaml
//! plugin: uofuchpc.cmdb.portal
//! cmdb_api_bearer_token: "123456abcdefgH"
//! cmdb_api_url: "https://api.example.com/route/"
//! ```
//!
//! Both options may be omitted from the file and supplied through
//! `CMDB_API_BEARER_TOKEN` / `CMDB_API_URL` instead, or through the
//! `[cmdb]` section of the runtime's `ansible.cfg`:
//!
//! ```ini
//! [cmdb]
//! cmdb_api_bearer_token = 123456abcdefgH
//! cmdb_api_url = https://api.example.com/route/
//! ```

use crate::error::{Error, Result};
use ini::Ini;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Short plugin name
pub const PLUGIN_NAME: &str = "portal";

/// Fully-qualified plugin name
pub const PLUGIN_FQCN: &str = "uofuchpc.cmdb.portal";

/// Environment variable for the bearer token
pub const ENV_BEARER_TOKEN: &str = "CMDB_API_BEARER_TOKEN";

/// Environment variable for the API URL
pub const ENV_API_URL: &str = "CMDB_API_URL";

/// Environment variable naming the runtime config file
pub const ENV_RUNTIME_CONFIG: &str = "ANSIBLE_CONFIG";

/// Section of the runtime config holding the plugin options
pub const RUNTIME_SECTION: &str = "cmdb";

const RUNTIME_CONFIG_NAME: &str = "ansible.cfg";
const SYSTEM_RUNTIME_CONFIG: &str = "/etc/ansible/ansible.cfg";

const OPT_BEARER_TOKEN: &str = "cmdb_api_bearer_token";
const OPT_API_URL: &str = "cmdb_api_url";

// ============================================================================
// Config File
// ============================================================================

/// Contents of a `*portal.yml` plugin configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginConfigFile {
    /// Plugin selector, `portal` or `uofuchpc.cmdb.portal`
    pub plugin: String,

    /// Bearer token for the CMDB API
    #[serde(default)]
    pub cmdb_api_bearer_token: Option<String>,

    /// API URL for the CMDB
    #[serde(default)]
    pub cmdb_api_url: Option<String>,
}

impl PluginConfigFile {
    /// Load and check a plugin configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read inventory config '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and check plugin configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        if config.plugin != PLUGIN_NAME && config.plugin != PLUGIN_FQCN {
            return Err(Error::config(format!(
                "Incorrect plugin name in file: {} (expected {PLUGIN_FQCN})",
                config.plugin
            )));
        }
        Ok(config)
    }
}

/// Check whether a path names a configuration file for this plugin
///
/// The file must exist and its name must end in `portal.yaml` or
/// `portal.yml`.
pub fn verify_file(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    if !path.is_file() || fs::File::open(path).is_err() {
        return false;
    }

    let name = path.to_string_lossy();
    name.ends_with(&format!("{PLUGIN_NAME}.yaml")) || name.ends_with(&format!("{PLUGIN_NAME}.yml"))
}

// ============================================================================
// Runtime Config
// ============================================================================

/// Plugin options read from the `[cmdb]` section of the runtime config
#[derive(Clone, Default)]
pub struct RuntimeConfig {
    /// File the options were read from
    pub path: Option<PathBuf>,
    /// Bearer token for the CMDB API
    pub cmdb_api_bearer_token: Option<String>,
    /// API URL for the CMDB
    pub cmdb_api_url: Option<String>,
}

impl std::fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("path", &self.path)
            .field(
                "cmdb_api_bearer_token",
                &self.cmdb_api_bearer_token.as_ref().map(|_| "<redacted>"),
            )
            .field("cmdb_api_url", &self.cmdb_api_url)
            .finish()
    }
}

impl RuntimeConfig {
    /// Load the `[cmdb]` section of an ini file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read runtime config '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_ini_str(&content)?;
        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse the `[cmdb]` section from ini text
    ///
    /// A missing section yields an empty config.
    pub fn from_ini_str(content: &str) -> Result<Self> {
        let ini = Ini::load_from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse runtime config: {e}")))?;

        let Some(section) = ini.section(Some(RUNTIME_SECTION)) else {
            return Ok(Self::default());
        };

        Ok(Self {
            path: None,
            cmdb_api_bearer_token: section.get(OPT_BEARER_TOKEN).map(str::to_string),
            cmdb_api_url: section.get(OPT_API_URL).map(str::to_string),
        })
    }

    /// Files searched for the runtime config, in priority order
    ///
    /// `ANSIBLE_CONFIG` may name a file or a directory holding
    /// `ansible.cfg`.
    pub fn candidates<F>(env: F, cwd: &Path) -> Vec<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut paths = Vec::new();

        if let Some(explicit) = env(ENV_RUNTIME_CONFIG).filter(|v| !v.is_empty()) {
            let explicit = PathBuf::from(explicit);
            if explicit.is_dir() {
                paths.push(explicit.join(RUNTIME_CONFIG_NAME));
            } else {
                paths.push(explicit);
            }
        }

        paths.push(cwd.join(RUNTIME_CONFIG_NAME));

        if let Some(home) = env("HOME").filter(|v| !v.is_empty()) {
            paths.push(Path::new(&home).join(format!(".{RUNTIME_CONFIG_NAME}")));
        }

        paths.push(PathBuf::from(SYSTEM_RUNTIME_CONFIG));
        paths
    }

    /// Load the first runtime config that exists, if any
    pub fn discover<F>(env: F, cwd: &Path) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        match Self::candidates(env, cwd).into_iter().find(|p| p.is_file()) {
            Some(path) => {
                debug!("Using runtime config {}", path.display());
                Self::load(path).map(Some)
            }
            None => Ok(None),
        }
    }
}

// ============================================================================
// Resolved Options
// ============================================================================

/// Fully resolved plugin options
#[derive(Clone)]
pub struct PluginOptions {
    /// Bearer token for the CMDB API
    pub bearer_token: String,
    /// API URL for the CMDB
    pub api_url: Url,
}

impl std::fmt::Debug for PluginOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginOptions")
            .field("bearer_token", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .finish()
    }
}

impl PluginOptions {
    /// Resolve options from the config file, an environment lookup and
    /// the runtime config
    ///
    /// File values win over environment values, which win over the
    /// runtime config. Empty strings count as unset.
    pub fn resolve<F>(
        file: Option<&PluginConfigFile>,
        env: F,
        runtime: Option<&RuntimeConfig>,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bearer_token = pick([
            file.and_then(|f| f.cmdb_api_bearer_token.clone()),
            env(ENV_BEARER_TOKEN),
            runtime.and_then(|r| r.cmdb_api_bearer_token.clone()),
        ])
        .ok_or_else(|| Error::missing_field(OPT_BEARER_TOKEN))?;

        let raw_url = pick([
            file.and_then(|f| f.cmdb_api_url.clone()),
            env(ENV_API_URL),
            runtime.and_then(|r| r.cmdb_api_url.clone()),
        ])
        .ok_or_else(|| Error::missing_field(OPT_API_URL))?;

        Ok(Self {
            bearer_token,
            api_url: parse_api_url(&raw_url)?,
        })
    }

    /// Resolve options using the process environment and the runtime
    /// config found from the current directory
    pub fn from_env(file: Option<&PluginConfigFile>) -> Result<Self> {
        let env = |key: &str| std::env::var(key).ok();
        let cwd = std::env::current_dir()?;
        let runtime = RuntimeConfig::discover(env, &cwd)?;
        Self::resolve(file, env, runtime.as_ref())
    }
}

fn pick<const N: usize>(sources: [Option<String>; N]) -> Option<String> {
    sources.into_iter().flatten().find(|v| !v.is_empty())
}

fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| Error::invalid_value(OPT_API_URL, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::invalid_value(
            OPT_API_URL,
            format!("unsupported scheme '{other}'"),
        )),
    }
}
