use crate::output::OutputFormat;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use harmony_client_core::{ClientConfig, ValidationError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application directory name under the platform config dir
const APP_CONFIG_DIR: &str = "baton";

/// Config file name
const CONFIG_FILE: &str = "config.toml";

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub harmony: ClientConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub default_format: String,
    pub color_enabled: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            color_enabled: true,
        }
    }
}

impl AppConfig {
    /// Apply CLI argument overrides to the configuration
    pub fn apply_cli_overrides(&mut self, harmony_api: Option<&str>, noverifyssl: bool) {
        if let Some(host) = harmony_api {
            self.harmony.api_host = host.to_string();
        }
        if noverifyssl {
            self.harmony.verify_ssl = false;
        }
    }

    /// The configured default output format
    pub fn output_format(&self) -> Result<OutputFormat> {
        OutputFormat::from_string(&self.output.default_format)
            .context("Invalid output.default_format in configuration")
    }
}

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with default XDG-compliant paths
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// Get the default XDG-compliant configuration path
    fn default_config_path() -> PathBuf {
        // XDG_CONFIG_HOME wins everywhere but Windows
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config)
                .join(APP_CONFIG_DIR)
                .join(CONFIG_FILE);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_CONFIG_DIR)
            .join(CONFIG_FILE)
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    ///
    /// CLI flags are applied afterwards with [`AppConfig::apply_cli_overrides`].
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new();

        // Layer 1: Defaults
        figment = figment.merge(Serialized::defaults(AppConfig::default()));

        // Layer 2: Config file (if exists)
        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        // Layer 3: Environment variables, e.g. BATON_HARMONY__API_HOST
        figment = figment.merge(Env::prefixed("BATON_").split("__"));

        let config: AppConfig = figment.extract().context("Failed to load configuration")?;

        // A zero timeout would fail every request
        if config.harmony.timeout_seconds == 0 {
            return Err(ValidationError::invalid_parameter(
                "harmony.timeout_seconds",
                "must be greater than 0",
            )
            .into());
        }

        Ok(config)
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.load()?;
        let value = toml::Value::try_from(&config)?;

        let mut current = &value;
        for part in key.split('.') {
            match current {
                toml::Value::Table(table) => {
                    current = table
                        .get(part)
                        .ok_or_else(|| anyhow::anyhow!("Key '{}' not found", key))?;
                }
                _ => anyhow::bail!("Invalid key path: {}", key),
            }
        }

        match current {
            toml::Value::String(s) => Ok(s.clone()),
            toml::Value::Integer(i) => Ok(i.to_string()),
            toml::Value::Float(f) => Ok(f.to_string()),
            toml::Value::Boolean(b) => Ok(b.to_string()),
            _ => anyhow::bail!("Value at '{}' is not a simple type", key),
        }
    }

    /// Set a configuration value by key (dot notation) and persist it
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parsed_value = Self::parse_config_value(key, value)?;

        let (section, field) = key
            .split_once('.')
            .ok_or_else(|| anyhow::anyhow!("Key must look like 'section.field': {}", key))?;

        // Load existing config or create new
        let mut config: toml::Table = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", self.config_path.display()))?
        } else {
            toml::Table::new()
        };

        let table = config
            .entry(section.to_string())
            .or_insert(toml::Value::Table(toml::Table::new()));
        match table {
            toml::Value::Table(table) => {
                table.insert(field.to_string(), parsed_value);
            }
            _ => anyhow::bail!("Invalid key path: expected table at '{}'", section),
        }

        // Ensure directory exists
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.config_path, toml::to_string_pretty(&config)?)?;

        Ok(())
    }

    /// List all configuration values, sorted by key
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let config = self.load()?;
        let value = toml::Value::try_from(&config)?;

        let mut items = Vec::new();
        Self::collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }

    /// Recursively collect all key-value pairs from TOML
    fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
        match value {
            toml::Value::Table(table) => {
                for (key, val) in table {
                    let new_prefix = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    Self::collect_values(val, new_prefix, items);
                }
            }
            toml::Value::String(s) => items.push((prefix, s.clone())),
            toml::Value::Integer(i) => items.push((prefix, i.to_string())),
            toml::Value::Float(f) => items.push((prefix, f.to_string())),
            toml::Value::Boolean(b) => items.push((prefix, b.to_string())),
            _ => {}
        }
    }

    /// Validate a value for a known key and convert it to its TOML type
    fn parse_config_value(key: &str, value: &str) -> Result<toml::Value> {
        match key {
            "harmony.api_host" => {
                ClientConfig::for_host(value)
                    .base_url()
                    .with_context(|| format!("'{value}' is not a usable maestro address"))?;
                Ok(toml::Value::String(value.to_string()))
            }
            "harmony.api_version" => {
                if value.trim_matches('/').is_empty() {
                    anyhow::bail!("api_version must not be empty");
                }
                Ok(toml::Value::String(value.to_string()))
            }
            "harmony.timeout_seconds" => {
                let timeout: u64 = value
                    .parse()
                    .context("timeout_seconds must be a positive integer")?;
                if timeout == 0 {
                    anyhow::bail!("timeout_seconds must be greater than 0");
                }
                Ok(toml::Value::Integer(i64::try_from(timeout)?))
            }
            "harmony.verify_ssl" | "output.color_enabled" => {
                let enabled: bool = value.parse().context("Value must be 'true' or 'false'")?;
                Ok(toml::Value::Boolean(enabled))
            }
            "output.default_format" => {
                OutputFormat::from_string(value)?;
                Ok(toml::Value::String(value.to_lowercase()))
            }
            _ => anyhow::bail!("Unknown configuration key: {}", key),
        }
    }
}

/// Load configuration from the default location
pub fn get_config() -> Result<AppConfig> {
    ConfigManager::new().load()
}
