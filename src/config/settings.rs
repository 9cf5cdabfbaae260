use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::util::config_path;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the web server binds to
    pub host: String,
    /// Port the web server binds to
    pub port: u16,
    /// Base URL of the hosted identity service (empty = unconfigured)
    pub identity_base_url: String,
    /// Base URL of the hosted page-document store (empty = unconfigured)
    pub store_base_url: String,
    /// Base URL of the generative content provider
    pub generator_base_url: String,
    /// Model name sent to the content provider
    pub generator_model: String,
    /// API key for the content provider
    pub generator_api_key: String,
    /// Public base URL used when building shareable page links
    pub share_base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            identity_base_url: String::new(),
            store_base_url: String::new(),
            generator_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            generator_model: "gemini-2.5-flash".to_string(),
            generator_api_key: String::new(),
            share_base_url: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TomlServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TomlBackendConfig {
    pub identity_url: Option<String>,
    pub store_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TomlGeneratorConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TomlShareConfig {
    pub base_url: Option<String>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub server: Option<TomlServerConfig>,
    pub backend: Option<TomlBackendConfig>,
    pub generator: Option<TomlGeneratorConfig>,
    pub share: Option<TomlShareConfig>,
}

impl Config {
    /// Load configuration from file, merging with defaults
    pub fn load() -> Self {
        let mut config = Config::default();

        let config_file = config_path();

        // Create example config on first run
        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        if config_file.exists() {
            if let Ok(contents) = fs::read_to_string(&config_file) {
                if let Ok(toml_config) = toml::from_str::<TomlConfig>(&contents) {
                    config.apply(toml_config);
                }
            }
        }

        // Environment wins over the config file for the provider key
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                config.generator_api_key = key;
            }
        }

        config
    }

    fn apply(&mut self, toml_config: TomlConfig) {
        if let Some(server) = toml_config.server {
            if let Some(host) = server.host {
                self.host = host;
            }
            if let Some(port) = server.port {
                self.port = port;
            }
        }
        if let Some(backend) = toml_config.backend {
            if let Some(url) = backend.identity_url {
                self.identity_base_url = url;
            }
            if let Some(url) = backend.store_url {
                self.store_base_url = url;
            }
        }
        if let Some(generator) = toml_config.generator {
            if let Some(url) = generator.base_url {
                self.generator_base_url = url;
            }
            if let Some(model) = generator.model {
                self.generator_model = model;
            }
            if let Some(key) = generator.api_key {
                self.generator_api_key = key;
            }
        }
        if let Some(share) = toml_config.share {
            self.share_base_url = share.base_url;
        }
    }

    /// Public base URL for shareable links, falling back to the bind address
    pub fn resolved_share_base_url(&self) -> String {
        match &self.share_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}:{}", self.host, self.port),
        }
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &PathBuf) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    eprintln!("Failed to create config directory: {}", e);
                    return;
                }
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            eprintln!("Failed to write default config: {}", e);
        }
    }
}
