use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_yml;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use thiserror::Error;

const CONFIG_PATHS: [&str; 2] = ["config/battery_discovery.yaml", "battery_discovery.yaml"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read config file {0}: {1}")]
    Io(String, std::io::Error),
    #[error("Unable to parse config file: {0}")]
    Parse(#[from] serde_yml::Error),
    #[error("No Home Assistant URL configured (hub.url or HA_URL)")]
    MissingUrl,
    #[error("No Home Assistant token configured (hub.token or HA_TOKEN)")]
    MissingToken,
}

fn hub_url_default() -> String { return "http://homeassistant.local:8123".to_string() }
fn hub_token_default() -> String { return "".to_string() }
fn hub_dashboard_path_default() -> String { return "/lovelace/battery-monitoring".to_string() }

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct HubConfig {
    #[serde(default="hub_url_default")]
    pub url: String,
    #[serde(default="hub_token_default")]
    pub token: String,
    #[serde(default="hub_dashboard_path_default")]
    pub dashboard_path: String,
}

impl HubConfig {
    pub fn dashboard_url(&self) -> String {
        return format!("{}{}", self.url, self.dashboard_path);
    }
}

fn notify_channels_default() -> Vec<String> {
    return vec!["email".to_string(), "telegram".to_string(), "battery_alerts_email".to_string()];
}
fn notify_short_form_channel_default() -> String { return "telegram".to_string() }

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct NotifyConfig {
    /// Notification services called in this order
    #[serde(default="notify_channels_default")]
    pub channels: Vec<String>,
    /// The channel which receives the short message, everything else gets the full report
    #[serde(default="notify_short_form_channel_default")]
    pub short_form_channel: String,
}

fn output_directory_default() -> String { return ".".to_string() }

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct OutputConfig {
    #[serde(default="output_directory_default")]
    pub directory: String,
}

fn automation_toggle_entity_default() -> String { return "input_boolean.battery_alerts_enabled".to_string() }
fn automation_below_default() -> u32 { return 20 }
fn automation_for_minutes_default() -> u32 { return 30 }

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct AutomationConfig {
    #[serde(default="automation_toggle_entity_default")]
    pub toggle_entity: String,
    #[serde(default="automation_below_default")]
    pub below: u32,
    #[serde(default="automation_for_minutes_default")]
    pub for_minutes: u32,
}

fn hub_default() -> HubConfig {
    return HubConfig { url: hub_url_default(), token: hub_token_default(), dashboard_path: hub_dashboard_path_default() }
}
fn notify_default() -> NotifyConfig {
    return NotifyConfig { channels: notify_channels_default(), short_form_channel: notify_short_form_channel_default() }
}
fn output_default() -> OutputConfig { return OutputConfig { directory: output_directory_default() } }
fn automation_default() -> AutomationConfig {
    return AutomationConfig {
        toggle_entity: automation_toggle_entity_default(),
        below: automation_below_default(),
        for_minutes: automation_for_minutes_default(),
    }
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    #[serde(default="hub_default")]
    pub hub: HubConfig,
    #[serde(default="notify_default")]
    pub notify: NotifyConfig,
    #[serde(default="output_default")]
    pub output: OutputConfig,
    #[serde(default="automation_default")]
    pub automation: AutomationConfig,
}

impl Default for Config {
    fn default() -> Self {
        return Config {
            hub: hub_default(),
            notify: notify_default(),
            output: output_default(),
            automation: automation_default(),
        }
    }
}

impl Config {
    /// Loads the configuration file (if any), applies the `HA_URL` / `HA_TOKEN`
    /// overrides and validates the result.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("BD_CONFIG") {
            Ok(path) => Config::from_file(&path)?,
            Err(_) => {
                let mut found = None;
                for path in CONFIG_PATHS {
                    if Path::new(path).exists() {
                        found = Some(Config::from_file(path)?);
                        break;
                    }
                }
                match found {
                    Some(c) => c,
                    None => {
                        info!("No config file found, using defaults and environment");
                        Config::default()
                    }
                }
            }
        };

        config.apply_overrides(std::env::var("HA_URL").ok(), std::env::var("HA_TOKEN").ok());
        config.validate()?;
        return Ok(config);
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        debug!("Reading config from {path}");
        let mut file = File::open(path).map_err(|e| ConfigError::Io(path.to_string(), e))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| ConfigError::Io(path.to_string(), e))?;
        return Config::from_yaml(&contents);
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let c: Config = serde_yml::from_str(contents)?;
        return Ok(c);
    }

    pub fn apply_overrides(&mut self, url: Option<String>, token: Option<String>) {
        if let Some(url) = url {
            self.hub.url = url;
        }
        if let Some(token) = token {
            self.hub.token = token;
        }
        self.hub.url = self.hub.url.trim_end_matches('/').to_string();
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hub.url.trim().is_empty() {
            return Err(ConfigError::MissingUrl);
        }
        if self.hub.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        return Ok(());
    }
}
