//! Configuration management for the opslog application.
//!
//! Settings live in a JSON document in the platform application-data
//! directory. Each module is optional: the operator profile printed on
//! reports, the remote mirror endpoint, and local storage behavior. The
//! interactive `opslog init` wizard fills them in.

use super::data_storage::DataStorage;
use crate::api::mirror::MirrorConfig;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Represents a configurable module shown by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Operator profile rendered in the report header.
///
/// Name and registration are the required pair; the rest defaults. The
/// position is fixed to "Operador" unless overridden by hand in the file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProfileConfig {
    pub name: String,
    pub registration: String,
    #[serde(default = "default_position")]
    pub position: String,
    #[serde(default)]
    pub auxiliar_name: String,
    #[serde(default)]
    pub vehicle_plate: String,
}

fn default_position() -> String {
    "Operador".to_string()
}

impl Default for ProfileConfig {
    fn default() -> Self {
        ProfileConfig {
            name: String::new(),
            registration: String::new(),
            position: default_position(),
            auxiliar_name: String::new(),
            vehicle_plate: String::new(),
        }
    }
}

impl ProfileConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "profile".to_string(),
            name: Message::ConfigModuleProfile.to_string(),
        }
    }

    pub fn init(current: &Option<ProfileConfig>) -> Result<Self> {
        let default = current.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleProfile);
        Ok(ProfileConfig {
            name: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptProfileName.to_string())
                .default(default.name)
                .interact_text()?,
            registration: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptProfileRegistration.to_string())
                .default(default.registration)
                .interact_text()?,
            position: default.position,
            auxiliar_name: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptProfileAuxiliar.to_string())
                .default(default.auxiliar_name)
                .allow_empty(true)
                .interact_text()?,
            vehicle_plate: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptProfileVehiclePlate.to_string())
                .default(default.vehicle_plate)
                .allow_empty(true)
                .interact_text()?,
        })
    }
}

/// Local storage behavior.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct StorageConfig {
    /// When true, a history blob repaired during load (dropped corrupt
    /// entries, defaulted fields) is written back to disk immediately
    /// instead of waiting for the next save.
    #[serde(default)]
    pub rewrite_on_load: bool,
}

impl StorageConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "storage".to_string(),
            name: Message::ConfigModuleStorage.to_string(),
        }
    }
}

/// Main configuration container.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror: Option<MirrorConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfig>,
}

impl Config {
    /// Loads the configuration, falling back to defaults when no file
    /// exists yet.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Runs the interactive setup wizard and returns the updated
    /// configuration for saving.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let node_descriptions = vec![ProfileConfig::module(), MirrorConfig::module(), StorageConfig::module()];

        let selected_nodes = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&node_descriptions.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected_nodes {
            match node_descriptions[selection].key.as_str() {
                "profile" => config.profile = Some(ProfileConfig::init(&config.profile)?),
                "mirror" => config.mirror = Some(MirrorConfig::init(&config.mirror)?),
                "storage" => {
                    let default = config.storage.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleStorage);
                    config.storage = Some(StorageConfig {
                        rewrite_on_load: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptRewriteOnLoad.to_string())
                            .default(default.rewrite_on_load)
                            .interact()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
