use serde::{Deserialize, Serialize};
use tracing::warn;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{errors::StorageError, LocalStorage, Storage};

#[cfg(target_arch = "wasm32")]
const CONFIG_KEY: &str = "mediamirror.config";
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_ENV: &str = "MEDIAMIRROR_CONFIG";

const DEFAULT_FIRST_SOURCE: &str =
    "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4";
const DEFAULT_SECOND_SOURCE: &str =
    "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4";

/// Sources and presentation settings for the player board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_first_source")]
    pub first_source: String,
    #[serde(default = "default_second_source")]
    pub second_source: String,
    /// DOM id used to look up the second video after mount
    #[serde(default = "default_second_element_id")]
    pub second_element_id: String,
    /// Decimal places shown in the time readouts
    #[serde(default = "default_time_precision")]
    pub time_precision: usize,
}

fn default_first_source() -> String {
    DEFAULT_FIRST_SOURCE.to_string()
}

fn default_second_source() -> String {
    DEFAULT_SECOND_SOURCE.to_string()
}

fn default_second_element_id() -> String {
    "videoId".to_string()
}

fn default_time_precision() -> usize {
    2
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            first_source: default_first_source(),
            second_source: default_second_source(),
            second_element_id: default_second_element_id(),
            time_precision: default_time_precision(),
        }
    }
}

impl PlayerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(target_arch = "wasm32")]
pub fn load_config() -> PlayerConfig {
    match LocalStorage::get(CONFIG_KEY) {
        Ok(config) => config,
        Err(StorageError::KeyNotFound(_)) => PlayerConfig::default(),
        Err(err) => {
            warn!("ignoring stored player config: {err}");
            PlayerConfig::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_config() -> PlayerConfig {
    let Ok(json) = std::env::var(CONFIG_ENV) else {
        return PlayerConfig::default();
    };
    PlayerConfig::from_json(&json).unwrap_or_else(|err| {
        warn!("ignoring {CONFIG_ENV}: {err}");
        PlayerConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PlayerConfig::from_json(r#"{"time_precision": 0}"#).unwrap();
        assert_eq!(config.time_precision, 0);
        assert_eq!(config.first_source, DEFAULT_FIRST_SOURCE);
        assert_eq!(config.second_element_id, "videoId");
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(PlayerConfig::from_json("{}").unwrap(), PlayerConfig::default());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(PlayerConfig::from_json("{\"time_precision\": -1}").is_err());
        assert!(PlayerConfig::from_json("not json").is_err());
    }
}
