use crate::error::{FormError, Result};
use crate::store::mirror::DEFAULT_STORAGE_KEY;
use crate::table::DeleteScope;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for formdesk, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormdeskConfig {
    /// Key the record list is mirrored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Whether deletes also empty the session's record store
    #[serde(default)]
    pub delete_scope: DeleteScope,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for FormdeskConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            delete_scope: DeleteScope::default(),
        }
    }
}

impl FormdeskConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(FormError::Io)?;
        let config: FormdeskConfig =
            serde_json::from_str(&content).map_err(FormError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(FormError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(FormError::Serialization)?;
        fs::write(config_path, content).map_err(FormError::Io)?;
        Ok(())
    }

    /// Set the storage key. Must be usable as a plain file name.
    pub fn set_storage_key(&mut self, key: &str) -> Result<()> {
        let key = key.trim();
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') || key == "config" {
            return Err(FormError::Api(format!("Invalid storage key: {:?}", key)));
        }
        self.storage_key = key.to_string();
        Ok(())
    }
}
