use crate::commands::{CmdMessage, CmdResult};
use crate::config::FormdeskConfig;
use crate::error::{FormError, Result};
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub const CONFIG_KEYS: [&str; 2] = ["storage-key", "delete-scope"];

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = FormdeskConfig::load(config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::ShowKey(key) => {
            result.add_message(CmdMessage::info(format!("{} = {}", key, value_of(&config, &key)?)));
        }
        ConfigAction::Set(key, value) => {
            match key.as_str() {
                "storage-key" => config.set_storage_key(&value)?,
                "delete-scope" => config.delete_scope = value.parse()?,
                other => return Err(unknown_key(other)),
            }
            config.save(config_dir)?;
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key,
                value_of(&config, &key)?
            )));
        }
    }

    Ok(result.with_config(config))
}

fn value_of(config: &FormdeskConfig, key: &str) -> Result<String> {
    match key {
        "storage-key" => Ok(config.storage_key.clone()),
        "delete-scope" => Ok(config.delete_scope.to_string()),
        other => Err(unknown_key(other)),
    }
}

fn unknown_key(key: &str) -> FormError {
    FormError::Api(format!(
        "Unknown config key: {} (known: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::DeleteScope;

    #[test]
    fn show_all_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(FormdeskConfig::default()));
    }

    #[test]
    fn set_persists_value() {
        let dir = tempfile::tempdir().unwrap();
        run(
            dir.path(),
            ConfigAction::Set("delete-scope".into(), "clear-store".into()),
        )
        .unwrap();

        let loaded = FormdeskConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.delete_scope, DeleteScope::ClearStore);

        let shown = run(dir.path(), ConfigAction::ShowKey("delete-scope".into())).unwrap();
        assert_eq!(shown.messages[0].content, "delete-scope = clear-store");
    }

    #[test]
    fn invalid_values_are_rejected_and_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(dir.path(), ConfigAction::Set("delete-scope".into(), "all".into())).is_err());
        assert!(run(dir.path(), ConfigAction::Set("colour".into(), "red".into())).is_err());
        assert!(run(dir.path(), ConfigAction::ShowKey("colour".into())).is_err());
        assert!(!dir.path().join("config.json").exists());
    }
}
