//! Configuration loading and management

use super::schema::Config;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Configuration loader
///
/// Loads `config.json` from the config directory over built-in defaults,
/// then applies environment overrides.
pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Create a new config loader with the default config directory
    pub fn new() -> Self {
        let config_dir = dirs::home_dir()
            .map(|h| h.join(".glochat"))
            .unwrap_or_else(|| PathBuf::from(".glochat"));

        Self { config_dir }
    }

    /// Create a new config loader with a custom config directory
    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            config_dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Load configuration from file and environment
    pub fn load(&self) -> crate::Result<Config> {
        let config_path = self.config_dir.join("config.json");
        let mut merged = serde_json::to_value(Config::default())?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let file_value: Value = serde_json::from_str(&content)
                .map_err(|e| crate::Error::Config(format!("invalid config.json: {}", e)))?;
            merge_values(&mut merged, file_value);
        }

        apply_env_overrides(&mut merged);

        let config: Config = serde_json::from_value(merged)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config: &Config) -> crate::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        let config_path = self.config_dir.join("config.json");
        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                if let Some(existing) = base_map.get_mut(&key) {
                    merge_values(existing, value);
                } else {
                    base_map.insert(key, value);
                }
            }
        }
        (base_value, overlay_value) => {
            *base_value = overlay_value;
        }
    }
}

fn set_string(root: &mut Value, path: &[&str], value: String) {
    let mut current = root;
    for segment in &path[..path.len() - 1] {
        current = match current {
            Value::Object(map) => map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(serde_json::Map::new())),
            _ => return,
        };
    }
    if let Value::Object(map) = current {
        map.insert(path[path.len() - 1].to_string(), Value::String(value));
    }
}

fn apply_env_overrides(root: &mut Value) {
    if let Ok(key) = std::env::var("GLOCHAT_API_KEY") {
        if !key.trim().is_empty() {
            set_string(root, &["provider", "api_key"], key);
        }
    }
    if let Ok(base) = std::env::var("GLOCHAT_API_BASE") {
        if !base.trim().is_empty() {
            set_string(root, &["provider", "api_base"], base);
        }
    }
    if let Ok(model) = std::env::var("GLOCHAT_MODEL") {
        if !model.trim().is_empty() {
            set_string(root, &["provider", "model"], model);
        }
    }
    if let Ok(port) = std::env::var("GLOCHAT_PORT") {
        if let Ok(port) = port.parse::<u16>() {
            if let Some(server) = root.get_mut("server").and_then(Value::as_object_mut) {
                server.insert("port".to_string(), Value::Number(port.into()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_when_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::with_dir(temp_dir.path());

        let config = loader.load().unwrap();
        assert_eq!(config.provider.model, "grok-beta");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("config.json"),
            r#"{"provider": {"model": "grok-2"}, "server": {"port": 8080}}"#,
        )
        .unwrap();

        let loader = ConfigLoader::with_dir(temp_dir.path());
        let config = loader.load().unwrap();

        assert_eq!(config.provider.model, "grok-2");
        assert_eq!(config.server.port, 8080);
        // Untouched fields keep their defaults
        assert_eq!(config.provider.api_base, "https://api.x.ai/v1");
    }

    #[test]
    fn test_invalid_file_is_a_config_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.json"), "not json").unwrap();

        let loader = ConfigLoader::with_dir(temp_dir.path());
        assert!(matches!(loader.load(), Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::with_dir(temp_dir.path());

        let mut config = Config::default();
        config.provider.model = "grok-3".to_string();
        loader.save(&config).unwrap();

        let reloaded = loader.load().unwrap();
        assert_eq!(reloaded.provider.model, "grok-3");
    }
}
