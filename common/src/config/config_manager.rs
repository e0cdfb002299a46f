use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads a config once, validates it and caches the result. Falls back to
/// `TConfig::default()` when the provider has no content.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path),
            YamlConfigSerializer,
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config lock poisoned".to_string())?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&config_data)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config lock poisoned".to_string())?;
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemoryProvider {
        content: Mutex<Option<String>>,
    }

    impl MemoryProvider {
        fn with(content: &str) -> Self {
            Self {
                content: Mutex::new(Some(content.to_string())),
            }
        }
    }

    impl ConfigContentProvider for MemoryProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            Ok(self.content.lock().unwrap().clone())
        }

        fn set_config_content(&self, content: &str) -> Result<(), String> {
            *self.content.lock().unwrap() = Some(content.to_string());
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct TestConfig {
        port: u16,
        name: String,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                port: 8000,
                name: "default".to_string(),
            }
        }
    }

    impl Validate for TestConfig {
        fn validate(&self) -> Result<(), String> {
            if self.port == 0 {
                return Err("port must be non-zero".to_string());
            }
            Ok(())
        }
    }

    #[test]
    fn test_missing_content_returns_default() {
        let manager: ConfigManager<_, TestConfig> =
            ConfigManager::new(MemoryProvider::default(), YamlConfigSerializer);

        assert_eq!(manager.get_config().unwrap(), TestConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let manager: ConfigManager<_, TestConfig> =
            ConfigManager::new(MemoryProvider::with("port: 9100\n"), YamlConfigSerializer);

        let config = manager.get_config().unwrap();

        assert_eq!(config.port, 9100);
        assert_eq!(config.name, "default");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let manager: ConfigManager<_, TestConfig> =
            ConfigManager::new(MemoryProvider::with("port: 0\n"), YamlConfigSerializer);

        let err = manager.get_config().unwrap_err();

        assert!(err.starts_with("Config validation error"), "{}", err);
    }

    #[test]
    fn test_malformed_yaml_reported() {
        let manager: ConfigManager<_, TestConfig> =
            ConfigManager::new(MemoryProvider::with("port: [not a number\n"), YamlConfigSerializer);

        assert!(manager.get_config().is_err());
    }

    #[test]
    fn test_set_config_persists_and_caches() {
        let manager: ConfigManager<_, TestConfig> =
            ConfigManager::new(MemoryProvider::default(), YamlConfigSerializer);
        let config = TestConfig {
            port: 8123,
            name: "custom".to_string(),
        };

        manager.set_config(&config).unwrap();

        assert_eq!(manager.get_config().unwrap(), config);
        let stored = manager.config_content_provider.get_config_content().unwrap().unwrap();
        assert!(stored.contains("port: 8123"));
    }
}
