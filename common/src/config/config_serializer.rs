use serde::{Deserialize, Serialize};

pub trait ConfigSerializer<TConfig> {
    fn serialize(&self, config: &TConfig) -> Result<String, String>;
    fn deserialize(&self, content: &str) -> Result<TConfig, String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct YamlConfigSerializer;

/// Short type name for error messages, e.g. `ServerConfig`.
fn config_name<TConfig>() -> &'static str {
    let full = std::any::type_name::<TConfig>();
    full.rsplit("::").next().unwrap_or(full)
}

impl<TConfig> ConfigSerializer<TConfig> for YamlConfigSerializer
where
    TConfig: for<'de> Deserialize<'de> + Serialize,
{
    fn serialize(&self, config: &TConfig) -> Result<String, String> {
        serde_yaml_ng::to_string(config)
            .map_err(|e| format!("Failed to write {} as YAML: {}", config_name::<TConfig>(), e))
    }

    fn deserialize(&self, content: &str) -> Result<TConfig, String> {
        serde_yaml_ng::from_str(content)
            .map_err(|e| format!("Invalid YAML for {}: {}", config_name::<TConfig>(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct SessionLimits {
        max_sessions: usize,
    }

    #[test]
    fn test_yaml_roundtrip_keeps_fields() {
        let yaml = YamlConfigSerializer.serialize(&SessionLimits { max_sessions: 42 }).unwrap();

        assert_eq!(yaml, "max_sessions: 42\n");
        let parsed: SessionLimits = YamlConfigSerializer.deserialize(&yaml).unwrap();
        assert_eq!(parsed, SessionLimits { max_sessions: 42 });
    }

    #[test]
    fn test_parse_error_names_config_type() {
        let result: Result<SessionLimits, String> =
            YamlConfigSerializer.deserialize("max_sessions: lots\n");

        let err = result.unwrap_err();
        assert!(err.starts_with("Invalid YAML for SessionLimits: "), "{}", err);
    }
}
