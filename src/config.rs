use tracing::trace;

/// Viewer configuration, read from a JSON file
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ViewerConfig {
    /// Base URL of the management hub, e.g. "http://hub.local:8080"
    pub base_url: String,

    /// Optional bearer token for the agent API
    pub token: Option<String>,

    /// Refresh interval in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Optional display name for log output
    pub display: Option<String>,
}

fn default_interval_ms() -> u64 {
    5000
}

pub fn read_config_file(path: &str) -> anyhow::Result<ViewerConfig> {
    let file_content = std::fs::read_to_string(path)?;
    serde_json::from_str(&file_content)
        .map_err(|_| anyhow::anyhow!("Invalid configuration file provided!"))
        .inspect(|config| trace!("loaded config: {config:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_interval_defaults_to_five_seconds() {
        let config: ViewerConfig =
            serde_json::from_str(r#"{ "base_url": "http://hub.local:8080" }"#).unwrap();

        assert_eq!(config.interval_ms, 5000);
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_read_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "base_url": "http://hub.local:8080/", "token": "secret", "interval_ms": 1000 }}"#
        )
        .unwrap();

        let config = read_config_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.base_url, "http://hub.local:8080/");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.interval_ms, 1000);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = read_config_file(file.path().to_str().unwrap());
        assert!(result.is_err());
    }
}
