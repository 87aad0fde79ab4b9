use crate::domain::filters::TargetDefaults;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub targets: TargetSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Target values used when the page submits an empty target control.
#[derive(Debug, Deserialize, Clone)]
pub struct TargetSettings {
    #[serde(default = "default_numeric_target")]
    pub overall: String,
    #[serde(default)]
    pub manual: String,
    #[serde(default = "default_numeric_target")]
    pub yoy: String,
}

impl Default for TargetSettings {
    fn default() -> Self {
        Self {
            overall: default_numeric_target(),
            manual: String::new(),
            yoy: default_numeric_target(),
        }
    }
}

impl From<TargetSettings> for TargetDefaults {
    fn from(settings: TargetSettings) -> Self {
        TargetDefaults {
            overall: settings.overall,
            manual: settings.manual,
            yoy: settings.yoy,
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_numeric_target() -> String {
    "0".to_string()
}

/// Load `config/dashboard.toml` (optional), overridden by `DASHBOARD__*`
/// environment variables, e.g. `DASHBOARD__BACKEND__BASE_URL`.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> anyhow::Result<DashboardConfig> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    #[test]
    fn test_defaults_applied() {
        let config = parse(
            r#"
            [backend]
            base_url = "http://aggregates.local"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.backend.timeout(), Duration::from_secs(30));
        assert_eq!(config.targets.overall, "0");
        assert_eq!(config.targets.manual, "");
        assert_eq!(config.targets.yoy, "0");
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r#"
            [server]
            bind = "127.0.0.1:3000"

            [backend]
            base_url = "http://aggregates.local/"
            timeout_secs = 5

            [targets]
            overall = "25000"
            manual = "20000"
            yoy = "10"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.backend.timeout_secs, 5);
        let targets: TargetDefaults = config.targets.into();
        assert_eq!(targets.overall, "25000");
        assert_eq!(targets.manual, "20000");
        assert_eq!(targets.yoy, "10");
    }

    #[test]
    fn test_backend_required() {
        assert!(parse("[server]\nbind = \"127.0.0.1:3000\"").is_err());
    }
}
