use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub linking: LinkingConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LinkingConfig {
    /// Scheme/host prefixes accepted by the URL parser.
    pub prefixes: Vec<String>,
    /// Pause after a flow switch before the pending intent is replayed.
    pub settle_delay_ms: u64,
    /// Replays of one pending intent before it is abandoned.
    pub max_settle_attempts: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_filter: String,
    pub json_logs: bool,
    pub metrics_enabled: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("CREPAWAY_ENV").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Map CREPAWAY__LINKING__SETTLE_DELAY_MS=300 to linking.settle_delay_ms
            .add_source(
                Environment::with_prefix("CREPAWAY")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("linking.prefixes")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}

impl Default for LinkingConfig {
    fn default() -> Self {
        Self {
            prefixes: vec![
                "crepaway://".into(),
                "https://crepaway.com".into(),
                "https://app.crepaway.com".into(),
            ],
            settle_delay_ms: 150,
            max_settle_attempts: 5,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: "info,crepaway=debug".into(),
            json_logs: false,
            metrics_enabled: false,
        }
    }
}
