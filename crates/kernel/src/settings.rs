use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{anyhow, Context};
use config::builder::{ConfigBuilder, DefaultState};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "CONCIERGE_ENV";
const CONFIG_DIR_ENV: &str = "CONCIERGE_CONFIG_DIR";
const ENV_PREFIX: &str = "CONCIERGE";
const DEFAULT_CUSTOMER_PORT: u16 = 8080;
const DEFAULT_HOTEL_PORT: u16 = 8081;

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

/// The two services that can be booted from this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Customer,
    Hotel,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 2] = [ServiceKind::Hotel, ServiceKind::Customer];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Customer => "customer",
            ServiceKind::Hotel => "hotel",
        }
    }

    /// Title used for the service's OpenAPI document.
    pub fn api_title(&self) -> &'static str {
        match self {
            ServiceKind::Customer => "Customer Service API",
            ServiceKind::Hotel => "Hotel Service API",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" | "customers" => Ok(ServiceKind::Customer),
            "hotel" | "hotels" => Ok(ServiceKind::Hotel),
            other => Err(format!(
                "unknown service '{other}'; expected customer or hotel"
            )),
        }
    }
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default = "ServerSettings::customer_default")]
    pub customer_service: ServerSettings,
    #[serde(default = "ServerSettings::hotel_default")]
    pub hotel_service: ServerSettings,
    #[serde(default)]
    pub hotel_directory: HotelDirectorySettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, and environment overlay.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir()
                .context("unable to resolve current directory")?
                .join("config"),
        };

        let builder = Self::layered_sources(&config_dir, &environment)?;

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        settings.environment = match environment.as_str() {
            "local" => Environment::Local,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => {
                return Err(anyhow!(
                    "unsupported environment '{}'; expected local/staging/production",
                    other
                ));
            }
        };

        Ok(settings)
    }

    /// Defaults, `base.toml`, `{environment}.toml` and `CONCIERGE_*` variables, in
    /// increasing precedence. Ports are seeded as defaults so a section that only
    /// overrides another key still deserializes.
    fn layered_sources(
        config_dir: &Path,
        environment: &str,
    ) -> anyhow::Result<ConfigBuilder<DefaultState>> {
        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let builder = config::Config::builder()
            .set_default("customer_service.port", i64::from(DEFAULT_CUSTOMER_PORT))?
            .set_default("hotel_service.port", i64::from(DEFAULT_HOTEL_PORT))?
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        Ok(builder)
    }

    /// Listener settings for the given service.
    pub fn server(&self, kind: ServiceKind) -> &ServerSettings {
        match kind {
            ServiceKind::Customer => &self.customer_service,
            ServiceKind::Hotel => &self.hotel_service,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            customer_service: ServerSettings::customer_default(),
            hotel_service: ServerSettings::hotel_default(),
            hotel_directory: HotelDirectorySettings::default(),
            telemetry: TelemetrySettings::default(),
        }
    }
}

/// A section read without `port` fails to deserialize; [`Settings::load`]
/// seeds each service's port before any file or variable is applied.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    pub port: u16,
    #[serde(default = "ServerSettings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }

    pub fn customer_default() -> Self {
        Self {
            host: Self::default_host(),
            port: DEFAULT_CUSTOMER_PORT,
            request_timeout_ms: Self::default_request_timeout_ms(),
        }
    }

    pub fn hotel_default() -> Self {
        Self {
            host: Self::default_host(),
            port: DEFAULT_HOTEL_PORT,
            request_timeout_ms: Self::default_request_timeout_ms(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where the customer service finds the hotel service.
#[derive(Debug, Clone, Deserialize)]
pub struct HotelDirectorySettings {
    #[serde(default = "HotelDirectorySettings::default_base_url")]
    pub base_url: String,
    #[serde(default = "HotelDirectorySettings::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl HotelDirectorySettings {
    fn default_base_url() -> String {
        "http://localhost:8081".to_string()
    }

    fn default_timeout_ms() -> u64 {
        5000
    }
}

impl Default for HotelDirectorySettings {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_ms: Self::default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "TelemetrySettings::default_filter")]
    pub filter: String,
}

impl TelemetrySettings {
    fn default_filter() -> String {
        "info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            filter: Self::default_filter(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn hotel_directory_defaults_to_local_hotel_service() {
        let settings = Settings::default();
        assert_eq!(settings.hotel_directory.base_url, "http://localhost:8081");
        assert_eq!(settings.hotel_directory.timeout_ms, 5000);
    }

    #[test]
    fn default_settings_match_deserialized_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.customer_service.port, 8080);
        assert_eq!(settings.hotel_service.port, 8081);
    }

    #[test]
    fn services_listen_on_distinct_default_ports() {
        let settings: Settings = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(settings.server(ServiceKind::Customer).port, 8080);
        assert_eq!(settings.server(ServiceKind::Hotel).port, 8081);
        assert_eq!(
            settings.server(ServiceKind::Hotel).bind_addr(),
            "0.0.0.0:8081"
        );
    }

    #[test]
    fn partial_server_section_keeps_default_host() {
        let settings: Settings = serde_json::from_value(serde_json::json!({
            "hotel_service": { "port": 9191 },
            "telemetry": { "log_format": "json" }
        }))
        .unwrap();
        assert_eq!(settings.hotel_service.host, "0.0.0.0");
        assert_eq!(settings.hotel_service.port, 9191);
        assert_eq!(settings.telemetry.log_format, LogFormat::Json);
        assert_eq!(settings.telemetry.filter, "info");
    }

    #[test]
    fn host_only_override_keeps_seeded_port() {
        let settings: Settings = Settings::layered_sources(Path::new("/nonexistent"), "local")
            .unwrap()
            .set_override("customer_service.host", "127.0.0.1")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.customer_service.bind_addr(), "127.0.0.1:8080");
        assert_eq!(settings.hotel_service.bind_addr(), "0.0.0.0:8081");
    }

    #[test]
    fn service_kind_parses_singular_and_plural() {
        assert_eq!("hotel".parse::<ServiceKind>(), Ok(ServiceKind::Hotel));
        assert_eq!("customers".parse::<ServiceKind>(), Ok(ServiceKind::Customer));
        assert!("booking".parse::<ServiceKind>().is_err());
    }
}
