use crate::menu::{PipelineTuning, DEFAULT_ARTIFACT_PATH};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Where the menu export is read from when nothing else is configured.
pub const DEFAULT_SOURCE_PATH: &str = "data/ms_annual_data_2022.xlsx";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the runner and the web service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub menu: MenuConfig,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let source_path = env::var("MENU_SOURCE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SOURCE_PATH));
        let artifact_path = env::var("MENU_ARTIFACT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_ARTIFACT_PATH));
        let tuning = match env::var("MENU_TUNING_PATH") {
            Ok(path) if !path.trim().is_empty() => load_tuning(PathBuf::from(path))?,
            _ => PipelineTuning::default(),
        };

        Ok(Self {
            environment,
            menu: MenuConfig {
                source_path,
                artifact_path,
                tuning,
            },
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn load_tuning(path: PathBuf) -> Result<PipelineTuning, ConfigError> {
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(source) => return Err(ConfigError::TuningUnreadable { path, source }),
    };
    PipelineTuning::from_json(&raw).map_err(|source| ConfigError::InvalidTuning { path, source })
}

/// Input, output and tuning for the menu pipeline.
#[derive(Debug, Clone)]
pub struct MenuConfig {
    pub source_path: PathBuf,
    pub artifact_path: PathBuf,
    pub tuning: PipelineTuning,
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    TuningUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    InvalidTuning {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::TuningUnreadable { path, .. } => {
                write!(f, "MENU_TUNING_PATH {} could not be read", path.display())
            }
            ConfigError::InvalidTuning { path, source } => {
                write!(
                    f,
                    "MENU_TUNING_PATH {} is not a valid tuning document: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::TuningUnreadable { source, .. } => Some(source),
            ConfigError::InvalidTuning { source, .. } => Some(source),
        }
    }
}
