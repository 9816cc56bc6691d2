use crate::chart::EvaluationConfig;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

/// Deployment stage, read from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Everything the binary reads from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub export: ExportConfig,
    pub evaluation: EvaluationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = EvaluationConfig::default();
        let evaluation = EvaluationConfig {
            max_bad_choices: parse_var("APP_MAX_BAD_CHOICES", defaults.max_bad_choices)?,
            slice_overload_threshold: parse_var(
                "APP_SLICE_OVERLOAD_THRESHOLD",
                defaults.slice_overload_threshold,
            )?,
        };

        Ok(Self {
            environment: AppEnvironment::parse(&var_or("APP_ENV", "development")),
            server: ServerConfig {
                host: var_or("APP_HOST", "127.0.0.1"),
                port: parse_var("APP_PORT", 3000)?,
            },
            telemetry: TelemetryConfig {
                log_level: var_or("APP_LOG_LEVEL", "info"),
            },
            export: ExportConfig {
                output_dir: PathBuf::from(var_or("APP_EXPORT_DIR", ".")),
            },
            evaluation,
        })
    }
}

/// Blank values count as unset.
fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { key, value: raw })
        }
        _ => Ok(default),
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost {
                    host: self.host.clone(),
                    source,
                })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where downloaded chart captures land.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber {
        key: &'static str,
        value: String,
    },
    InvalidHost {
        host: String,
        source: std::net::AddrParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a non-negative integer, got '{value}'")
            }
            ConfigError::InvalidHost { host, .. } => {
                write!(f, "APP_HOST '{host}' is not an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    const KEYS: [&str; 7] = [
        "APP_ENV",
        "APP_HOST",
        "APP_PORT",
        "APP_LOG_LEVEL",
        "APP_EXPORT_DIR",
        "APP_MAX_BAD_CHOICES",
        "APP_SLICE_OVERLOAD_THRESHOLD",
    ];

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        let guard = GUARD
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for key in KEYS {
            env::remove_var(key);
        }
        guard
    }

    #[test]
    fn defaults_apply_without_env() {
        let _lock = env_lock();
        let config = AppConfig::load().expect("config loads with defaults");

        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.export.output_dir, PathBuf::from("."));
        assert_eq!(config.evaluation, EvaluationConfig::default());
    }

    #[test]
    fn localhost_maps_to_loopback() {
        let _lock = env_lock();
        env::set_var("APP_HOST", "localhost");
        env::set_var("APP_PORT", "8080");

        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 8080));
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
    }

    #[test]
    fn numeric_settings_are_validated() {
        let _lock = env_lock();
        env::set_var("APP_PORT", "pie");
        let err = AppConfig::load().expect_err("port must be numeric");
        assert!(matches!(err, ConfigError::InvalidNumber { key: "APP_PORT", .. }));
        env::remove_var("APP_PORT");

        env::set_var("APP_MAX_BAD_CHOICES", "-1");
        let err = AppConfig::load().expect_err("budget must be unsigned");
        assert!(err.to_string().contains("APP_MAX_BAD_CHOICES"));
        env::remove_var("APP_MAX_BAD_CHOICES");
    }

    #[test]
    fn stage_export_dir_and_rules_come_from_env() {
        let _lock = env_lock();
        env::set_var("APP_ENV", "prod");
        env::set_var("APP_EXPORT_DIR", "/tmp/charts");
        env::set_var("APP_MAX_BAD_CHOICES", "3");
        env::set_var("APP_SLICE_OVERLOAD_THRESHOLD", " 10 ");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/charts"));
        assert_eq!(config.evaluation.max_bad_choices, 3);
        assert_eq!(config.evaluation.slice_overload_threshold, 10);
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn bad_host_is_reported() {
        let config = ServerConfig {
            host: "pie.chart".to_string(),
            port: 3000,
        };
        let err = config.socket_addr().expect_err("not an ip");
        assert!(err.to_string().contains("pie.chart"));
    }
}
