use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub feed: FeedConfig,
    pub admin: AdminConfig,
    #[serde(default)]
    pub reconcile: ReconcileConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Source feed (the public lottery results page).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub base_url: String,
    #[serde(default = "default_feed_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Password gating the manual-insert endpoint. Not an auth system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Interval between scheduled reconciliation runs.
    pub interval_secs: u64,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            interval_secs: 3600,
        }
    }
}

/// Optional one-shot CSV import applied at startup (idempotent).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BootstrapConfig {
    #[serde(default)]
    pub csv_path: Option<String>,
}

fn default_feed_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

impl Config {
    pub fn from_toml() -> anyhow::Result<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => toml::from_str(&config_str)
                .with_context(|| format!("failed to parse config file {config_path}"))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // 数据库 URL 在无配置文件时必须提供
                let database_url = get_env("DATABASE_URL").context(
                    "DATABASE_URL environment variable missing and no config.toml found",
                )?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    feed: FeedConfig {
                        base_url: get_env("FEED_BASE_URL").unwrap_or_else(|| {
                            "https://lottosheli.co.il/results/lotto".to_string()
                        }),
                        timeout_secs: get_env_parse("FEED_TIMEOUT_SECS", default_feed_timeout()),
                        user_agent: get_env("FEED_USER_AGENT").unwrap_or_else(default_user_agent),
                    },
                    admin: AdminConfig {
                        password: get_env("ADMIN_PASSWORD")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                    },
                    reconcile: ReconcileConfig {
                        interval_secs: get_env_parse(
                            "RECONCILE_INTERVAL_SECS",
                            ReconcileConfig::default().interval_secs,
                        ),
                    },
                    bootstrap: BootstrapConfig {
                        csv_path: get_env("BOOTSTRAP_CSV_PATH"),
                    },
                }
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "failed to read config file {config_path}: {e}"
                ));
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("FEED_BASE_URL") {
            config.feed.base_url = v;
        }
        if let Ok(v) = env::var("FEED_TIMEOUT_SECS")
            && let Ok(n) = v.parse()
        {
            config.feed.timeout_secs = n;
        }
        if let Ok(v) = env::var("FEED_USER_AGENT") {
            config.feed.user_agent = v;
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD") {
            config.admin.password = v;
        }
        if let Ok(v) = env::var("RECONCILE_INTERVAL_SECS")
            && let Ok(n) = v.parse()
        {
            config.reconcile.interval_secs = n;
        }
        if let Ok(v) = env::var("BOOTSTRAP_CSV_PATH") {
            config.bootstrap.csv_path = Some(v);
        }

        Ok(config)
    }
}
