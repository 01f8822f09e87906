use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub log_filter: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("BIND_ADDR is not a valid socket address: {0}")]
    BindAddr(#[from] std::net::AddrParseError),
}

impl Config {
    /// 从环境变量读取配置（调用前先由 dotenvy 加载 .env）
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://prompt_builder.db".into());
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| "127.0.0.1:3000".into())
            .parse()?;
        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| "info".into());

        Ok(Self {
            database_url,
            bind_addr,
            log_filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.database_url, "sqlite://prompt_builder.db");
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn values_are_read_and_bad_addr_rejected() {
        let env: HashMap<&str, &str> = [("DATABASE_URL", "sqlite://other.db"), ("BIND_ADDR", "0.0.0.0:8080")]
            .into_iter()
            .collect();
        let config = Config::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.database_url, "sqlite://other.db");
        assert_eq!(config.bind_addr.port(), 8080);

        assert!(Config::from_lookup(|k| (k == "BIND_ADDR").then(|| "nope".to_string())).is_err());
    }
}
