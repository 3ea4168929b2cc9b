// Configuration module entry point
// Loads layered configuration and builds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, CorsConfig, HttpConfig, LoggingConfig, MemoryConfig, PerformanceConfig, ServerConfig,
};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Prefix for environment overrides, e.g. `MEMORY__SERVER__PORT=6000`
const ENV_PREFIX: &str = "MEMORY";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// The file is optional; defaults and environment variables fill the rest
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = Self::defaults()?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Built-in defaults only, no file or environment sources
    pub fn default_settings() -> Result<Self, config::ConfigError> {
        Self::defaults()?.build()?.try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError>
    {
        config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5858)?
            .set_default("memory.dir", "memory")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "memory-server/0.1")?
            .set_default("http.cors.enabled", true)?
            .set_default("http.cors.allow_origins", vec!["*"])?
            .set_default("http.cors.allow_credentials", false)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = Config::default_settings().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 5858);
        assert_eq!(cfg.memory.dir, "memory");
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.logging.log_file.is_none());
        assert!(cfg.http.cors.enabled);
        assert_eq!(cfg.http.cors.allow_origins, vec!["*".to_string()]);
        assert!(!cfg.http.cors.allow_credentials);
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:5858".parse().unwrap()
        );
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let cfg = Config::load_from("/nonexistent/dir/config").unwrap();
        assert_eq!(cfg.server.port, 5858);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 6001\n\n[memory]\ndir = \"/srv/memory\"\n\n[performance]\nmax_connections = 8"
        )
        .unwrap();

        let base = dir.path().join("server");
        let cfg = Config::load_from(base.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 6001);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.memory.dir, "/srv/memory");
        assert_eq!(cfg.performance.max_connections, Some(8));
    }

    #[test]
    fn test_invalid_address() {
        let mut cfg = Config::default_settings().unwrap();
        cfg.server.host = "not an address".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
