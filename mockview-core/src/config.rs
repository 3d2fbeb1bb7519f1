use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct MockviewConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    /// Connection string; required for the postgres backend.
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Postgres,
            url: None,
            max_connections: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// Answer listing endpoints with 404 instead of `[]` when nothing matches.
    pub empty_list_not_found: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            empty_list_not_found: true,
        }
    }
}

impl MockviewConfig {
    /// Layered load: defaults, then the TOML file at `path` (optional), then
    /// `MOCKVIEW__SECTION__KEY` variables, then `DATABASE_URL` / `PORT`.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Self::load_with_overrides(path, env_value("DATABASE_URL"), env_value("PORT"))
    }

    fn load_with_overrides(
        path: &str,
        database_url: Option<String>,
        port: Option<String>,
    ) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("database.backend", "postgres")?
            .set_default("database.max_connections", 5)?
            .set_default("http.host", "0.0.0.0")?
            .set_default("http.port", 3000)?
            .set_default("http.empty_list_not_found", true)?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("MOCKVIEW").separator("__"))
            .set_override_option("database.url", non_empty(database_url))?
            .set_override_option("http.port", non_empty(port))?
            .build()?;
        let cfg: Self = s.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.backend == StorageBackend::Postgres && self.database.url.is_none() {
            return Err(ConfigError::Message(
                "database.url (or DATABASE_URL) is required for the postgres backend".to_string(),
            ));
        }
        Ok(())
    }

    /// In-memory configuration with default HTTP settings.
    pub fn in_memory() -> Self {
        Self {
            database: DatabaseConfig {
                backend: StorageBackend::Memory,
                ..DatabaseConfig::default()
            },
            http: HttpConfig::default(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http.host, self.http.port)
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Unset and blank variables both fall through to the lower layers.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn http_defaults() {
        let http = HttpConfig::default();
        assert_eq!(http.port, 3000);
        assert!(http.empty_list_not_found);
    }

    #[test]
    fn in_memory_needs_no_url() {
        let cfg = MockviewConfig::in_memory();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn postgres_without_url_is_rejected() {
        let cfg = MockviewConfig {
            database: DatabaseConfig::default(),
            http: HttpConfig::default(),
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn loads_toml_file() {
        let path = std::env::temp_dir().join(format!("mockview-{}.toml", uuid::Uuid::new_v4()));
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            "[database]\nbackend = \"memory\"\n\n[http]\nhost = \"127.0.0.1\"\nempty_list_not_found = false"
        )
        .unwrap();

        let cfg = MockviewConfig::load_with_overrides(path.to_str().unwrap(), None, None).unwrap();
        assert_eq!(cfg.database.backend, StorageBackend::Memory);
        assert_eq!(cfg.http.host, "127.0.0.1");
        assert!(!cfg.http.empty_list_not_found);

        std::fs::remove_file(&path).ok();
    }

    fn memory_toml() -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("mockview-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[database]\nbackend = \"memory\"\n").unwrap();
        path
    }

    #[test]
    fn blank_port_falls_back_to_default() {
        let path = memory_toml();
        let cfg = MockviewConfig::load_with_overrides(path.to_str().unwrap(), None, Some(String::new()))
            .unwrap();
        assert_eq!(cfg.http.port, 3000);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn port_override_wins() {
        let path = memory_toml();
        let cfg =
            MockviewConfig::load_with_overrides(path.to_str().unwrap(), None, Some("8080".into()))
                .unwrap();
        assert_eq!(cfg.http.port, 8080);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn blank_database_url_counts_as_missing() {
        let path = std::env::temp_dir().join(format!("mockview-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[database]\nbackend = \"postgres\"\n").unwrap();
        let result =
            MockviewConfig::load_with_overrides(path.to_str().unwrap(), Some("  ".into()), None);
        assert!(result.is_err());
        std::fs::remove_file(&path).ok();
    }
}
