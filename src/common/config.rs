use std::{env, path::PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding one local-storage file per client session.
    pub dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Menu file replacing the built-in menu when set.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Reads configuration from the environment. Call `bootstrap::init_env`
/// first so `.env` values are visible.
pub fn load() -> Result<AppConfig> {
    let port = match env::var("PORT") {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("PORT must be a port number, got {raw}"))?,
        Err(_) => 3000,
    };

    Ok(AppConfig {
        server: ServerConfig {
            host: env::var("HOST").unwrap_or("0.0.0.0".to_string()),
            port,
        },
        storage: StorageConfig {
            dir: env::var("STORAGE_DIR")
                .unwrap_or("data/sessions".to_string())
                .into(),
        },
        catalog: CatalogConfig {
            path: env::var("CATALOG_PATH").ok().map(PathBuf::from),
        },
        logging: LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or("info".to_string()),
        },
    })
}
