use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Result, anyhow};

use crate::{
    catalog::Catalog,
    common::{app_error::AppError, config::AppConfig},
    ledger::OrderLedger,
    sessions::SessionRegistry,
    storage::{FileStorage, LocalStorage},
};

/// Shared handles injected into every handler.
///
/// Handlers that touch both a session and the ledger take the session lock
/// first.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<Catalog>,
    pub sessions: Arc<SessionRegistry>,
    pub ledger: Arc<RwLock<OrderLedger>>,
}

impl AppState {
    pub fn new(config: AppConfig, catalog: Catalog, storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            sessions: Arc::new(SessionRegistry::new(storage)),
            ledger: Arc::new(RwLock::new(OrderLedger::new())),
        }
    }

    /// Loads the menu and opens file-backed session storage from `config`.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let catalog = match &config.catalog.path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::builtin()?,
        };
        let storage = FileStorage::new(&config.storage.dir)?;
        tracing::info!(
            "Loaded {} menu items, session storage at {}",
            catalog.items().len(),
            storage.dir().display()
        );
        Ok(Self::new(config, catalog, Arc::new(storage)))
    }

    pub fn read_ledger(&self) -> Result<RwLockReadGuard<'_, OrderLedger>, AppError> {
        self.ledger
            .read()
            .map_err(|_| AppError::Other(anyhow!("order ledger lock poisoned")))
    }

    pub fn write_ledger(&self) -> Result<RwLockWriteGuard<'_, OrderLedger>, AppError> {
        self.ledger
            .write()
            .map_err(|_| AppError::Other(anyhow!("order ledger lock poisoned")))
    }
}
