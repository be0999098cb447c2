use std::{collections::HashSet, path::Path};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::models::{CatalogItem, CategoryFilter};

const DEFAULT_MENU: &str = include_str!("../data/catalog.json");

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("item {0} has a negative price")]
    NegativePrice(String),
    #[error("item {0} has a discount outside 0..=100")]
    DiscountOutOfRange(String),
    #[error("item id {0} appears more than once")]
    DuplicateId(String),
}

/// Read-only menu, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for item in &items {
            if item.price.is_nan() || item.price < 0.0 {
                return Err(CatalogError::NegativePrice(item.id.clone()));
            }
            if let Some(discount) = item.discount {
                if !(0.0..=100.0).contains(&discount) {
                    return Err(CatalogError::DiscountOutOfRange(item.id.clone()));
                }
            }
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    pub fn builtin() -> Result<Self> {
        Self::from_json(DEFAULT_MENU).context("Failed to load built-in menu")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read menu file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid menu file {}", path.display()))
    }

    fn from_json(raw: &str) -> Result<Self> {
        let items: Vec<CatalogItem> = serde_json::from_str(raw).context("Failed to parse menu")?;
        Ok(Self::new(items)?)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn filter(&self, filter: CategoryFilter) -> Vec<&CatalogItem> {
        self.items
            .iter()
            .filter(|item| filter.matches(item.category))
            .collect()
    }
}
