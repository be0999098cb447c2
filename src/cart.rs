use thiserror::Error;

use crate::{
    models::{CartLine, CatalogItem, normalize_customization},
    pricing::CartTotals,
};

/// Most units a single cart line may hold.
pub const MAX_LINE_QUANTITY: u32 = 99;

#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    #[error("You can add at most {max} of one item")]
    QuantityLimit { max: u32 },
}

const QUANTITY_LIMIT: CartError = CartError::QuantityLimit {
    max: MAX_LINE_QUANTITY,
};

/// Lines pending checkout for one client session.
///
/// Lines are keyed by `(item id, customization)` for every mutation, so two
/// differently customized lines of the same item are always independent.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit. Availability is not checked here.
    pub fn add_line(
        &mut self,
        item: &CatalogItem,
        customization: Option<&str>,
    ) -> Result<&CartLine, CartError> {
        let customization = normalize_customization(customization);
        let position = self
            .lines
            .iter()
            .position(|line| line.matches(&item.id, customization.as_deref()));

        let index = match position {
            Some(index) => {
                let line = &mut self.lines[index];
                if line.quantity >= MAX_LINE_QUANTITY {
                    return Err(QUANTITY_LIMIT);
                }
                line.quantity += 1;
                index
            }
            None => {
                self.lines.push(CartLine {
                    item: item.clone(),
                    quantity: 1,
                    customization,
                });
                self.lines.len() - 1
            }
        };
        Ok(&self.lines[index])
    }

    /// Returns whether a line was removed.
    pub fn remove_line(&mut self, item_id: &str, customization: Option<&str>) -> bool {
        let customization = normalize_customization(customization);
        let before = self.lines.len();
        self.lines
            .retain(|line| !line.matches(item_id, customization.as_deref()));
        self.lines.len() != before
    }

    /// A quantity of zero or below removes the line. Returns whether a line
    /// with that key existed.
    pub fn set_quantity(
        &mut self,
        item_id: &str,
        customization: Option<&str>,
        quantity: i64,
    ) -> Result<bool, CartError> {
        if quantity <= 0 {
            return Ok(self.remove_line(item_id, customization));
        }
        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|quantity| *quantity <= MAX_LINE_QUANTITY)
            .ok_or(QUANTITY_LIMIT)?;
        let customization = normalize_customization(customization);
        match self
            .lines
            .iter_mut()
            .find(|line| line.matches(item_id, customization.as_deref()))
        {
            Some(line) => {
                line.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from_lines(&self.lines)
    }
}
