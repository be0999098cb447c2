use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::pricing;

// Catalog

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, ToSchema)]
pub enum Category {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
    Juice,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Breakfast,
        Category::Lunch,
        Category::Dinner,
        Category::Snacks,
        Category::Juice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Breakfast => "Breakfast",
            Category::Lunch => "Lunch",
            Category::Dinner => "Dinner",
            Category::Snacks => "Snacks",
            Category::Juice => "Juice",
        }
    }
}

/// Menu filter. `All` is a pseudo-category that never appears on an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("all") {
            return Some(CategoryFilter::All);
        }
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(raw))
            .map(CategoryFilter::Only)
    }

    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub price: f64,
    pub image: String,
    pub rating: f64,
    pub description: String,
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_combo: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customizable: Option<bool>,
}

impl CatalogItem {
    pub fn effective_price(&self) -> f64 {
        pricing::effective_price(self.price, self.discount)
    }
}

// Carts

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CartLine {
    pub item: CatalogItem,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<String>,
}

impl CartLine {
    pub fn matches(&self, item_id: &str, customization: Option<&str>) -> bool {
        self.item.id == item_id && self.customization.as_deref() == customization
    }

    pub fn line_total(&self) -> f64 {
        self.item.effective_price() * f64::from(self.quantity)
    }
}

/// Trims free-text customization; blank text means "no customization".
pub fn normalize_customization(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

// Orders

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Completed,
}

impl OrderStatus {
    pub const SEQUENCE: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
    ];

    /// The only status this one may move to, `None` once completed.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Completed),
            OrderStatus::Completed => None,
        }
    }

    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        self.next() == Some(target)
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// Payment tag chosen at checkout. Unknown tags are kept verbatim.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    Upi,
    Card,
    Gpay,
    Other(String),
}

impl From<String> for PaymentMethod {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "upi" => PaymentMethod::Upi,
            "card" => PaymentMethod::Card,
            "gpay" => PaymentMethod::Gpay,
            _ => PaymentMethod::Other(value),
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(value: PaymentMethod) -> Self {
        match value {
            PaymentMethod::Upi => "upi".into(),
            PaymentMethod::Card => "card".into(),
            PaymentMethod::Gpay => "gpay".into(),
            PaymentMethod::Other(tag) => tag,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub items: Vec<CartLine>,
    pub total: f64,
    #[schema(value_type = String)]
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub estimated_time: u32,
    pub customer_name: String,
}

// Identity

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Canteen,
}

impl Role {
    /// Landing page for a signed-in actor of this role.
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Customer => "/menu",
            Role::Canteen => "/canteen/orders",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, ToSchema)]
pub struct Identity {
    pub name: String,
    pub role: Role,
}
