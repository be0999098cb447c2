use std::ops::RangeInclusive;

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{CartLine, Order, OrderStatus, PaymentMethod};

/// Preparation estimate in minutes, assigned at creation.
pub const ESTIMATED_MINUTES: RangeInclusive<u32> = 15..=30;

#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("an order needs at least one item")]
    EmptyOrder,
}

#[derive(Debug, Error, PartialEq)]
pub enum TransitionError {
    #[error("order {0} not found")]
    NotFound(Uuid),
    #[error("order cannot move from {from} to {to}")]
    IllegalTransition { from: OrderStatus, to: OrderStatus },
    #[error("order {0} is already completed")]
    AlreadyCompleted(Uuid),
}

/// Orders grouped by status, as shown on the canteen dashboard.
#[derive(Serialize, Debug, Default, ToSchema)]
pub struct StatusBoard {
    pub pending: Vec<Order>,
    pub preparing: Vec<Order>,
    pub ready: Vec<Order>,
    pub completed: Vec<Order>,
}

impl StatusBoard {
    pub fn column(&self, status: OrderStatus) -> &[Order] {
        match status {
            OrderStatus::Pending => &self.pending,
            OrderStatus::Preparing => &self.preparing,
            OrderStatus::Ready => &self.ready,
            OrderStatus::Completed => &self.completed,
        }
    }
}

/// Process-wide, append-only order collection.
#[derive(Debug, Default)]
pub struct OrderLedger {
    orders: Vec<Order>,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_order(
        &mut self,
        items: Vec<CartLine>,
        total: f64,
        payment_method: PaymentMethod,
        customer_name: &str,
    ) -> Result<&Order, LedgerError> {
        if items.is_empty() {
            return Err(LedgerError::EmptyOrder);
        }

        let order = Order {
            id: Uuid::new_v4(),
            items,
            total,
            payment_method,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            estimated_time: rand::thread_rng().gen_range(ESTIMATED_MINUTES),
            customer_name: customer_name.to_owned(),
        };
        info!(
            "Order {} placed by {} ({} lines, total {:.2})",
            order.id,
            order.customer_name,
            order.items.len(),
            order.total
        );

        self.orders.push(order);
        Ok(&self.orders[self.orders.len() - 1])
    }

    /// Moves an order to `next`, which must be the immediate successor of its
    /// current status.
    pub fn advance(&mut self, order_id: Uuid, next: OrderStatus) -> Result<&Order, TransitionError> {
        let order = self
            .orders
            .iter_mut()
            .find(|order| order.id == order_id)
            .ok_or(TransitionError::NotFound(order_id))?;

        if !order.status.can_transition_to(next) {
            return Err(TransitionError::IllegalTransition {
                from: order.status,
                to: next,
            });
        }

        info!("Order {} moved from {} to {}", order.id, order.status, next);
        order.status = next;
        Ok(&*order)
    }

    /// Applies the single legal successor of the order's current status.
    pub fn advance_to_next(&mut self, order_id: Uuid) -> Result<&Order, TransitionError> {
        let current = self
            .get(order_id)
            .ok_or(TransitionError::NotFound(order_id))?
            .status;
        let next = current
            .next()
            .ok_or(TransitionError::AlreadyCompleted(order_id))?;
        self.advance(order_id, next)
    }

    pub fn get(&self, order_id: Uuid) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == order_id)
    }

    pub fn all(&self) -> &[Order] {
        &self.orders
    }

    /// Exact, case-sensitive match on the stored display name.
    pub fn for_customer(&self, customer_name: &str) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| order.customer_name == customer_name)
            .collect()
    }

    pub fn board(&self) -> StatusBoard {
        let mut board = StatusBoard::default();
        for order in &self.orders {
            let column = match order.status {
                OrderStatus::Pending => &mut board.pending,
                OrderStatus::Preparing => &mut board.preparing,
                OrderStatus::Ready => &mut board.ready,
                OrderStatus::Completed => &mut board.completed,
            };
            column.push(order.clone());
        }
        board
    }
}
