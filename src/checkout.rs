use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::{
    ledger::{LedgerError, OrderLedger},
    models::{Order, PaymentMethod},
    sessions::ClientSession,
};

#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Please sign in to place an order")]
    NotSignedIn,
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("Please enter your UPI ID")]
    MissingUpiId,
    #[error("Please fill in all card details")]
    IncompleteCardDetails,
}

impl From<LedgerError> for CheckoutError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::EmptyOrder => CheckoutError::EmptyCart,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone, ToSchema)]
pub struct CardDetails {
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cvv: String,
    #[serde(default)]
    pub expiry: String,
}

impl CardDetails {
    fn is_complete(&self) -> bool {
        [&self.number, &self.name, &self.cvv, &self.expiry]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

#[derive(Deserialize, Debug, Clone, ToSchema)]
pub struct CheckoutReq {
    pub payment_method: String,
    #[serde(default)]
    pub upi_id: Option<String>,
    #[serde(default)]
    pub card: Option<CardDetails>,
}

/// Checks the details the chosen payment method requires. Other methods need
/// nothing extra.
pub fn validate_payment(req: &CheckoutReq) -> Result<PaymentMethod, CheckoutError> {
    let method = PaymentMethod::from(req.payment_method.clone());
    match method {
        PaymentMethod::Upi => {
            let upi_id = req.upi_id.as_deref().unwrap_or_default();
            if upi_id.trim().is_empty() {
                return Err(CheckoutError::MissingUpiId);
            }
        }
        PaymentMethod::Card => {
            if !req.card.as_ref().is_some_and(CardDetails::is_complete) {
                return Err(CheckoutError::IncompleteCardDetails);
            }
        }
        PaymentMethod::Gpay | PaymentMethod::Other(_) => {}
    }
    Ok(method)
}

/// Snapshots the session's cart into the ledger and empties the cart. On any
/// rejection neither the ledger nor the cart is touched.
pub fn place_order(
    session: &mut ClientSession,
    ledger: &mut OrderLedger,
    req: &CheckoutReq,
) -> Result<Order, CheckoutError> {
    let customer_name = session
        .current_identity()
        .map(|identity| identity.name.clone())
        .ok_or(CheckoutError::NotSignedIn)?;
    if session.cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let payment_method = validate_payment(req)?;

    let totals = session.cart.totals();
    let order = ledger
        .create_order(
            session.cart.lines().to_vec(),
            totals.total,
            payment_method,
            &customer_name,
        )?
        .clone();

    session.cart.clear();
    Ok(order)
}
