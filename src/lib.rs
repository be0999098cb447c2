pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod common;
pub mod identity;
pub mod ledger;
pub mod models;
pub mod pricing;
pub mod routes;
pub mod sessions;
pub mod storage;
