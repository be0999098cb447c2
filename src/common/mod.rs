pub mod app_error;
pub mod app_state;
pub mod bootstrap;
pub mod config;
pub mod middleware;
pub mod swagger;
