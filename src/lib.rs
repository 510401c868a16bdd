//! Gestión Taller Cloud
//!
//! REST server for a small repair shop: front-desk sessions register and
//! track repair tickets against a spreadsheet-style backing store that only
//! supports whole-table reads and whole-table replaces.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
