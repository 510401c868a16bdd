//! Business logic services

pub mod auth;
pub mod finance;
pub mod folio;
pub mod settings;
pub mod tickets;
pub mod warranty;

use crate::{config::AppConfig, error::AppResult, store::Store};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub tickets: tickets::TicketsService,
    pub warranty: warranty::WarrantyService,
    pub finance: finance::FinanceService,
    pub settings: settings::SettingsService,
}

impl Services {
    /// Create all services over the given store front
    pub fn new(store: Store, config: &AppConfig) -> AppResult<Self> {
        Ok(Self {
            auth: auth::AuthService::new(store.clone(), config.auth.clone()),
            tickets: tickets::TicketsService::new(store.clone(), &config.folio)?,
            warranty: warranty::WarrantyService::new(store.clone()),
            finance: finance::FinanceService::new(store.clone()),
            settings: settings::SettingsService::new(store),
        })
    }
}
