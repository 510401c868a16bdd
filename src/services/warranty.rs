//! Warranty status derivation and lookup

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{shop::ShopConfig, ticket::Ticket},
    services::tickets::parse_tickets,
    store::{Store, SHEET_CONFIG, SHEET_TICKETS},
};

/// Derived warranty state for one ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct WarrantyStatus {
    pub expired: bool,
    pub expires_on: NaiveDate,
}

/// Warranty lookup result shown at the counter
#[derive(Debug, Serialize, ToSchema)]
pub struct WarrantyReport {
    pub ticket: Ticket,
    pub warranty_days: i64,
    pub status: WarrantyStatus,
    pub terms: String,
}

/// Expiry is the creation date plus the configured period; a warranty is
/// expired strictly after that day. Pure function. A period too large to
/// land on a representable date is rejected rather than letting chrono
/// panic on the addition.
pub fn warranty_status(
    created_date: NaiveDate,
    warranty_days: i64,
    today: NaiveDate,
) -> AppResult<WarrantyStatus> {
    let period = Duration::try_days(warranty_days).ok_or_else(|| {
        AppError::Validation(format!("Warranty period of {} days is out of range", warranty_days))
    })?;
    let expires_on = created_date.checked_add_signed(period).ok_or_else(|| {
        AppError::Validation(format!("Warranty period of {} days is out of range", warranty_days))
    })?;
    Ok(WarrantyStatus {
        expired: today > expires_on,
        expires_on,
    })
}

#[derive(Clone)]
pub struct WarrantyService {
    store: Store,
}

impl WarrantyService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Find a ticket by folio and derive its warranty state from the shop's
    /// configured period.
    pub async fn lookup(&self, folio: &str) -> AppResult<WarrantyReport> {
        let wanted = folio.trim();
        let rows = self.store.load(SHEET_TICKETS).await?;
        let ticket = parse_tickets(&rows)
            .into_iter()
            .find(|ticket| ticket.folio.as_deref() == Some(wanted))
            .ok_or_else(|| AppError::NotFound(format!("No ticket with folio '{}'", wanted)))?;

        let config_rows = self.store.load(SHEET_CONFIG).await?;
        let shop = config_rows
            .first()
            .map(ShopConfig::from_row)
            .unwrap_or_default();

        let status = warranty_status(
            ticket.created_date,
            shop.warranty_days,
            chrono::Local::now().date_naive(),
        )?;
        Ok(WarrantyReport {
            ticket,
            warranty_days: shop.warranty_days,
            status,
            terms: shop.warranty_terms,
        })
    }
}
