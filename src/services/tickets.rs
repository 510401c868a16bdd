//! Ticket registration and reconciliation
//!
//! The grid editor works on the active subset only (status other than
//! "Entregado"); delivered tickets stay out of sight but are retained
//! permanently. Every save is a full-table replace, so saving must merge
//! the edited active subset back with the untouched archived rows without
//! losing or duplicating anything. When a folio appears on both sides the
//! edited version wins wholesale (last-writer-wins per folio, not a
//! field-level merge): two sessions editing different fields of the same
//! ticket will silently overwrite each other. That limitation is inherited
//! from the replace-the-whole-table store and is documented, not fixed.

use std::collections::HashSet;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    config::FolioConfig,
    error::AppResult,
    models::ticket::{NewTicket, Ticket, COL_FOLIO, STATUS_RECEIVED},
    services::folio::FolioRule,
    store::{row_string, SheetRow, Store, SHEET_TICKETS},
};

/// Outcome of a reconcile-and-save
#[derive(Debug, Serialize, ToSchema)]
pub struct ReconcileSummary {
    /// Rows in the final table
    pub total_rows: usize,
    /// Rows carried over from the archived/delivered subset
    pub archived_rows: usize,
    /// Rows taken from the submitted active subset
    pub active_rows: usize,
}

#[derive(Clone)]
pub struct TicketsService {
    store: Store,
    folio_rule: FolioRule,
}

impl TicketsService {
    pub fn new(store: Store, folio: &FolioConfig) -> AppResult<Self> {
        Ok(Self {
            store,
            folio_rule: FolioRule::new(&folio.prefix, folio.width)?,
        })
    }

    /// Register a new repair order. The table is reloaded immediately
    /// before the write so the folio is derived from the freshest state
    /// available; the candidate is re-checked against that same table and
    /// advanced on collision before the replace commits.
    pub async fn register(&self, fields: NewTicket) -> AppResult<Ticket> {
        let mut rows = self.store.load(SHEET_TICKETS).await?;

        let existing: HashSet<String> = rows
            .iter()
            .filter_map(|row| row_string(row, COL_FOLIO))
            .collect();
        let mut folio = self.folio_rule.next(existing.iter().map(String::as_str));
        while existing.contains(&folio) {
            let next = self.folio_rule.suffix(&folio).unwrap_or(0) + 1;
            folio = self.folio_rule.format(next);
        }

        let ticket = Ticket {
            folio: Some(folio),
            created_date: chrono::Local::now().date_naive(),
            customer_name: fields.customer_name,
            phone: fields.phone,
            device_description: fields.device_description,
            fault_description: fields.fault_description,
            cost: fields.cost,
            deposit: fields.deposit,
            status: STATUS_RECEIVED.to_string(),
            technician: fields.technician,
        };

        rows.push(ticket.to_row());
        self.store.replace(SHEET_TICKETS, rows).await?;

        tracing::info!(
            "Registered ticket {} for '{}'",
            ticket.folio.as_deref().unwrap_or("-"),
            ticket.customer_name
        );
        Ok(ticket)
    }

    /// Active subset shown in the grid editor
    pub async fn list_active(&self) -> AppResult<Vec<Ticket>> {
        let rows = self.store.load(SHEET_TICKETS).await?;
        Ok(parse_tickets(&rows)
            .into_iter()
            .filter(|ticket| !ticket.is_delivered())
            .collect())
    }

    /// Merge the edited active subset back into the full table and save.
    /// The archived subset is reloaded fresh at save time to keep the
    /// read-modify-write window as small as the store allows.
    pub async fn save_active(&self, edited: Vec<Ticket>) -> AppResult<ReconcileSummary> {
        let edited = dedupe_last_wins(edited);
        let current = self.store.load(SHEET_TICKETS).await?;
        let merged = reconcile(current, &edited);

        let summary = ReconcileSummary {
            total_rows: merged.len(),
            archived_rows: merged.len() - edited.len(),
            active_rows: edited.len(),
        };
        self.store.replace(SHEET_TICKETS, merged).await?;

        tracing::info!(
            "Saved grid: {} active rows merged with {} archived rows",
            summary.active_rows,
            summary.archived_rows
        );
        Ok(summary)
    }

    /// Read-only history search over the whole table, matching folio or
    /// customer name, case-insensitive.
    pub async fn search(&self, term: &str) -> AppResult<Vec<Ticket>> {
        let needle = term.trim().to_lowercase();
        let rows = self.store.load(SHEET_TICKETS).await?;
        Ok(parse_tickets(&rows)
            .into_iter()
            .filter(|ticket| {
                ticket
                    .folio
                    .as_deref()
                    .is_some_and(|folio| folio.to_lowercase().contains(&needle))
                    || ticket.customer_name.to_lowercase().contains(&needle)
            })
            .collect())
    }
}

/// Parse worksheet rows into tickets, skipping malformed rows with a
/// warning rather than failing the whole view.
pub(crate) fn parse_tickets(rows: &[SheetRow]) -> Vec<Ticket> {
    rows.iter()
        .filter_map(|row| match Ticket::from_row(row) {
            Ok(ticket) => Some(ticket),
            Err(err) => {
                tracing::warn!("Skipping row: {}", err);
                None
            }
        })
        .collect()
}

/// Merge the freshly loaded table with the edited active subset.
///
/// Kept from `current`: every delivered row, plus any row we cannot parse
/// (data is never dropped just because it is unreadable). Rows whose folio
/// also appears in `edited` are superseded by the edited version. Active
/// rows are otherwise replaced wholesale by the submitted subset, which by
/// contract always contains the full active grid (so active rows without a
/// folio travel with `edited`; archived ones are kept verbatim, as they
/// cannot be keyed for deduplication).
fn reconcile(current: Vec<SheetRow>, edited: &[Ticket]) -> Vec<SheetRow> {
    let edited = dedupe_last_wins(edited.to_vec());
    let edited_folios: HashSet<String> = edited
        .iter()
        .filter_map(|ticket| ticket.folio.clone())
        .collect();

    let mut merged: Vec<SheetRow> = current
        .into_iter()
        .filter(|row| {
            let keep = match Ticket::from_row(row) {
                Ok(ticket) => ticket.is_delivered(),
                Err(_) => true,
            };
            if !keep {
                return false;
            }
            match row_string(row, COL_FOLIO) {
                Some(folio) => !edited_folios.contains(&folio),
                None => true,
            }
        })
        .collect();

    merged.extend(edited.iter().map(Ticket::to_row));
    merged
}

/// Collapse repeated folios within one submitted grid, keeping the last
/// entry. Folios must be unique in the final table even when the grid
/// itself arrives with the same folio twice; rows without a folio cannot
/// be keyed and are all kept.
fn dedupe_last_wins(edited: Vec<Ticket>) -> Vec<Ticket> {
    let mut deduped: Vec<Ticket> = Vec::with_capacity(edited.len());
    for ticket in edited {
        let previous = ticket.folio.as_deref().and_then(|folio| {
            deduped
                .iter()
                .position(|kept| kept.folio.as_deref() == Some(folio))
        });
        match previous {
            Some(index) => deduped[index] = ticket,
            None => deduped.push(ticket),
        }
    }
    deduped
}
