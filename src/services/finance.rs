//! Finance totals over the ticket table

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    services::tickets::parse_tickets,
    store::{Store, SHEET_TICKETS},
};

/// Read-only finance view. Visible to owner/admin sessions only.
#[derive(Debug, Serialize, ToSchema)]
pub struct FinanceSummary {
    pub total_tickets: usize,
    pub active_tickets: usize,
    pub delivered_tickets: usize,
    /// Sum of quoted costs across all tickets
    pub total_cost: Decimal,
    /// Sum of deposits taken across all tickets
    pub total_deposits: Decimal,
    /// Cost still uncollected on active tickets (cost minus deposit)
    pub outstanding_balance: Decimal,
    /// Full cost of delivered tickets
    pub collected_revenue: Decimal,
}

#[derive(Clone)]
pub struct FinanceService {
    store: Store,
}

impl FinanceService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn summary(&self) -> AppResult<FinanceSummary> {
        let rows = self.store.load(SHEET_TICKETS).await?;
        let tickets = parse_tickets(&rows);

        let mut summary = FinanceSummary {
            total_tickets: tickets.len(),
            active_tickets: 0,
            delivered_tickets: 0,
            total_cost: Decimal::ZERO,
            total_deposits: Decimal::ZERO,
            outstanding_balance: Decimal::ZERO,
            collected_revenue: Decimal::ZERO,
        };
        for ticket in &tickets {
            summary.total_cost += ticket.cost;
            summary.total_deposits += ticket.deposit;
            if ticket.is_delivered() {
                summary.delivered_tickets += 1;
                summary.collected_revenue += ticket.cost;
            } else {
                summary.active_tickets += 1;
                summary.outstanding_balance += ticket.cost - ticket.deposit;
            }
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockRecordStore, RecordStore, SheetRow};
    use serde_json::json;
    use std::sync::Arc;

    fn ticket_row(folio: &str, cost: &str, deposit: &str, status: &str) -> SheetRow {
        [
            ("Folio", folio),
            ("Fecha", "2024-01-10"),
            ("Cliente", "Ana"),
            ("Costo", cost),
            ("Abono", deposit),
            ("Estado", status),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), json!(v)))
        .collect()
    }

    #[tokio::test]
    async fn test_summary_splits_active_and_delivered() {
        let mut mock = MockRecordStore::new();
        mock.expect_load().returning(|_| {
            Ok(vec![
                ticket_row("T-001", "500", "100", "Recibido"),
                ticket_row("T-002", "300", "300", "Entregado"),
                ticket_row("T-003", "250.50", "0", "En reparacion"),
            ])
        });
        let finance =
            FinanceService::new(Store::new(Arc::new(mock) as Arc<dyn RecordStore>, 1, 0));

        let summary = finance.summary().await.unwrap();
        assert_eq!(summary.total_tickets, 3);
        assert_eq!(summary.active_tickets, 2);
        assert_eq!(summary.delivered_tickets, 1);
        assert_eq!(summary.total_cost, "1050.50".parse().unwrap());
        assert_eq!(summary.total_deposits, "400".parse::<Decimal>().unwrap());
        assert_eq!(summary.outstanding_balance, "650.50".parse().unwrap());
        assert_eq!(summary.collected_revenue, "300".parse::<Decimal>().unwrap());
    }

    #[tokio::test]
    async fn test_empty_table_yields_zero_totals() {
        let mut mock = MockRecordStore::new();
        mock.expect_load().returning(|_| Ok(vec![]));
        let finance =
            FinanceService::new(Store::new(Arc::new(mock) as Arc<dyn RecordStore>, 1, 0));

        let summary = finance.summary().await.unwrap();
        assert_eq!(summary.total_tickets, 0);
        assert_eq!(summary.total_cost, Decimal::ZERO);
    }
}
