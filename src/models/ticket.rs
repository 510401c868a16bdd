//! Repair ticket model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    store::{row_string, SheetRow, SHEET_TICKETS},
};

/// Column names of the `reparaciones` worksheet
pub const COL_FOLIO: &str = "Folio";
pub const COL_DATE: &str = "Fecha";
pub const COL_CUSTOMER: &str = "Cliente";
pub const COL_PHONE: &str = "Telefono";
pub const COL_DEVICE: &str = "Equipo";
pub const COL_FAULT: &str = "Falla";
pub const COL_COST: &str = "Costo";
pub const COL_DEPOSIT: &str = "Abono";
pub const COL_STATUS: &str = "Estado";
pub const COL_TECHNICIAN: &str = "Tecnico";

/// Status values. The set is open-ended (front desks add ad-hoc states),
/// so tickets carry a free string; only these two have fixed meaning.
pub const STATUS_RECEIVED: &str = "Recibido";
pub const STATUS_DELIVERED: &str = "Entregado";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One repair order. `folio` is absent on rows created before folio
/// numbering existed; such rows are carried through saves untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ticket {
    pub folio: Option<String>,
    pub created_date: NaiveDate,
    pub customer_name: String,
    pub phone: String,
    pub device_description: String,
    pub fault_description: String,
    pub cost: Decimal,
    pub deposit: Decimal,
    pub status: String,
    pub technician: String,
}

impl Ticket {
    /// Whether this ticket has left the active grid. Delivered tickets are
    /// retained permanently in the backing table; nothing is ever deleted.
    pub fn is_delivered(&self) -> bool {
        self.status == STATUS_DELIVERED
    }

    /// Build a ticket from a named-column row. Date, customer and status
    /// are required; text fields default to empty and money fields to zero
    /// when the column is blank.
    pub fn from_row(row: &SheetRow) -> AppResult<Self> {
        let date_text = required(row, COL_DATE)?;
        let created_date =
            NaiveDate::parse_from_str(&date_text, DATE_FORMAT).map_err(|err| malformed(
                format!("column '{}' value '{}': {}", COL_DATE, date_text, err),
            ))?;

        Ok(Self {
            folio: row_string(row, COL_FOLIO),
            created_date,
            customer_name: required(row, COL_CUSTOMER)?,
            phone: row_string(row, COL_PHONE).unwrap_or_default(),
            device_description: row_string(row, COL_DEVICE).unwrap_or_default(),
            fault_description: row_string(row, COL_FAULT).unwrap_or_default(),
            cost: money(row, COL_COST)?,
            deposit: money(row, COL_DEPOSIT)?,
            status: required(row, COL_STATUS)?,
            technician: row_string(row, COL_TECHNICIAN).unwrap_or_default(),
        })
    }

    /// Render the ticket as a worksheet row with the canonical column order
    pub fn to_row(&self) -> SheetRow {
        let mut row = SheetRow::new();
        row.insert(
            COL_FOLIO.to_string(),
            Value::String(self.folio.clone().unwrap_or_default()),
        );
        row.insert(
            COL_DATE.to_string(),
            Value::String(self.created_date.format(DATE_FORMAT).to_string()),
        );
        row.insert(
            COL_CUSTOMER.to_string(),
            Value::String(self.customer_name.clone()),
        );
        row.insert(COL_PHONE.to_string(), Value::String(self.phone.clone()));
        row.insert(
            COL_DEVICE.to_string(),
            Value::String(self.device_description.clone()),
        );
        row.insert(
            COL_FAULT.to_string(),
            Value::String(self.fault_description.clone()),
        );
        row.insert(COL_COST.to_string(), Value::String(self.cost.to_string()));
        row.insert(
            COL_DEPOSIT.to_string(),
            Value::String(self.deposit.to_string()),
        );
        row.insert(COL_STATUS.to_string(), Value::String(self.status.clone()));
        row.insert(
            COL_TECHNICIAN.to_string(),
            Value::String(self.technician.clone()),
        );
        row
    }
}

/// New-ticket form fields. Deposit-exceeds-cost is deliberately not
/// validated; the original tool never enforced it and adding the rule
/// here would change observed behavior.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewTicket {
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,
    #[serde(default)]
    pub phone: String,
    #[validate(length(min = 1, message = "Device description is required"))]
    pub device_description: String,
    #[serde(default)]
    pub fault_description: String,
    pub cost: Decimal,
    pub deposit: Decimal,
    #[serde(default)]
    pub technician: String,
}

fn required(row: &SheetRow, column: &str) -> AppResult<String> {
    row_string(row, column).ok_or_else(|| malformed(format!("missing column '{}'", column)))
}

fn money(row: &SheetRow, column: &str) -> AppResult<Decimal> {
    match row_string(row, column) {
        None => Ok(Decimal::ZERO),
        Some(text) => text.trim().parse::<Decimal>().map_err(|err| {
            malformed(format!("column '{}' value '{}': {}", column, text, err))
        }),
    }
}

fn malformed(reason: String) -> AppError {
    AppError::MalformedRow {
        worksheet: SHEET_TICKETS.to_string(),
        reason,
    }
}
