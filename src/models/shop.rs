//! Shop configuration singleton

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::store::{row_string, SheetRow};

/// Column names of the `config` worksheet
pub const COL_NAME: &str = "nombre";
pub const COL_ADDRESS: &str = "direccion";
pub const COL_PHONE: &str = "telefono";
pub const COL_WARRANTY_DAYS: &str = "garantia_dias";
pub const COL_WARRANTY_TERMS: &str = "garantia_terminos";

const DEFAULT_WARRANTY_DAYS: i64 = 30;

/// Shop settings. Exactly one logical row in the `config` worksheet;
/// updates replace it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ShopConfig {
    #[validate(length(min = 1, message = "Shop name is required"))]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[validate(range(min = 0, max = 36500, message = "Warranty period must be between 0 and 36500 days"))]
    pub warranty_days: i64,
    #[serde(default)]
    pub warranty_terms: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            name: "Mi Taller".to_string(),
            address: String::new(),
            phone: String::new(),
            warranty_days: DEFAULT_WARRANTY_DAYS,
            warranty_terms: String::new(),
        }
    }
}

impl ShopConfig {
    /// Read the singleton from its worksheet row. Every field falls back to
    /// its default, so a sparse config sheet still yields usable settings.
    pub fn from_row(row: &SheetRow) -> Self {
        let defaults = Self::default();
        Self {
            name: row_string(row, COL_NAME).unwrap_or(defaults.name),
            address: row_string(row, COL_ADDRESS).unwrap_or(defaults.address),
            phone: row_string(row, COL_PHONE).unwrap_or(defaults.phone),
            warranty_days: row_string(row, COL_WARRANTY_DAYS)
                .and_then(|text| text.trim().parse::<i64>().ok())
                .unwrap_or(defaults.warranty_days),
            warranty_terms: row_string(row, COL_WARRANTY_TERMS).unwrap_or(defaults.warranty_terms),
        }
    }

    pub fn to_row(&self) -> SheetRow {
        let mut row = SheetRow::new();
        row.insert(COL_NAME.to_string(), Value::String(self.name.clone()));
        row.insert(COL_ADDRESS.to_string(), Value::String(self.address.clone()));
        row.insert(COL_PHONE.to_string(), Value::String(self.phone.clone()));
        row.insert(
            COL_WARRANTY_DAYS.to_string(),
            Value::String(self.warranty_days.to_string()),
        );
        row.insert(
            COL_WARRANTY_TERMS.to_string(),
            Value::String(self.warranty_terms.clone()),
        );
        row
    }
}
