//! Shop settings service

use crate::{
    error::AppResult,
    models::shop::ShopConfig,
    store::{Store, SHEET_CONFIG},
};

#[derive(Clone)]
pub struct SettingsService {
    store: Store,
}

impl SettingsService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Read the singleton settings row. An empty sheet yields defaults;
    /// a missing sheet is surfaced as an error.
    pub async fn get(&self) -> AppResult<ShopConfig> {
        let rows = self.store.load(SHEET_CONFIG).await?;
        Ok(rows.first().map(ShopConfig::from_row).unwrap_or_default())
    }

    /// Replace the settings row wholesale
    pub async fn update(&self, config: ShopConfig) -> AppResult<ShopConfig> {
        self.store
            .replace(SHEET_CONFIG, vec![config.to_row()])
            .await?;
        tracing::info!("Shop settings updated ('{}')", config.name);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockRecordStore, RecordStore, SheetRow};
    use mockall::predicate::{eq, function};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_empty_sheet_yields_defaults() {
        let mut mock = MockRecordStore::new();
        mock.expect_load().returning(|_| Ok(vec![]));
        let settings =
            SettingsService::new(Store::new(Arc::new(mock) as Arc<dyn RecordStore>, 1, 0));

        let config = settings.get().await.unwrap();
        assert_eq!(config.name, "Mi Taller");
        assert_eq!(config.warranty_days, 30);
    }

    #[tokio::test]
    async fn test_update_writes_exactly_one_row() {
        let mut mock = MockRecordStore::new();
        mock.expect_replace()
            .with(eq(SHEET_CONFIG), function(|rows: &Vec<SheetRow>| rows.len() == 1))
            .times(1)
            .returning(|_, _| Ok(()));
        let settings =
            SettingsService::new(Store::new(Arc::new(mock) as Arc<dyn RecordStore>, 1, 0));

        let updated = settings
            .update(ShopConfig {
                name: "Taller Lopez".to_string(),
                warranty_days: 60,
                ..ShopConfig::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.warranty_days, 60);
    }
}
