use serde_json::Value;

use crate::error::app_error::Result;
use crate::steam::pagination::extract_collections;
use crate::steam::steam_client::SteamClient;
use crate::steam::PRICE_HISTORY_API;
use crate::table::Table;

impl SteamClient {
    /// Daily price history of one item: date label, median price, volume.
    pub async fn get_price_history(&self, item_name: &str, appid: &str) -> Result<Table> {
        self.ensure_auth()?;
        if !appid.is_empty() {
            self.validate_appid(appid).await?;
        }

        let params = [
            ("appid", appid.to_string()),
            ("market_hash_name", item_name.to_string()),
        ];
        let body = self.request_json(PRICE_HISTORY_API, &params).await?;
        let collections = extract_collections(&body, &["prices"], None)?;

        let prices = collections
            .into_iter()
            .find(|(name, _)| name == "prices")
            .and_then(|(_, value)| value.as_array().cloned())
            .unwrap_or_default();

        let columns = vec![
            "date".to_string(),
            "median_price".to_string(),
            "volume_sold".to_string(),
        ];
        let rows = prices
            .iter()
            .map(|entry| {
                // raw label is "Mon DD YYYY HH: +0"; keep the date prefix
                let date = entry
                    .get(0)
                    .and_then(Value::as_str)
                    .map(|s| Value::String(s.chars().take(11).collect()))
                    .unwrap_or(Value::Null);
                let median = entry.get(1).cloned().unwrap_or(Value::Null);
                let volume = entry.get(2).cloned().unwrap_or(Value::Null);
                vec![date, median, volume]
            })
            .collect();
        Ok(Table::from_rows(columns, rows))
    }
}
