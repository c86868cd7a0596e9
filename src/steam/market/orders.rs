use serde_json::Value;

use crate::error::app_error::{AppError, Result};
use crate::steam::pagination::extract_collections;
use crate::steam::steam_client::SteamClient;
use crate::steam::ITEM_ORDERS_HISTOGRAM_API;
use crate::table::Table;

impl SteamClient {
    /// Buy/sell order histogram for one item, sell rows first. The
    /// item_nameid is embedded in the item's market page and has to be
    /// recovered by the caller; here it only has to be numeric.
    pub async fn get_buysell_orders(&self, item_nameid: &str) -> Result<Table> {
        self.ensure_auth()?;
        let _: u64 = item_nameid.parse().map_err(|_| {
            AppError::InvalidArgumentType(format!(
                "item_nameid {:?} is not an integer",
                item_nameid
            ))
        })?;

        let params = [("item_nameid", item_nameid.to_string())];
        let body = self.request_json(ITEM_ORDERS_HISTOGRAM_API, &params).await?;
        // Steam answers with a bare `null` once the request limit is hit
        if body.is_null() {
            return Err(AppError::RemoteRejection(
                "steam request limit reached, try again later".to_string(),
            ));
        }
        extract_collections(&body, &[], None)?;

        let columns = vec![
            "price".to_string(),
            "orders".to_string(),
            "description".to_string(),
            "type".to_string(),
        ];
        let mut rows = Vec::new();
        for (graph, side) in [("sell_order_graph", "sell"), ("buy_order_graph", "buy")] {
            if let Some(points) = body.get(graph).and_then(Value::as_array) {
                for point in points {
                    rows.push(vec![
                        point.get(0).cloned().unwrap_or(Value::Null),
                        point.get(1).cloned().unwrap_or(Value::Null),
                        point.get(2).cloned().unwrap_or(Value::Null),
                        Value::String(side.to_string()),
                    ]);
                }
            }
        }
        Ok(Table::from_rows(columns, rows))
    }
}
