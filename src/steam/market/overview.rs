use crate::error::app_error::Result;
use crate::steam::pagination::extract_collections;
use crate::steam::steam_client::SteamClient;
use crate::steam::ITEM_OVERVIEW_API;
use crate::table::Table;

impl SteamClient {
    /// Lowest/median price and 24h volume snapshot for one item.
    pub async fn get_item_overview(&self, item_name: &str, appid: &str) -> Result<Table> {
        self.ensure_auth()?;
        if !appid.is_empty() {
            self.validate_appid(appid).await?;
        }

        let params = [
            ("appid", appid.to_string()),
            ("market_hash_name", item_name.to_string()),
        ];
        let body = self.request_json(ITEM_OVERVIEW_API, &params).await?;
        // success check only, the payload itself is the single record
        extract_collections(&body, &[], None)?;

        let mut table = Table::normalize(&[body]);
        table.drop_columns(&["success"]);
        Ok(table)
    }
}
