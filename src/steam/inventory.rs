use crate::error::app_error::{AppError, Result};
use crate::steam::pagination::extract_collections;
use crate::steam::steam_client::SteamClient;
use crate::steam::INVENTORY_API;
use crate::table::Table;

impl SteamClient {
    /// Item descriptions from one user's game inventory.
    pub async fn get_game_item_inventory(
        &self,
        steam_id: &str,
        appid: &str,
        count: u32,
    ) -> Result<Table> {
        self.ensure_auth()?;
        let _: u64 = steam_id.parse().map_err(|_| {
            AppError::InvalidArgumentType(format!("steam id {:?} is not an integer", steam_id))
        })?;
        if !appid.is_empty() {
            self.validate_appid(appid).await?;
        }

        // context 2 is the community inventory
        let api = format!("{}/{}/{}/2", INVENTORY_API, steam_id, appid);
        let params = [("count", count.to_string())];
        let body = self.request_json(&api, &params).await?;
        let collections = extract_collections(&body, &["descriptions"], None)?;

        let descriptions = collections
            .into_iter()
            .find(|(name, _)| name == "descriptions")
            .and_then(|(_, value)| value.as_array().cloned())
            .unwrap_or_default();
        let mut table = Table::normalize(&descriptions);
        table.drop_columns(&["background_color"]);
        Ok(table)
    }
}
