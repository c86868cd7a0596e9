use crate::error::app_error::{AppError, Result};
use crate::steam::steam_client::SteamClient;
use crate::steam::ALL_LISTINGS_API;
use crate::table::Table;

const SORT_COLUMNS: &[&str] = &["default", "price", "quantity", "name"];
const SORT_DIRECTIONS: &[&str] = &["desc", "asc"];

impl SteamClient {
    /// Community market search listings, paginated 100 rows per request and
    /// concatenated in server order.
    pub async fn get_listings(
        &self,
        sortby: &str,
        sortdir: &str,
        appid: &str,
        count: u32,
    ) -> Result<Table> {
        if !SORT_COLUMNS.contains(&sortby) {
            return Err(AppError::InvalidArgumentValue(format!(
                "{} is not a valid sortby, it should be 'default', 'price', 'quantity' or 'name'",
                sortby
            )));
        }
        if !SORT_DIRECTIONS.contains(&sortdir) {
            return Err(AppError::InvalidArgumentValue(format!(
                "{} is not a valid sortdir, it should be 'desc' or 'asc'",
                sortdir
            )));
        }
        if !appid.is_empty() {
            self.validate_appid(appid).await?;
        }
        if count == 0 {
            return Ok(Table::empty());
        }

        let base = [
            ("sortcolumn", sortby.to_string()),
            ("sortdir", sortdir.to_string()),
            ("appid", appid.to_string()),
        ];
        let pages = self
            .fetch_paged(ALL_LISTINGS_API, &base, &["results"], count)
            .await?;

        let tables = pages.into_iter().map(|page| {
            page.into_iter()
                .find(|(name, _)| name == "results")
                .and_then(|(_, value)| value.as_array().cloned())
                .map(|records| Table::normalize(&records))
                .unwrap_or_else(Table::empty)
        });
        Ok(Table::concat(tables))
    }
}
