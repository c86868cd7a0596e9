use serde::Deserialize;
use serde_json::json;

use crate::error::app_error::{AppError, Result};
use crate::steam::pagination::extract_collections;
use crate::steam::steam_client::SteamClient;
use crate::steam::{APPID_API, APP_DETAILS_API};
use crate::table::Table;

/// Fixed envelope of the ISteamApps/GetAppList endpoint.
#[derive(Debug, Deserialize)]
pub struct AppListEnvelope {
    pub applist: AppList,
}

#[derive(Debug, Deserialize)]
pub struct AppList {
    pub apps: Vec<AppEntry>,
}

#[derive(Debug, Deserialize)]
pub struct AppEntry {
    pub appid: u64,
    pub name: String,
}

impl SteamClient {
    /// Full list of Steam apps, one row per app (appid, name).
    pub async fn get_all_appid(&self) -> Result<Table> {
        let envelope = self.fetch_app_list().await?;
        let records: Vec<serde_json::Value> = envelope
            .applist
            .apps
            .iter()
            .map(|app| json!({"appid": app.appid, "name": app.name}))
            .collect();
        Ok(Table::normalize(&records))
    }

    /// Store-page details of one app.
    pub async fn get_app_details(&self, appid: &str) -> Result<Table> {
        self.validate_appid(appid).await?;

        let params = [("appids", appid.to_string())];
        let body = self.request_json(APP_DETAILS_API, &params).await?;
        let collections = extract_collections(&body, &[appid], None)?;

        let data = collections
            .into_iter()
            .find(|(name, _)| name == appid)
            .and_then(|(_, value)| value.get("data").cloned());
        match data {
            Some(value) => Ok(Table::normalize(&[value])),
            None => Ok(Table::empty()),
        }
    }

    /// An appid must be a decimal integer and must exist in the app catalog.
    /// The catalog is fetched on every check; nothing is cached.
    pub(crate) async fn validate_appid(&self, appid: &str) -> Result<()> {
        let id: u64 = appid.parse().map_err(|_| {
            AppError::InvalidArgumentType(format!("appid {:?} is not an integer", appid))
        })?;

        let envelope = self.fetch_app_list().await?;
        if !envelope.applist.apps.iter().any(|app| app.appid == id) {
            return Err(AppError::InvalidArgumentValue(format!(
                "{} is not a valid appid, check the list from get_all_appid()",
                appid
            )));
        }
        Ok(())
    }

    async fn fetch_app_list(&self) -> Result<AppListEnvelope> {
        let body = self.request_json(APPID_API, &[]).await?;
        let envelope = serde_json::from_value(body)?;
        Ok(envelope)
    }
}
