use serde_json::Value;

use crate::error::app_error::{AppError, Result};
use crate::steam::steam_client::SteamClient;

/// Hard upstream limit: the market endpoints serve at most 100 records per
/// request.
pub const PAGE_SIZE: u32 = 100;

/// One `(start, count)` cursor position in a paginated walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub start: u32,
    pub count: u32,
}

/// The named collections one page yielded, in endpoint order. Collections the
/// server omitted or returned as `[]` are not present.
pub type RawPage = Vec<(String, Value)>;

/// Page plan for a requested total: nothing for 0, one request up to the page
/// size, otherwise full pages at offsets 0, 100, ... plus a remainder page.
/// Offsets increase strictly by the page size so that concatenating the pages
/// preserves the server's native ordering.
pub fn page_plan(total_count: u32) -> Vec<PageRequest> {
    if total_count == 0 {
        return Vec::new();
    }
    if total_count <= PAGE_SIZE {
        return vec![PageRequest {
            start: 0,
            count: total_count,
        }];
    }

    let mut plan = Vec::new();
    let remainder = total_count % PAGE_SIZE;
    let mut start = 0;
    while start < total_count - remainder {
        plan.push(PageRequest {
            start,
            count: PAGE_SIZE,
        });
        start += PAGE_SIZE;
    }
    if remainder != 0 {
        plan.push(PageRequest {
            start,
            count: remainder,
        });
    }
    plan
}

/// Shared response checks plus collection extraction.
///
/// An explicit negative `success` flag fails the call; a server-reported
/// `total_count` bounds the requested per-page count; named collections that
/// are absent or `[]` are left out of the result so downstream code can test
/// for absence rather than emptiness.
pub fn extract_collections(
    body: &Value,
    names: &[&str],
    requested_count: Option<u32>,
) -> Result<RawPage> {
    if let Some(success) = body.get("success") {
        let rejected = matches!(success, Value::Bool(false)) || success.as_i64() == Some(0);
        if rejected {
            return Err(AppError::RemoteRejection(
                "steam cannot make this api call, double check the parameters".to_string(),
            ));
        }
    }

    if let (Some(available), Some(requested)) = (
        body.get("total_count").and_then(Value::as_u64),
        requested_count,
    ) {
        if u64::from(requested) > available {
            return Err(AppError::RequestExceedsAvailable {
                requested,
                available,
            });
        }
    }

    let mut collections = Vec::new();
    for &name in names {
        match body.get(name) {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) if items.is_empty() => {}
            Some(value) => collections.push((name.to_string(), value.clone())),
        }
    }
    Ok(collections)
}

impl SteamClient {
    /// Walk the page plan strictly in order, one request per page, and return
    /// each page's named collections in request order. Any page failing fails
    /// the whole fetch; no partial result is kept.
    pub(crate) async fn fetch_paged(
        &self,
        api: &str,
        base_params: &[(&str, String)],
        collections: &[&str],
        total_count: u32,
    ) -> Result<Vec<RawPage>> {
        let mut pages = Vec::new();
        for page in page_plan(total_count) {
            let mut params: Vec<(&str, String)> = base_params.to_vec();
            params.push(("start", page.start.to_string()));
            params.push(("count", page.count.to_string()));

            let body = self.request_json(api, &params).await?;
            pages.push(extract_collections(&body, collections, Some(page.count))?);
        }
        Ok(pages)
    }
}
