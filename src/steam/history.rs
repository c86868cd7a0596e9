use serde_json::Value;

use crate::error::app_error::{AppError, Result};
use crate::steam::pagination::RawPage;
use crate::steam::steam_client::SteamClient;
use crate::steam::LISTINGS_HISTORY_API;
use crate::table::Table;
use crate::time_util;

/// One raw page of the myhistory endpoint: four independently keyed JSON
/// collections. `purchases` is present exactly when the page contains at
/// least one Buy event.
#[derive(Debug, Clone)]
pub struct RawHistoryPage {
    /// Triple-nested map: game -> context -> listing -> asset object.
    pub assets: Value,
    /// Array of event objects, in server order.
    pub events: Value,
    /// Map from listingid to listing object.
    pub listings: Value,
    /// Map from listingid to purchase object, for Buy events only.
    pub purchases: Option<Value>,
}

/// Numeric event codes as Steam sends them, with their labels.
const EVENT_TYPES: &[(i64, &str)] = &[(1, "List"), (2, "Cancel"), (3, "Sell"), (4, "Buy")];

/// Columns forced to Null per event type. The merged table carries one column
/// set across all event types, so fields that do not apply to a row are
/// nulled out rather than omitted.
const NULL_RULES: &[(&str, &[&str])] = &[
    ("Sell", &["paid_amount", "paid_fee", "total_paid", "original_price"]),
    ("List", &["paid_amount", "paid_fee", "total_paid", "received_amount"]),
    ("Buy", &["received_amount", "original_price"]),
];

/// Columns that only show up in edge-case payloads (rollbacks, cancellations,
/// held funds); dropped when present, they are not part of the output schema.
const OPTIONAL_COLUMNS: &[&str] = &[
    "owner",
    "rollback_new_id",
    "rollback_new_contextid",
    "market_fee",
    "market_marketable_restriction",
    "cancel_reason",
    "cancel_reason_short",
    "funds_returned",
    "funds_held",
    "time_funds_held_until",
    "funds_revoked",
];

/// Presentation order: the analytically relevant columns lead, whatever else
/// survived the merge follows. Names not present are skipped, which also
/// covers pages without purchases.
const LEADING_COLUMNS: &[&str] = &[
    "time_event",
    "name",
    "type",
    "event_type",
    "original_price",
    "received_amount",
    "total_paid",
    "paid_amount",
    "paid_fee",
];

/// Listing fields that duplicate information already carried by the asset or
/// the event, or marketplace-side fee breakdown.
const LISTING_DROPS: &[&str] = &[
    "currencyid",
    "asset.contextid",
    "asset.appid",
    "asset.currency",
    "steam_fee",
    "publisher_fee",
    "publisher_fee_percent",
    "publisher_fee_app",
    "price",
    "fee",
    "asset.amount",
];

/// Purchase fields that echo the asset/listing records or fee breakdown.
const PURCHASE_DROPS: &[&str] = &[
    "currencyid",
    "asset.id",
    "asset.appid",
    "needs_rollback",
    "purchaseid",
    "steam_fee",
    "publisher_fee",
    "publisher_fee_percent",
    "publisher_fee_app",
    "received_currencyid",
    "asset.currency",
    "asset.contextid",
    "asset.classid",
    "asset.new_contextid",
    "asset.new_id",
    "asset.instanceid",
    "asset.amount",
    "asset.status",
];

impl RawHistoryPage {
    /// Assets, events and listings are assumed to always ship together and to
    /// share one listingid/asset.id universe; a page missing one of them is
    /// malformed upstream and rejected as such.
    pub fn from_collections(page: RawPage) -> Result<Self> {
        let mut assets = None;
        let mut events = None;
        let mut listings = None;
        let mut purchases = None;
        for (name, value) in page {
            match name.as_str() {
                "assets" => assets = Some(value),
                "events" => events = Some(value),
                "listings" => listings = Some(value),
                "purchases" => purchases = Some(value),
                _ => {}
            }
        }

        let missing = |what: &str| {
            AppError::RemoteRejection(format!("market history page is missing its {} collection", what))
        };
        Ok(RawHistoryPage {
            assets: assets.ok_or_else(|| missing("assets"))?,
            events: events.ok_or_else(|| missing("events"))?,
            listings: listings.ok_or_else(|| missing("listings"))?,
            purchases,
        })
    }
}

/// Merge one raw history page into a flat table with exactly one row per
/// event. Listings and purchases join on listingid, assets on asset.id;
/// events are joined last so the result keeps event cardinality.
pub fn merge_history_page(page: &RawHistoryPage) -> Table {
    let assets = flatten_assets(&page.assets);
    let events = flatten_events(&page.events);
    let listings = flatten_listings(&page.listings);

    let listing_side = match &page.purchases {
        Some(purchases) => listings.outer_join(&flatten_purchases(purchases), "listingid"),
        None => listings,
    };
    let event_side = events.outer_join(&listing_side, "listingid");
    let mut merged = assets.outer_join(&event_side, "asset.id");

    merged.drop_columns(OPTIONAL_COLUMNS);
    for (event_type, targets) in NULL_RULES {
        merged.null_where_eq(
            "event_type",
            &Value::String((*event_type).to_string()),
            targets,
        );
    }
    merged.set_leading_columns(LEADING_COLUMNS);
    merged
}

/// Walk the game -> context -> listing nesting and collect the leaf asset
/// objects in document order.
fn flatten_assets(assets: &Value) -> Table {
    let mut leaves = Vec::new();
    if let Value::Object(games) = assets {
        for contexts in games.values() {
            if let Value::Object(contexts) = contexts {
                for items in contexts.values() {
                    if let Value::Object(items) = items {
                        leaves.extend(items.values().cloned());
                    }
                }
            }
        }
    }

    let mut table = Table::normalize(&leaves);
    // `id` would collide with the other identifier columns after the joins
    table.rename_column("id", "asset.id");
    table.drop_columns(&["currency", "background_color"]);
    table
}

fn flatten_events(events: &Value) -> Table {
    let records = events.as_array().cloned().unwrap_or_default();
    let mut table = Table::normalize(&records);
    // sub-second precision and the pre-formatted date duplicate time_event
    table.drop_columns(&["time_event_fraction", "date_event"]);
    table.map_column("event_type", |value| match value.as_i64() {
        Some(code) => EVENT_TYPES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, label)| Value::String((*label).to_string()))
            .unwrap_or_else(|| value.clone()),
        None => value.clone(),
    });
    table.map_column("time_event", to_datetime_cell);
    table
}

fn flatten_listings(listings: &Value) -> Table {
    let records: Vec<Value> = match listings {
        Value::Object(map) => map.values().cloned().collect(),
        _ => Vec::new(),
    };
    let mut table = Table::normalize(&records);
    table.drop_columns(LISTING_DROPS);
    table
}

fn flatten_purchases(purchases: &Value) -> Table {
    let records: Vec<Value> = match purchases {
        Value::Object(map) => map.values().cloned().collect(),
        _ => Vec::new(),
    };
    let mut table = Table::normalize(&records);
    table.drop_columns(PURCHASE_DROPS);

    let paid = (
        table.column_index("paid_amount"),
        table.column_index("paid_fee"),
    );
    let totals: Vec<Value> = table
        .rows()
        .map(|row| match paid {
            (Some(amount), Some(fee)) => add_amounts(&row[amount], &row[fee]),
            _ => Value::Null,
        })
        .collect();
    table.add_column("total_paid", totals);

    table.map_column("time_sold", to_datetime_cell);
    table
}

fn to_datetime_cell(value: &Value) -> Value {
    value
        .as_i64()
        .and_then(|secs| time_util::unix_time_to_datetime(secs).ok())
        .map(Value::String)
        .unwrap_or(Value::Null)
}

/// Integer-cent addition; a missing operand propagates Null, never a panic.
fn add_amounts(a: &Value, b: &Value) -> Value {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return Value::from(x + y);
    }
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return Value::from(x + y);
    }
    Value::Null
}

impl SteamClient {
    /// The signed-in user's market trading history as one flat table, one row
    /// per transaction event, pages concatenated in request order.
    pub async fn get_market_history(&self, count: u32) -> Result<Table> {
        self.ensure_auth()?;
        if count == 0 {
            return Ok(Table::empty());
        }

        let pages = self
            .fetch_paged(
                LISTINGS_HISTORY_API,
                &[],
                &["assets", "events", "listings", "purchases"],
                count,
            )
            .await?;

        let mut tables = Vec::with_capacity(pages.len());
        for page in pages {
            let raw = RawHistoryPage::from_collections(page)?;
            tables.push(merge_history_page(&raw));
        }
        Ok(Table::concat(tables))
    }
}
