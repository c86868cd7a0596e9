pub mod catalog;
pub mod history;
pub mod inventory;
pub mod market;
pub mod pagination;
pub mod steam_client;

// Undocumented Steam web endpoints this library speaks to.
pub(crate) const ALL_LISTINGS_API: &str =
    "https://steamcommunity.com/market/search/render/?search_descriptions=0&norender=1";
pub(crate) const APPID_API: &str = "https://api.steampowered.com/ISteamApps/GetAppList/v2/";
pub(crate) const PRICE_HISTORY_API: &str = "https://steamcommunity.com/market/pricehistory/";
pub(crate) const ITEM_OVERVIEW_API: &str = "https://steamcommunity.com/market/priceoverview/";
pub(crate) const LISTINGS_HISTORY_API: &str =
    "https://steamcommunity.com/market/myhistory/render/?norender=1";
pub(crate) const APP_DETAILS_API: &str = "https://store.steampowered.com/api/appdetails/";
pub(crate) const INVENTORY_API: &str = "https://steamcommunity.com/inventory";
pub(crate) const ITEM_ORDERS_HISTOGRAM_API: &str =
    "https://steamcommunity.com/market/itemordershistogram?country=US&language=english&currency=1&norender=1";

// Known-good url used to validate a candidate session cookie.
pub(crate) const AUTH_PROBE_API: &str =
    "https://steamcommunity.com/market/pricehistory/?appid=730&market_hash_name=P90%20%7C%20Blind%20Spot%20(Field-Tested)";
