use serde_json::{json, Value};

use steam_market::error::app_error::AppError;
use steam_market::steam::history::{merge_history_page, RawHistoryPage};
use steam_market::table::Table;

/// One myhistory page: asset 1111 is listed then sold (listing L1), asset
/// 2222 is bought (listing L2). The purchases collection rides along only
/// when the page holds the Buy event.
fn sample_page(with_purchases: bool) -> RawHistoryPage {
    let assets = json!({
        "730": {
            "2": {
                "L1": {
                    "id": "1111",
                    "classid": "310776",
                    "instanceid": "0",
                    "currency": 0,
                    "background_color": "",
                    "name": "AK-47 | Redline",
                    "market_name": "AK-47 | Redline (Field-Tested)",
                    "market_hash_name": "AK-47 | Redline (Field-Tested)",
                    "type": "Classified Rifle"
                },
                "L2": {
                    "id": "2222",
                    "classid": "9870",
                    "instanceid": "0",
                    "currency": 0,
                    "background_color": "",
                    "name": "Mann Co. Supply Crate Key",
                    "market_name": "Mann Co. Supply Crate Key",
                    "market_hash_name": "Mann Co. Supply Crate Key",
                    "type": "Tool"
                }
            }
        }
    });

    let mut events = vec![
        json!({
            "listingid": "L1",
            "event_type": 1,
            "time_event": 1700000000,
            "time_event_fraction": 123000000,
            "date_event": "14 Nov",
            "steamid_actor": "76561198000000000"
        }),
        json!({
            "listingid": "L1",
            "event_type": 3,
            "time_event": 1700003600,
            "time_event_fraction": 456000000,
            "date_event": "14 Nov",
            "steamid_actor": "76561198000000000"
        }),
    ];
    if with_purchases {
        events.push(json!({
            "listingid": "L2",
            "event_type": 4,
            "time_event": 1700007200,
            "time_event_fraction": 789000000,
            "date_event": "15 Nov",
            "steamid_actor": "76561198000000000"
        }));
    }

    let listings = json!({
        "L1": {
            "listingid": "L1",
            "price": 1000,
            "fee": 150,
            "steam_fee": 50,
            "publisher_fee": 100,
            "publisher_fee_percent": "0.10",
            "publisher_fee_app": 730,
            "currencyid": "2001",
            "original_price": 900,
            "cancel_reason": "",
            "asset": {
                "id": "1111",
                "appid": 730,
                "contextid": "2",
                "currency": 0,
                "amount": "1"
            }
        },
        "L2": {
            "listingid": "L2",
            "price": 1500,
            "fee": 150,
            "steam_fee": 75,
            "publisher_fee": 75,
            "publisher_fee_percent": "0.05",
            "publisher_fee_app": 440,
            "currencyid": "2001",
            "original_price": 2000,
            "asset": {
                "id": "2222",
                "appid": 440,
                "contextid": "2",
                "currency": 0,
                "amount": "1"
            }
        }
    });

    let purchases = json!({
        "L2": {
            "listingid": "L2",
            "purchaseid": "P900",
            "paid_amount": 1500,
            "paid_fee": 150,
            "currencyid": "2001",
            "received_amount": 1350,
            "received_currencyid": "2001",
            "time_sold": 1700007200,
            "needs_rollback": 0,
            "steam_fee": 75,
            "publisher_fee": 75,
            "publisher_fee_percent": "0.05",
            "publisher_fee_app": 440,
            "funds_held": 0,
            "asset": {
                "id": "2222",
                "appid": 440,
                "contextid": "2",
                "classid": "9870",
                "instanceid": "0",
                "amount": "1",
                "status": 4,
                "new_id": "3333",
                "new_contextid": "2",
                "currency": 0
            }
        }
    });

    RawHistoryPage {
        assets,
        events: Value::Array(events),
        listings,
        purchases: with_purchases.then_some(purchases),
    }
}

#[test]
fn test_one_row_per_event_with_purchases() {
    let table = merge_history_page(&sample_page(true));
    assert_eq!(table.len(), 3);

    let types: Vec<&Value> = table.column_values("event_type").unwrap();
    assert_eq!(types, vec![&json!("List"), &json!("Sell"), &json!("Buy")]);
}

#[test]
fn test_one_row_per_event_without_purchases() {
    let table = merge_history_page(&sample_page(false));
    assert_eq!(table.len(), 2);
    // no purchase columns at all on a sell-side-only page
    assert!(table.column_index("total_paid").is_none());
    assert!(table.column_index("paid_amount").is_none());
    // nullability stays a function of the event type alone
    assert_eq!(table.cell(0, "original_price"), Some(&json!(900)));
    assert_eq!(table.cell(1, "original_price"), Some(&Value::Null));
}

#[test]
fn test_event_codes_map_to_labels() {
    let table = merge_history_page(&sample_page(true));
    // raw code 3 is a sale, raw code 4 a buy
    assert_eq!(table.cell(1, "event_type"), Some(&json!("Sell")));
    assert_eq!(table.cell(2, "event_type"), Some(&json!("Buy")));
}

#[test]
fn test_timestamps_become_utc_datetimes() {
    let table = merge_history_page(&sample_page(true));
    assert_eq!(
        table.cell(0, "time_event"),
        Some(&json!("2023-11-14 22:13:20"))
    );
    assert_eq!(
        table.cell(2, "time_event"),
        Some(&json!("2023-11-15 00:13:20"))
    );
    assert_eq!(
        table.cell(2, "time_sold"),
        Some(&json!("2023-11-15 00:13:20"))
    );
}

#[test]
fn test_buy_rows_carry_total_paid_and_nothing_seller_side() {
    let table = merge_history_page(&sample_page(true));
    // exact integer-cent sum of paid_amount and paid_fee
    assert_eq!(table.cell(2, "total_paid"), Some(&json!(1650)));
    assert_eq!(table.cell(2, "paid_amount"), Some(&json!(1500)));
    assert_eq!(table.cell(2, "paid_fee"), Some(&json!(150)));
    assert_eq!(table.cell(2, "received_amount"), Some(&Value::Null));
    assert_eq!(table.cell(2, "original_price"), Some(&Value::Null));
}

#[test]
fn test_list_rows_carry_no_purchase_fields() {
    let table = merge_history_page(&sample_page(true));
    assert_eq!(table.cell(0, "event_type"), Some(&json!("List")));
    for column in ["paid_amount", "paid_fee", "total_paid", "received_amount"] {
        assert_eq!(table.cell(0, column), Some(&Value::Null), "{}", column);
    }
    // the listing-side price survives on a List row
    assert_eq!(table.cell(0, "original_price"), Some(&json!(900)));
}

#[test]
fn test_sell_rows_carry_no_buyer_fields() {
    let table = merge_history_page(&sample_page(true));
    assert_eq!(table.cell(1, "event_type"), Some(&json!("Sell")));
    for column in ["paid_amount", "paid_fee", "total_paid", "original_price"] {
        assert_eq!(table.cell(1, column), Some(&Value::Null), "{}", column);
    }
}

#[test]
fn test_redundant_and_optional_columns_are_gone() {
    let table = merge_history_page(&sample_page(true));
    for column in [
        "currency",
        "background_color",
        "time_event_fraction",
        "date_event",
        "steam_fee",
        "publisher_fee",
        "price",
        "fee",
        "purchaseid",
        "needs_rollback",
        "cancel_reason",
        "funds_held",
        "asset.contextid",
        "asset.amount",
        "asset.status",
    ] {
        assert!(table.column_index(column).is_none(), "{} survived", column);
    }
}

#[test]
fn test_leading_column_order() {
    let table = merge_history_page(&sample_page(true));
    assert_eq!(
        &table.columns()[..9],
        &[
            "time_event",
            "name",
            "type",
            "event_type",
            "original_price",
            "received_amount",
            "total_paid",
            "paid_amount",
            "paid_fee",
        ]
    );

    // without purchases the absent money columns are simply skipped
    let table = merge_history_page(&sample_page(false));
    assert_eq!(
        &table.columns()[..5],
        &["time_event", "name", "type", "event_type", "original_price"]
    );
}

#[test]
fn test_page_concat_keeps_server_order() {
    let first = merge_history_page(&sample_page(true));
    let second = merge_history_page(&sample_page(false));
    let combined = Table::concat(vec![first, second]);

    assert_eq!(combined.len(), 5);
    let types: Vec<&Value> = combined.column_values("event_type").unwrap();
    assert_eq!(
        types,
        vec![
            &json!("List"),
            &json!("Sell"),
            &json!("Buy"),
            &json!("List"),
            &json!("Sell"),
        ]
    );
    // second page had no purchases, the unioned columns are Null there
    assert_eq!(combined.cell(4, "total_paid"), Some(&Value::Null));
    assert_eq!(combined.cell(2, "total_paid"), Some(&json!(1650)));
}

#[test]
fn test_page_missing_a_required_collection_is_rejected() {
    let err = RawHistoryPage::from_collections(vec![
        ("assets".to_string(), json!({})),
        ("listings".to_string(), json!({})),
    ])
    .unwrap_err();
    assert!(matches!(err, AppError::RemoteRejection(_)));
}
