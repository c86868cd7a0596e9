use serde_json::json;

use steam_market::steam::catalog::AppListEnvelope;

#[test]
fn test_app_list_envelope_matches_the_wire_shape() {
    let body = json!({
        "applist": {
            "apps": [
                {"appid": 730, "name": "Counter-Strike 2"},
                {"appid": 440, "name": "Team Fortress 2"}
            ]
        }
    });

    let envelope: AppListEnvelope = serde_json::from_value(body).unwrap();
    assert_eq!(envelope.applist.apps.len(), 2);
    assert_eq!(envelope.applist.apps[0].appid, 730);
    assert_eq!(envelope.applist.apps[0].name, "Counter-Strike 2");
    assert_eq!(envelope.applist.apps[1].appid, 440);
}

#[test]
fn test_app_list_envelope_rejects_a_foreign_shape() {
    // a missing applist key is a malformed body, not an empty catalog
    let body = json!({"apps": []});
    assert!(serde_json::from_value::<AppListEnvelope>(body).is_err());
}
