use chrono::{TimeZone, Utc};

/// Convert a unix-seconds timestamp into a formatted UTC datetime string.
pub fn unix_time_to_datetime(timestamp_s: i64) -> Result<String, String> {
    match Utc.timestamp_opt(timestamp_s, 0) {
        chrono::LocalResult::Single(datetime) => {
            let formatted_datetime = datetime.format("%Y-%m-%d %H:%M:%S").to_string();
            Ok(formatted_datetime)
        }
        chrono::LocalResult::None => Err("Invalid timestamp: None".to_string()),
        chrono::LocalResult::Ambiguous(_, _) => Err("Invalid timestamp: Ambiguous".to_string()),
    }
}
