use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::Client;

/// Fetch registration-event dates for a lookup key from an RDAP endpoint.
///
/// Returns every `registration` event date in the order the registry listed
/// them. An unsuccessful HTTP status (not found, rate limited) maps to an
/// empty list; only transport and payload failures are errors.
pub async fn fetch_registration_dates(
    client: &Client,
    endpoint: &str,
    key: &str,
) -> Result<Vec<DateTime<Utc>>> {
    let url = format!("{}/domain/{}", endpoint, key);

    let response = client
        .get(&url)
        .header("User-Agent", "phish-checkr/0.1.0")
        .send()
        .await?;

    if !response.status().is_success() {
        return Ok(Vec::new());
    }

    let data: serde_json::Value = response.json().await?;
    Ok(registration_dates(&data))
}

/// Pull `registration` event dates out of an RDAP domain object, preserving
/// the registry's listing order. Events with missing or unparseable dates
/// are skipped.
fn registration_dates(data: &serde_json::Value) -> Vec<DateTime<Utc>> {
    let Some(events) = data.get("events").and_then(|e| e.as_array()) else {
        return Vec::new();
    };

    events
        .iter()
        .filter(|e| {
            e.get("eventAction").and_then(|a| a.as_str()) == Some("registration")
        })
        .filter_map(|e| e.get("eventDate").and_then(|d| d.as_str()))
        .filter_map(|d| DateTime::parse_from_rfc3339(d).ok())
        .map(|d| d.with_timezone(&Utc))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_registration_events_in_order() {
        let data: serde_json::Value = serde_json::from_str(
            r#"{
                "events": [
                    {"eventAction": "registration", "eventDate": "2019-06-01T00:00:00Z"},
                    {"eventAction": "expiration", "eventDate": "2030-01-01T00:00:00Z"},
                    {"eventAction": "registration", "eventDate": "2001-02-03T04:05:06Z"}
                ]
            }"#,
        )
        .unwrap();

        let dates = registration_dates(&data);
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[0].to_rfc3339(), "2019-06-01T00:00:00+00:00");
    }

    #[test]
    fn test_skips_bad_dates_and_missing_events() {
        let data: serde_json::Value = serde_json::from_str(
            r#"{"events": [{"eventAction": "registration", "eventDate": "yesterday"}]}"#,
        )
        .unwrap();
        assert!(registration_dates(&data).is_empty());

        let no_events: serde_json::Value = serde_json::from_str(r#"{"handle": "X"}"#).unwrap();
        assert!(registration_dates(&no_events).is_empty());
    }
}
