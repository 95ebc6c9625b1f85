//! Domain registration-age lookup.
//!
//! The one external, latency-bearing, failure-prone call in the scoring
//! pipeline. [`DomainAgeResolver::resolve`] never fails from the caller's
//! point of view: any lookup problem degrades to an age of 0 days, which
//! only dulls the signal for that request instead of blocking the score.

pub mod rdap;

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};

/// Why a lookup produced no usable age. Absorbed inside the resolver —
/// callers only ever see the degraded 0 value.
#[derive(Debug)]
enum LookupFailure {
    /// Network, HTTP, or payload-parse failure from the registry.
    Request(anyhow::Error),
    /// The registry answered but listed no registration event.
    NoRecord,
}

impl std::fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupFailure::Request(e) => write!(f, "registry lookup failed: {}", e),
            LookupFailure::NoRecord => write!(f, "no registration record"),
        }
    }
}

/// Resolves a URL to its domain's registration age in days.
pub struct DomainAgeResolver {
    client: reqwest::Client,
    endpoint: String,
}

impl DomainAgeResolver {
    /// Build a resolver against an RDAP base endpoint. The client carries a
    /// hard timeout so a hung registry cannot stall a scoring request.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Days since the domain's registration, or 0 when the lookup fails or
    /// returns nothing usable. No retry; one bounded attempt per request.
    ///
    /// The lookup key is the URL passed through verbatim — a path-bearing
    /// URL usually just misses at the registry and degrades here.
    pub async fn resolve(&self, url: &str) -> u32 {
        self.try_resolve(url).await.unwrap_or(0)
    }

    async fn try_resolve(&self, url: &str) -> Result<u32, LookupFailure> {
        let dates = rdap::fetch_registration_dates(&self.client, &self.endpoint, url)
            .await
            .map_err(LookupFailure::Request)?;
        age_in_days(&dates, Utc::now()).ok_or(LookupFailure::NoRecord)
    }
}

/// Age of the first listed registration date, in whole days.
///
/// The registry may list several candidate dates; the first one wins, with
/// no min/max comparison. An age that would come out negative (clock skew,
/// bad registry data) clamps to 0 so the feature stays non-negative.
fn age_in_days(dates: &[DateTime<Utc>], now: DateTime<Utc>) -> Option<u32> {
    let first = dates.first()?;
    Some((now - *first).num_days().max(0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_age_counts_whole_days() {
        let now = date(2024, 3, 10);
        assert_eq!(age_in_days(&[date(2024, 3, 1)], now), Some(9));
    }

    #[test]
    fn test_first_listed_date_wins() {
        let now = date(2024, 3, 10);
        // Later date listed first still wins — no min/max comparison
        let dates = vec![date(2024, 3, 1), date(2020, 1, 1)];
        assert_eq!(age_in_days(&dates, now), Some(9));
    }

    #[test]
    fn test_negative_age_clamps_to_zero() {
        let now = date(2024, 3, 10);
        assert_eq!(age_in_days(&[date(2024, 4, 1)], now), Some(0));
    }

    #[test]
    fn test_no_dates_is_no_record() {
        assert_eq!(age_in_days(&[], date(2024, 3, 10)), None);
    }

    #[tokio::test]
    async fn test_unreachable_registry_degrades_to_zero() {
        // Nothing listens here; connection is refused immediately
        let resolver =
            DomainAgeResolver::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        assert_eq!(resolver.resolve("http://example.com/login").await, 0);
    }
}
