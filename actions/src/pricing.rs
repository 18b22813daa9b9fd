//! External USD price feed for the wrapped native token.
//!
//! Prices are cosmetic: every failure path yields `None` and the
//! holdings view simply shows the position unpriced.

use std::time::Duration;

use serde::Deserialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Deserialize)]
struct PairQuote {
    #[serde(rename = "priceUsd")]
    price_usd: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PairResponse {
    #[serde(default)]
    pairs: Option<Vec<PairQuote>>,
}

impl PairResponse {
    /// First pair's price, when it is a finite number. NaN or infinity
    /// in the feed is as useless as no price at all.
    fn price(&self) -> Option<f64> {
        self.pairs
            .as_ref()?
            .first()?
            .price_usd
            .as_deref()
            .and_then(|p| p.parse().ok())
            .filter(|p: &f64| p.is_finite())
    }
}

/// One pair on the aggregator's `/latest/dex/pairs/{chain}/{pair}` API.
#[derive(Clone, Debug)]
pub struct PriceFeed {
    client: reqwest::Client,
    base_url: String,
    chain_slug: String,
    pair: String,
}

impl PriceFeed {
    pub fn new(base_url: &str, chain_slug: &str, pair: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            chain_slug: chain_slug.to_string(),
            pair: pair.to_string(),
        }
    }

    /// Fetch the current USD price. `None` on any failure.
    pub async fn fetch(&self) -> Option<f64> {
        let url = format!(
            "{}/latest/dex/pairs/{}/{}",
            self.base_url, self.chain_slug, self.pair
        );
        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("price feed request failed: {e}");
                return None;
            }
        };
        let body: PairResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("price feed returned unexpected body: {e}");
                return None;
            }
        };
        body.price()
    }
}

/// Background refresher publishing the latest price on a watch channel.
///
/// Dropping the poller aborts the task; nothing keeps polling after the
/// owner is gone.
pub struct PricePoller {
    receiver: watch::Receiver<Option<f64>>,
    handle: JoinHandle<()>,
}

impl PricePoller {
    /// Fetch immediately, then every `refresh` interval.
    pub fn spawn(feed: PriceFeed, refresh: Duration) -> Self {
        let (sender, receiver) = watch::channel(None);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(refresh);
            loop {
                ticker.tick().await;
                let price = feed.fetch().await;
                if sender.send(price).is_err() {
                    return;
                }
            }
        });
        Self { receiver, handle }
    }

    /// The most recently published price.
    pub fn latest(&self) -> Option<f64> {
        *self.receiver.borrow()
    }

    /// A receiver for callers that want change notifications.
    pub fn subscribe(&self) -> watch::Receiver<Option<f64>> {
        self.receiver.clone()
    }
}

impl Drop for PricePoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_price(body: &str) -> Option<f64> {
        let parsed: PairResponse = serde_json::from_str(body).ok()?;
        parsed.price()
    }

    #[test]
    fn extracts_the_first_pair_price() {
        let body = r#"{"pairs":[{"priceUsd":"3.21"},{"priceUsd":"9.99"}]}"#;
        assert_eq!(parse_price(body), Some(3.21));
    }

    #[test]
    fn tolerates_missing_or_null_pairs() {
        assert_eq!(parse_price(r#"{}"#), None);
        assert_eq!(parse_price(r#"{"pairs":null}"#), None);
        assert_eq!(parse_price(r#"{"pairs":[]}"#), None);
        assert_eq!(parse_price(r#"{"pairs":[{"priceUsd":null}]}"#), None);
        assert_eq!(parse_price(r#"{"pairs":[{}]}"#), None);
    }

    #[test]
    fn tolerates_unparseable_price_strings() {
        assert_eq!(parse_price(r#"{"pairs":[{"priceUsd":"n/a"}]}"#), None);
    }

    #[test]
    fn rejects_non_finite_prices() {
        assert_eq!(parse_price(r#"{"pairs":[{"priceUsd":"NaN"}]}"#), None);
        assert_eq!(parse_price(r#"{"pairs":[{"priceUsd":"inf"}]}"#), None);
        assert_eq!(parse_price(r#"{"pairs":[{"priceUsd":"-inf"}]}"#), None);
    }

    #[tokio::test]
    async fn poller_starts_with_no_price_and_stops_on_drop() {
        let feed = PriceFeed::new("http://127.0.0.1:1", "berachain", "0xpair");
        let poller = PricePoller::spawn(feed, Duration::from_secs(3600));
        assert_eq!(poller.latest(), None);
        let mut rx = poller.subscribe();
        drop(poller);
        // channel closes once the task is aborted and the sender dropped
        assert!(rx.changed().await.is_err() || rx.borrow().is_none());
    }
}
