use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::candle::Candle;

// ============================================================================
// OhlcvTimeSeries: Raw time series data for one symbol
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct PairInterval {
    pub name: String,
    pub interval_ms: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OhlcvTimeSeries {
    pub pair_interval: PairInterval,
    pub first_kline_timestamp_ms: i64,

    // Prices
    pub open_prices: Vec<f64>,
    pub high_prices: Vec<f64>,
    pub low_prices: Vec<f64>,
    pub close_prices: Vec<f64>,

    // Volumes (empty when the feed supplies none)
    pub base_asset_volumes: Vec<f64>,
    pub quote_asset_volumes: Vec<f64>,
}

impl OhlcvTimeSeries {
    /// Build a series from close prices alone. Highs/lows collapse onto the
    /// closes and volumes are left empty; detector flags that depend on them
    /// degrade to `false` rather than failing.
    pub fn from_closes(name: &str, interval_ms: i64, closes: Vec<f64>) -> Self {
        OhlcvTimeSeries {
            pair_interval: PairInterval {
                name: name.to_string(),
                interval_ms,
            },
            first_kline_timestamp_ms: 0,
            open_prices: closes.clone(),
            high_prices: closes.clone(),
            low_prices: closes.clone(),
            close_prices: closes,
            base_asset_volumes: Vec::new(),
            quote_asset_volumes: Vec::new(),
        }
    }

    pub fn get_candle(&self, idx: usize) -> Candle {
        Candle::new(
            self.open_prices[idx],
            self.high_prices[idx],
            self.low_prices[idx],
            self.close_prices[idx],
            self.base_asset_volumes.get(idx).copied().unwrap_or(0.0),
            self.quote_asset_volumes.get(idx).copied().unwrap_or(0.0),
        )
    }

    pub fn klines(&self) -> usize {
        self.close_prices.len()
    }

    pub fn has_volumes(&self) -> bool {
        self.base_asset_volumes.len() == self.close_prices.len()
            && !self.base_asset_volumes.is_empty()
    }

    /// Timestamp of the kline at `idx` (synthetic when the feed gave no epoch,
    /// since `first_kline_timestamp_ms` defaults to 0).
    pub fn timestamp_ms_at(&self, idx: usize) -> i64 {
        self.first_kline_timestamp_ms + idx as i64 * self.pair_interval.interval_ms
    }

    pub fn datetime_at(&self, idx: usize) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms_at(idx))
    }

    pub fn last_kline_timestamp_ms(&self) -> i64 {
        if self.close_prices.is_empty() {
            return self.first_kline_timestamp_ms;
        }
        self.timestamp_ms_at(self.close_prices.len() - 1)
    }

    /// Aggregate `factor` consecutive klines into one: open = first,
    /// high = max, low = min, close = last, volumes summed. A trailing
    /// partial bucket is dropped.
    pub fn resample(&self, factor: usize) -> OhlcvTimeSeries {
        if factor <= 1 {
            return self.clone();
        }

        let buckets = self.close_prices.len() / factor;
        let mut open_prices = Vec::with_capacity(buckets);
        let mut high_prices = Vec::with_capacity(buckets);
        let mut low_prices = Vec::with_capacity(buckets);
        let mut close_prices = Vec::with_capacity(buckets);
        let mut base_asset_volumes = Vec::with_capacity(buckets);
        let mut quote_asset_volumes = Vec::with_capacity(buckets);

        let has_volumes = self.has_volumes();

        for b in 0..buckets {
            let start = b * factor;
            let end = start + factor;

            open_prices.push(self.open_prices[start]);
            close_prices.push(self.close_prices[end - 1]);
            high_prices.push(
                self.high_prices[start..end]
                    .iter()
                    .cloned()
                    .fold(f64::NEG_INFINITY, f64::max),
            );
            low_prices.push(
                self.low_prices[start..end]
                    .iter()
                    .cloned()
                    .fold(f64::INFINITY, f64::min),
            );
            if has_volumes {
                base_asset_volumes.push(self.base_asset_volumes[start..end].iter().sum());
                quote_asset_volumes.push(self.quote_asset_volumes[start..end].iter().sum());
            }
        }

        OhlcvTimeSeries {
            pair_interval: PairInterval {
                name: self.pair_interval.name.clone(),
                interval_ms: self.pair_interval.interval_ms * factor as i64,
            },
            first_kline_timestamp_ms: self.first_kline_timestamp_ms,
            open_prices,
            high_prices,
            low_prices,
            close_prices,
            base_asset_volumes,
            quote_asset_volumes,
        }
    }
}
