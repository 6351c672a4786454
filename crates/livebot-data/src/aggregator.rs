//! Incremental quote-to-candle aggregation.

use chrono::{DateTime, Duration, Utc};
use livebot_core::{Candle, CandleSeries, Quote};

/// Mutable accumulator for the currently open window.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingCandle {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl PendingCandle {
    fn seed(price: f64, size: f64) -> Self {
        Self {
            open: price,
            high: price,
            low: price,
            close: price,
            volume: size,
        }
    }

    fn update(&mut self, price: f64, size: f64) {
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.close = price;
        self.volume += size;
    }

    fn finalize(self, window_start: DateTime<Utc>) -> Candle {
        Candle::new(
            window_start.timestamp_millis(),
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        )
    }
}

/// Converts a stream of quotes into an append-only candle history.
///
/// Windows are delimited by elapsed wall-clock time since the start of
/// the currently open window, not by calendar alignment: the first
/// window opens at `begin(now)` and each subsequent window opens at the
/// instant the previous one is emitted. Over long runtimes the window
/// boundaries therefore drift relative to clock-aligned candles. This
/// is intended behavior, not an oversight.
///
/// At most one window is open at any time; a window in which no quote
/// ever arrived is restarted silently, so an empty candle is never
/// emitted.
#[derive(Debug)]
pub struct CandleAggregator {
    interval: Duration,
    window_start: Option<DateTime<Utc>>,
    pending: Option<PendingCandle>,
    history: CandleSeries,
}

impl CandleAggregator {
    /// Create an aggregator for one symbol with a fixed window duration.
    pub fn new(symbol: impl Into<String>, interval: Duration) -> Self {
        Self {
            interval,
            window_start: None,
            pending: None,
            history: CandleSeries::new(symbol),
        }
    }

    /// Open the first window at `now`. Called once at startup.
    pub fn begin(&mut self, now: DateTime<Utc>) {
        self.window_start = Some(now);
        self.pending = None;
    }

    /// Fold a quote into the open window, emitting a candle when the
    /// window has elapsed.
    ///
    /// `None` (quote unavailable) is a no-op: all state is left
    /// untouched and no candle is returned.
    pub fn ingest(&mut self, quote: Option<&Quote>, now: DateTime<Utc>) -> Option<Candle> {
        let quote = quote?;
        let start = match self.window_start {
            Some(start) => start,
            None => {
                self.window_start = Some(now);
                now
            }
        };

        let price = quote.mid();
        let size = quote.mid_size();

        if now - start >= self.interval {
            let mut emitted = None;
            if let Some(pending) = self.pending.take() {
                let candle = pending.finalize(start);
                self.history.push(candle);
                emitted = Some(candle);
            }

            // Either way the next window opens now, seeded with the
            // quote that closed the old one.
            self.window_start = Some(now);
            self.pending = Some(PendingCandle::seed(price, size));
            return emitted;
        }

        match self.pending.as_mut() {
            Some(pending) => pending.update(price, size),
            None => self.pending = Some(PendingCandle::seed(price, size)),
        }
        None
    }

    /// Read-only copy of the completed candle history, oldest first.
    pub fn snapshot(&self) -> Vec<Candle> {
        self.history.snapshot()
    }

    /// Number of completed candles.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The completed candle history.
    pub fn history(&self) -> &CandleSeries {
        &self.history
    }

    /// Start of the currently open window, once `begin` has been called.
    pub fn window_start(&self) -> Option<DateTime<Utc>> {
        self.window_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const INTERVAL_SECS: i64 = 300;

    fn quote(mid: f64, size: f64) -> Quote {
        // Symmetric spread so quote.mid() == mid exactly.
        Quote {
            symbol: "BTC/USD".to_string(),
            bid: mid - 1.0,
            ask: mid + 1.0,
            bid_size: size,
            ask_size: size,
            timestamp: 0,
        }
    }

    fn aggregator() -> (CandleAggregator, DateTime<Utc>) {
        let mut agg = CandleAggregator::new("BTC/USD", Duration::seconds(INTERVAL_SECS));
        let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        agg.begin(t0);
        (agg, t0)
    }

    #[test]
    fn test_single_window_ohlcv() {
        let (mut agg, t0) = aggregator();

        let mids = [100.0, 105.0, 95.0, 102.0];
        for (i, &mid) in mids.iter().enumerate() {
            let emitted = agg.ingest(Some(&quote(mid, 0.5)), t0 + Duration::seconds(i as i64 * 60));
            assert!(emitted.is_none());
        }

        let candle = agg
            .ingest(
                Some(&quote(110.0, 1.0)),
                t0 + Duration::seconds(INTERVAL_SECS),
            )
            .expect("window elapsed, candle expected");

        assert_eq!(candle.timestamp, t0.timestamp_millis());
        assert_eq!(candle.open, 100.0);
        assert_eq!(candle.high, 105.0);
        assert_eq!(candle.low, 95.0);
        assert_eq!(candle.close, 102.0);
        assert!((candle.volume - 2.0).abs() < 1e-9);
        assert_eq!(agg.history_len(), 1);
    }

    #[test]
    fn test_closing_quote_seeds_next_window() {
        let (mut agg, t0) = aggregator();

        agg.ingest(Some(&quote(100.0, 1.0)), t0 + Duration::seconds(10));
        let boundary = t0 + Duration::seconds(INTERVAL_SECS);
        agg.ingest(Some(&quote(120.0, 2.0)), boundary).unwrap();

        // Next window opens at the boundary quote, not empty.
        assert_eq!(agg.window_start(), Some(boundary));
        let candle = agg
            .ingest(
                Some(&quote(121.0, 1.0)),
                boundary + Duration::seconds(INTERVAL_SECS),
            )
            .unwrap();
        assert_eq!(candle.open, 120.0);
        assert_eq!(candle.close, 121.0);
        assert!((candle.volume - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_quiet_window_emits_nothing() {
        let (mut agg, t0) = aggregator();

        // First quote arrives two whole windows after begin.
        let late = t0 + Duration::seconds(2 * INTERVAL_SECS);
        assert!(agg.ingest(Some(&quote(100.0, 1.0)), late).is_none());
        assert_eq!(agg.history_len(), 0);
        assert_eq!(agg.window_start(), Some(late));

        // The restarted window still produces a real candle.
        let candle = agg
            .ingest(Some(&quote(101.0, 1.0)), late + Duration::seconds(INTERVAL_SECS))
            .unwrap();
        assert_eq!(candle.open, 100.0);
        assert_eq!(agg.history_len(), 1);
    }

    #[test]
    fn test_unavailable_quote_is_noop() {
        let (mut agg, t0) = aggregator();
        agg.ingest(Some(&quote(100.0, 1.0)), t0 + Duration::seconds(10));

        let before = format!("{agg:?}");
        // Even past the window boundary, no quote means no progress.
        let emitted = agg.ingest(None, t0 + Duration::seconds(INTERVAL_SECS + 60));
        assert!(emitted.is_none());
        assert_eq!(format!("{agg:?}"), before);
    }

    #[test]
    fn test_at_most_one_candle_per_ingest() {
        let (mut agg, t0) = aggregator();
        agg.ingest(Some(&quote(100.0, 1.0)), t0 + Duration::seconds(1));

        // A quote arriving several intervals late still closes only the
        // one pending window.
        let len_before = agg.history_len();
        agg.ingest(
            Some(&quote(100.0, 1.0)),
            t0 + Duration::seconds(5 * INTERVAL_SECS),
        );
        assert_eq!(agg.history_len(), len_before + 1);
    }

    #[test]
    fn test_volume_rounded_on_finalize() {
        let (mut agg, t0) = aggregator();
        for i in 0..3 {
            agg.ingest(
                Some(&quote(100.0, 0.1111111)),
                t0 + Duration::seconds(i * 10),
            );
        }
        let candle = agg
            .ingest(Some(&quote(100.0, 1.0)), t0 + Duration::seconds(INTERVAL_SECS))
            .unwrap();
        assert!((candle.volume - 0.333333).abs() < 1e-12);
    }

    #[test]
    fn test_snapshot_is_chronological() {
        let (mut agg, t0) = aggregator();
        let mut now = t0;
        for i in 0..4 {
            agg.ingest(Some(&quote(100.0 + i as f64, 1.0)), now + Duration::seconds(1));
            now += Duration::seconds(INTERVAL_SECS);
            agg.ingest(Some(&quote(100.0 + i as f64, 1.0)), now);
        }

        let snap = agg.snapshot();
        assert_eq!(snap.len(), agg.history_len());
        for pair in snap.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
    }
}
