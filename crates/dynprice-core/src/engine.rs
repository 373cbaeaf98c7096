//! # Pricing Engine
//!
//! The `calculate` entry point: select, price, record, return.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        calculate(request, "name")                       │
//! │                                                                         │
//! │  1. SELECT    Strategy::select("name")  ──► unknown? Default + warn!    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. PRICE     strategy.price(request)   ──► ArithmeticFault? return Err │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. RECORD    recorder.record(entry)    ──► failed? return Err,         │
//! │       │       (strategy_used = "name")      quote is dropped            │
//! │       ▼                                                                 │
//! │  4. RETURN    PriceQuote                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Statelessness
//! `PricingEngine` holds nothing. All tables are constants, so one value can
//! be built at startup and shared by reference across concurrent requests.

use async_trait::async_trait;
use tracing::{debug, error};

use crate::error::{PricingError, PricingResult};
use crate::strategy::Strategy;
use crate::types::{NewPricingHistory, PriceQuote, PricingRequest};

/// Error type a recorder reports. Kept boxed so the original error survives.
pub type RecordError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Storage collaborator that appends pricing history.
///
/// ## Contract
/// - One call per successful calculation
/// - Append only, the record is never touched again
/// - The implementation owns its session: acquire, append, release
#[async_trait]
pub trait HistoryRecorder: Send + Sync {
    /// Appends one history record.
    async fn record(&self, entry: NewPricingHistory) -> Result<(), RecordError>;
}

/// Stateless pricing engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingEngine;

impl PricingEngine {
    /// Creates the engine.
    pub const fn new() -> Self {
        PricingEngine
    }

    /// Selects a strategy and prices the request, without recording.
    pub fn quote(&self, request: &PricingRequest, strategy: &str) -> PricingResult<PriceQuote> {
        let selection = Strategy::select(strategy);
        selection.strategy.price(request)
    }

    /// Prices a request and appends its history record.
    ///
    /// ## Arguments
    /// * `recorder` - Where the history record goes
    /// * `request` - Pricing inputs
    /// * `strategy` - Requested strategy name; unknown names run `default`
    ///
    /// ## Returns
    /// The quote, only after the record was appended.
    ///
    /// ## Errors
    /// - [`PricingError::ArithmeticFault`] from the calculator, nothing recorded
    /// - [`PricingError::StorageWriteFailure`] if the append fails, no retry
    pub async fn calculate<R>(
        &self,
        recorder: &R,
        request: &PricingRequest,
        strategy: &str,
    ) -> PricingResult<PriceQuote>
    where
        R: HistoryRecorder + ?Sized,
    {
        let selection = Strategy::select(strategy);
        let quote = selection.strategy.price(request)?;

        debug!(
            product_id = %quote.product_id,
            requested = %selection.requested,
            executed = %selection.strategy,
            fallback = selection.fallback,
            dynamic_price = quote.dynamic_price,
            "Price calculated"
        );

        // The requested name is stored, not the one that ran.
        let entry = NewPricingHistory::from_quote(request, &quote, &selection.requested);
        recorder.record(entry).await.map_err(|e| {
            error!(product_id = %request.product_id, error = %e, "Pricing history append failed");
            PricingError::StorageWriteFailure(e)
        })?;

        Ok(quote)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Keeps every appended record in memory.
    #[derive(Default)]
    struct MemoryRecorder {
        entries: Mutex<Vec<NewPricingHistory>>,
    }

    impl MemoryRecorder {
        fn entries(&self) -> Vec<NewPricingHistory> {
            self.entries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HistoryRecorder for MemoryRecorder {
        async fn record(&self, entry: NewPricingHistory) -> Result<(), RecordError> {
            self.entries.lock().unwrap().push(entry);
            Ok(())
        }
    }

    /// Rejects every append.
    struct FailingRecorder;

    #[derive(Debug, thiserror::Error)]
    #[error("storage offline")]
    struct StorageOffline;

    #[async_trait]
    impl HistoryRecorder for FailingRecorder {
        async fn record(&self, _entry: NewPricingHistory) -> Result<(), RecordError> {
            Err(Box::new(StorageOffline))
        }
    }

    fn sample_request() -> PricingRequest {
        PricingRequest::new("SKU-1", 10.0, 5, 50, 20.0)
    }

    #[tokio::test]
    async fn test_calculate_records_once() {
        let engine = PricingEngine::new();
        let recorder = MemoryRecorder::default();

        let quote = engine
            .calculate(&recorder, &sample_request(), "default")
            .await
            .unwrap();

        assert_eq!(quote.dynamic_price, 13.65);
        let entries = recorder.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].product_id, "SKU-1");
        assert_eq!(entries[0].original_price, 13.0);
        assert_eq!(entries[0].dynamic_price, 13.65);
        assert_eq!(entries[0].demand_score, 5);
        assert_eq!(entries[0].inventory, 50);
        assert_eq!(entries[0].strategy_used, "default");
    }

    #[tokio::test]
    async fn test_unknown_strategy_prices_as_default_but_records_requested_name() {
        let engine = PricingEngine::new();
        let recorder = MemoryRecorder::default();

        let fallback = engine
            .calculate(&recorder, &sample_request(), "surge")
            .await
            .unwrap();
        let default = engine.quote(&sample_request(), "default").unwrap();

        assert_eq!(fallback, default);
        assert_eq!(fallback.strategy, Strategy::Default);
        assert_eq!(recorder.entries()[0].strategy_used, "surge");
    }

    #[tokio::test]
    async fn test_each_strategy_is_dispatched() {
        let engine = PricingEngine::new();
        let recorder = MemoryRecorder::default();

        for strategy in Strategy::ALL {
            let quote = engine
                .calculate(&recorder, &sample_request(), strategy.as_str())
                .await
                .unwrap();
            assert_eq!(quote.strategy, strategy);
        }

        let names: Vec<String> = recorder.entries().into_iter().map(|e| e.strategy_used).collect();
        assert_eq!(names, vec!["default", "aggressive", "conservative"]);
    }

    #[tokio::test]
    async fn test_storage_failure_discards_quote() {
        let engine = PricingEngine::new();

        let err = engine
            .calculate(&FailingRecorder, &sample_request(), "default")
            .await
            .unwrap_err();

        match err {
            PricingError::StorageWriteFailure(source) => {
                assert!(source.downcast_ref::<StorageOffline>().is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_arithmetic_fault_records_nothing() {
        let engine = PricingEngine::new();
        let recorder = MemoryRecorder::default();
        let request = PricingRequest::new("SKU-0", 10.0, 5, 50, 0.0);

        let err = engine.calculate(&recorder, &request, "default").await.unwrap_err();

        assert!(matches!(err, PricingError::ArithmeticFault { .. }));
        assert!(recorder.entries().is_empty());
    }

    #[tokio::test]
    async fn test_recorder_behind_trait_object() {
        let engine = PricingEngine::new();
        let recorder: Box<dyn HistoryRecorder> = Box::new(MemoryRecorder::default());

        let quote = engine
            .calculate(recorder.as_ref(), &sample_request(), "aggressive")
            .await
            .unwrap();
        assert_eq!(quote.dynamic_price, 15.4);
    }
}
