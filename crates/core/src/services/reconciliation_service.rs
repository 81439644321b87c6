use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::filter::BarFilter;
use crate::models::reconciliation::ReconciliationResult;
use crate::providers::traits::DetailQueryProvider;

/// Turns a chart bar into its detail records and checks that they
/// reconstruct the value the chart shows.
///
/// Each call is a single attempt against the provider: no retry, no
/// caching, no shared state. Re-invoking with the same filter against the
/// same dataset yields the same verdict.
pub struct ReconciliationService {
    provider: Box<dyn DetailQueryProvider>,
}

impl ReconciliationService {
    pub fn new(provider: Box<dyn DetailQueryProvider>) -> Self {
        Self { provider }
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Fetch the games behind `filter` and judge them against
    /// `filter.displayed_value`.
    ///
    /// Transport errors and `success: false` envelopes both surface as
    /// `CoreError::TransportFailure`, carrying the server's message when
    /// it sent one.
    pub async fn fetch_reconciliation(
        &self,
        filter: &BarFilter,
    ) -> Result<ReconciliationResult, CoreError> {
        debug!("reconciling {filter} via {}", self.provider.name());

        let response = self
            .provider
            .fetch_bar_games(filter)
            .await
            .map_err(|e| match e {
                CoreError::TransportFailure(msg) => CoreError::TransportFailure(msg),
                other => CoreError::TransportFailure(other.to_string()),
            })?;

        if !response.success {
            return Err(CoreError::transport(response.error));
        }

        let computed_aggregate = response.bar_value.ok_or_else(|| {
            CoreError::TransportFailure("Response is missing bar_value".into())
        })?;

        let result = ReconciliationResult::new(
            response.games,
            response.count,
            computed_aggregate,
            response.avg_pace,
            filter.displayed_value,
        );

        if !result.matches_displayed {
            warn!(
                "bar {filter} displays {:.2} but {} games aggregate to {:.2}",
                filter.displayed_value, result.count, result.computed_aggregate
            );
        }
        if !result.count_consistent() {
            warn!(
                "bar {filter} reports count {} but returned {} games",
                result.count,
                result.records.len()
            );
        }

        Ok(result)
    }
}
