use serde::{Deserialize, Serialize};

use super::filter::Metric;
use super::record::DetailRecord;

/// Largest absolute gap between the chart's value and the server's
/// recomputed aggregate that still counts as a match (exclusive).
pub const MATCH_TOLERANCE: f64 = 0.2;

/// Whether a recomputed aggregate reconstructs the displayed one.
pub fn values_match(computed: f64, displayed: f64) -> bool {
    (computed - displayed).abs() < MATCH_TOLERANCE
}

/// Raw response envelope of the detail-query API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BarGamesResponse {
    pub success: bool,

    #[serde(default)]
    pub games: Vec<DetailRecord>,

    #[serde(default)]
    pub count: usize,

    /// Server-recomputed aggregate over `games`
    #[serde(default)]
    pub bar_value: Option<f64>,

    /// Average pace over `games`, when the dimension is pace-related
    #[serde(default)]
    pub avg_pace: Option<f64>,

    #[serde(default)]
    pub error: Option<String>,
}

/// Detail records for one bar, with the verdict against the chart's value.
///
/// Created fresh on every drilldown open and discarded on close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub records: Vec<DetailRecord>,

    /// Number of games reported by the server
    pub count: usize,

    /// Aggregate the server recomputed from `records`
    pub computed_aggregate: f64,

    /// Secondary aggregate such as average pace
    pub computed_auxiliary: Option<f64>,

    /// The value the chart displayed when the drilldown was opened
    pub displayed_value: f64,

    /// `|computed_aggregate - displayed_value| < MATCH_TOLERANCE`
    pub matches_displayed: bool,
}

impl ReconciliationResult {
    pub fn new(
        records: Vec<DetailRecord>,
        count: usize,
        computed_aggregate: f64,
        computed_auxiliary: Option<f64>,
        displayed_value: f64,
    ) -> Self {
        Self {
            records,
            count,
            computed_aggregate,
            computed_auxiliary,
            displayed_value,
            matches_displayed: values_match(computed_aggregate, displayed_value),
        }
    }

    /// Signed gap: server aggregate minus the displayed value.
    pub fn discrepancy(&self) -> f64 {
        self.computed_aggregate - self.displayed_value
    }

    /// Mean of the per-game metric values, computed locally from the records.
    /// Returns `None` when no record carries the metric.
    pub fn client_side_aggregate(&self, metric: Metric) -> Option<f64> {
        let values: Vec<f64> = self
            .records
            .iter()
            .filter_map(|r| r.metric_value(metric))
            .collect();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Whether the server's count agrees with the records actually returned.
    pub fn count_consistent(&self) -> bool {
        self.count == self.records.len()
    }

    pub fn wins(&self) -> usize {
        self.records.iter().filter(|r| r.is_win()).count()
    }

    pub fn losses(&self) -> usize {
        self.records.len() - self.wins()
    }
}
