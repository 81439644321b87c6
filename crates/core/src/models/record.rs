use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::filter::Metric;

/// Three-point shooting line for a single game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreePointLine {
    pub made: u32,
    pub attempted: u32,
    /// Points from threes (normally `made * 3`)
    pub points: u32,
    /// Make percentage, 0–100
    pub pct: f64,
}

/// One game behind an aggregate bar.
///
/// Records are immutable once received; they are owned by the
/// reconciliation result for as long as the drilldown stays open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub game_id: String,

    pub game_date: NaiveDate,

    pub is_home: bool,

    /// Opponent abbreviation, e.g. "BOS"
    pub opponent_abbr: String,

    pub team_pts: u32,

    pub opp_pts: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_points: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub three_pt: Option<ThreePointLine>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turnovers: Option<u32>,

    /// Possessions per 48 minutes for this game
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace_value: Option<f64>,

    /// Opponent's rank in the dimension's underlying stat
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent_rank: Option<u32>,
}

impl DetailRecord {
    /// Point differential from the team's perspective.
    pub fn margin(&self) -> i64 {
        i64::from(self.team_pts) - i64::from(self.opp_pts)
    }

    pub fn is_win(&self) -> bool {
        self.team_pts > self.opp_pts
    }

    /// Combined score, falling back to the sum of both sides.
    pub fn combined_points(&self) -> u32 {
        self.total_points
            .unwrap_or_else(|| self.team_pts.saturating_add(self.opp_pts))
    }

    /// The per-game value a bar of `metric` averages over.
    /// `None` when the record lacks that stat.
    pub fn metric_value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Scoring => Some(f64::from(self.team_pts)),
            Metric::ThreePt => self.three_pt.as_ref().map(|t| f64::from(t.points)),
            Metric::Turnovers => self.turnovers.map(f64::from),
        }
    }

    /// Short "W 112-104 vs BOS" style label.
    pub fn result_label(&self) -> String {
        let outcome = if self.is_win() { "W" } else { "L" };
        let venue = if self.is_home { "vs" } else { "@" };
        format!(
            "{outcome} {}-{} {venue} {}",
            self.team_pts, self.opp_pts, self.opponent_abbr
        )
    }
}
