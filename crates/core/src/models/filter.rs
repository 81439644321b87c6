use serde::{Deserialize, Serialize};

/// Which statistic a chart bar aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Points scored by the team
    #[serde(rename = "scoring")]
    Scoring,
    /// Points from three-point makes
    #[serde(rename = "threept")]
    ThreePt,
    /// Turnovers committed
    #[serde(rename = "turnovers")]
    Turnovers,
}

impl Metric {
    /// Wire name used by the detail-query API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Scoring => "scoring",
            Metric::ThreePt => "threept",
            Metric::Turnovers => "turnovers",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Home or away split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Context {
    Home,
    Away,
}

impl Context {
    pub fn as_str(&self) -> &'static str {
        match self {
            Context::Home => "home",
            Context::Away => "away",
        }
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether pace buckets come from the game's actual or projected pace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceType {
    Actual,
    Projected,
}

impl PaceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaceType::Actual => "actual",
            PaceType::Projected => "projected",
        }
    }
}

impl std::fmt::Display for PaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pace bucket for the `pace_bucket` dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Slow,
    Normal,
    Fast,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Slow => "slow",
            Bucket::Normal => "normal",
            Bucket::Fast => "fast",
        }
    }
}

/// Opponent tier for every tiered dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Elite,
    Avg,
    Bad,
    Low,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Elite => "elite",
            Tier::Avg => "avg",
            Tier::Bad => "bad",
            Tier::Low => "low",
        }
    }
}

/// The grouping dimension of a bar, carrying its bucket or tier.
///
/// `pace_bucket` is the only dimension keyed by a [`Bucket`]; all others
/// are keyed by a [`Tier`]. Serialized flat, e.g.
/// `{"dimension": "pace_bucket", "bucket": "fast"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "dimension")]
pub enum Dimension {
    #[serde(rename = "defense_tier")]
    DefenseTier { tier: Tier },
    #[serde(rename = "pace_bucket")]
    PaceBucket { bucket: Bucket },
    #[serde(rename = "threept_def_tier")]
    ThreePtDefTier { tier: Tier },
    #[serde(rename = "pressure_tier")]
    PressureTier { tier: Tier },
}

impl Dimension {
    /// Wire name of the dimension, without its payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::DefenseTier { .. } => "defense_tier",
            Dimension::PaceBucket { .. } => "pace_bucket",
            Dimension::ThreePtDefTier { .. } => "threept_def_tier",
            Dimension::PressureTier { .. } => "pressure_tier",
        }
    }

    pub fn bucket(&self) -> Option<Bucket> {
        match self {
            Dimension::PaceBucket { bucket } => Some(*bucket),
            _ => None,
        }
    }

    pub fn tier(&self) -> Option<Tier> {
        match self {
            Dimension::DefenseTier { tier }
            | Dimension::ThreePtDefTier { tier }
            | Dimension::PressureTier { tier } => Some(*tier),
            Dimension::PaceBucket { .. } => None,
        }
    }

    /// The dimension-conditional query parameter: `("bucket", ..)` or `("tier", ..)`.
    pub fn selector_param(&self) -> (&'static str, &'static str) {
        match self {
            Dimension::PaceBucket { bucket } => ("bucket", bucket.as_str()),
            Dimension::DefenseTier { tier }
            | Dimension::ThreePtDefTier { tier }
            | Dimension::PressureTier { tier } => ("tier", tier.as_str()),
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (key, value) = self.selector_param();
        write!(f, "{}[{key}={value}]", self.as_str())
    }
}

/// Identifies one aggregate bar on a chart, plus the value the chart shows for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarFilter {
    pub team_id: i64,

    pub metric: Metric,

    /// Grouping dimension with its bucket/tier
    #[serde(flatten)]
    pub dimension: Dimension,

    pub context: Context,

    pub pace_type: PaceType,

    /// Season label, e.g. "2024-25"
    pub season: String,

    /// The aggregate currently drawn on the chart for this bar
    pub displayed_value: f64,
}

impl BarFilter {
    pub fn new(
        team_id: i64,
        metric: Metric,
        dimension: Dimension,
        context: Context,
        pace_type: PaceType,
        season: impl Into<String>,
        displayed_value: f64,
    ) -> Self {
        Self {
            team_id,
            metric,
            dimension,
            context,
            pace_type,
            season: season.into(),
            displayed_value,
        }
    }

    /// Query parameters for the detail-query API.
    /// Always contains exactly one of `bucket` / `tier`.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let (selector_key, selector_value) = self.dimension.selector_param();
        vec![
            ("metric", self.metric.as_str().to_string()),
            ("dimension", self.dimension.as_str().to_string()),
            ("context", self.context.as_str().to_string()),
            ("pace_type", self.pace_type.as_str().to_string()),
            ("season", self.season.clone()),
            (selector_key, selector_value.to_string()),
        ]
    }

    /// Whether two filters address the same bar, ignoring the displayed value.
    pub fn same_bar(&self, other: &BarFilter) -> bool {
        self.team_id == other.team_id
            && self.metric == other.metric
            && self.dimension == other.dimension
            && self.context == other.context
            && self.pace_type == other.pace_type
            && self.season == other.season
    }
}

impl std::fmt::Display for BarFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "team {} {} {} {} {} {}",
            self.team_id, self.season, self.metric, self.dimension, self.context, self.pace_type
        )
    }
}
