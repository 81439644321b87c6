pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use models::{
    filter::BarFilter,
    reconciliation::ReconciliationResult,
    series::{PlotArea, StatComparison, StatVariance, TrendChart},
    settings::ClientSettings,
};
use providers::{http::HttpDetailProvider, traits::{DetailQueryProvider, Navigator}};
use services::{
    drilldown::{DrilldownSession, RequestTicket, Resolution},
    reconciliation_service::ReconciliationService,
    trend_service::TrendService,
};

use errors::CoreError;

/// Main entry point for the Courtside core library.
/// Holds the drilldown panel state and the services it runs on.
#[must_use]
pub struct DrilldownDashboard {
    settings: ClientSettings,
    reconciliation_service: ReconciliationService,
    trend_service: TrendService,
    session: DrilldownSession,
}

impl std::fmt::Debug for DrilldownDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrilldownDashboard")
            .field("base_url", &self.settings.base_url)
            .field("provider", &self.reconciliation_service.provider_name())
            .field("session", &self.session)
            .finish()
    }
}

impl DrilldownDashboard {
    /// Create a dashboard talking to the HTTP API described by `settings`.
    pub fn new(settings: ClientSettings) -> Result<Self, CoreError> {
        let provider = HttpDetailProvider::new(&settings)?;
        Ok(Self::build(settings, Box::new(provider)))
    }

    /// Create a dashboard over any detail-query provider (tests, offline data).
    pub fn with_provider(provider: Box<dyn DetailQueryProvider>) -> Self {
        Self::build(ClientSettings::default(), provider)
    }

    #[must_use]
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    // ── Drilldown ───────────────────────────────────────────────────

    /// Open the drilldown for `filter`, fetch its games and apply them.
    ///
    /// Returns how the response was applied. Transport failures are not
    /// returned as `Err`; they show up as `Resolution::Failed` and in
    /// `drilldown().error()`.
    pub async fn open_drilldown(&mut self, filter: BarFilter) -> Resolution {
        let ticket = self.session.begin(filter);
        let outcome = self
            .reconciliation_service
            .fetch_reconciliation(ticket.filter())
            .await;
        self.session.resolve(&ticket, outcome)
    }

    /// Issue a request ticket without fetching yet.
    /// Pair with [`fetch_for`](Self::fetch_for) and [`apply`](Self::apply)
    /// when several requests may be in flight.
    pub fn begin_drilldown(&mut self, filter: BarFilter) -> RequestTicket {
        self.session.begin(filter)
    }

    /// Fetch the reconciliation for a ticket. Does not touch panel state.
    pub async fn fetch_for(
        &self,
        ticket: &RequestTicket,
    ) -> Result<ReconciliationResult, CoreError> {
        self.reconciliation_service
            .fetch_reconciliation(ticket.filter())
            .await
    }

    /// Apply a fetched outcome; stale tickets are dropped.
    pub fn apply(
        &mut self,
        ticket: &RequestTicket,
        outcome: Result<ReconciliationResult, CoreError>,
    ) -> Resolution {
        self.session.resolve(ticket, outcome)
    }

    /// Fetch a reconciliation outside of the panel state.
    pub async fn reconcile(&self, filter: &BarFilter) -> Result<ReconciliationResult, CoreError> {
        self.reconciliation_service.fetch_reconciliation(filter).await
    }

    pub fn close_drilldown(&mut self) {
        self.session.close();
    }

    /// Navigate to a game from the list and close the panel.
    pub fn select_game(&mut self, game_id: &str, navigator: &dyn Navigator) {
        self.session.select_record(game_id, navigator);
    }

    #[must_use]
    pub fn drilldown(&self) -> &DrilldownSession {
        &self.session
    }

    // ── Trends ──────────────────────────────────────────────────────

    /// Build a trend panel from values listed most recent first.
    pub fn trend_chart(
        &self,
        newest_first: &[f64],
        plot: PlotArea,
        axis_padding: f64,
    ) -> Result<TrendChart, CoreError> {
        self.trend_service.build_chart(newest_first, plot, axis_padding)
    }

    #[must_use]
    pub fn stat_variances(&self, stats: &[StatComparison]) -> Vec<StatVariance> {
        self.trend_service.stat_variances(stats)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(settings: ClientSettings, provider: Box<dyn DetailQueryProvider>) -> Self {
        Self {
            settings,
            reconciliation_service: ReconciliationService::new(provider),
            trend_service: TrendService::new(),
            session: DrilldownSession::new(),
        }
    }
}
