use log::debug;

use crate::errors::CoreError;
use crate::models::filter::BarFilter;
use crate::models::reconciliation::ReconciliationResult;
use crate::providers::traits::Navigator;

/// Handle for one issued drilldown request.
///
/// Carries the generation it was issued under; only a ticket from the
/// latest generation may be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTicket {
    generation: u64,
    filter: BarFilter,
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn filter(&self) -> &BarFilter {
        &self.filter
    }
}

/// What happened to a resolved request.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Result stored; the list can render.
    Applied,
    /// Error stored; the panel shows the message instead of the list.
    Failed(String),
    /// A newer request was issued (or the panel closed) first; dropped.
    Stale,
}

/// State of one drilldown panel, applying responses last-requested-wins.
///
/// Responses may resolve in any order. Each `begin` bumps a generation
/// counter and `resolve` only accepts the ticket of the current
/// generation, so a slow response for an old filter can never overwrite
/// the newer one.
#[derive(Debug, Default)]
pub struct DrilldownSession {
    generation: u64,
    active_filter: Option<BarFilter>,
    loading: bool,
    result: Option<ReconciliationResult>,
    error: Option<String>,
}

impl DrilldownSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or re-target) the panel for `filter` and issue a ticket.
    /// Any outstanding ticket becomes stale. A result for a different bar
    /// is discarded; a result for the same bar stays until replaced.
    pub fn begin(&mut self, filter: BarFilter) -> RequestTicket {
        let same_bar = self
            .active_filter
            .as_ref()
            .is_some_and(|current| current.same_bar(&filter));
        if !same_bar {
            self.result = None;
        }
        self.generation += 1;
        self.active_filter = Some(filter.clone());
        self.loading = true;
        self.error = None;
        debug!("drilldown generation {} for {filter}", self.generation);
        RequestTicket {
            generation: self.generation,
            filter,
        }
    }

    /// Apply the outcome of a request.
    ///
    /// Failures leave any previously applied result in place.
    pub fn resolve(
        &mut self,
        ticket: &RequestTicket,
        outcome: Result<ReconciliationResult, CoreError>,
    ) -> Resolution {
        if !self.is_current(ticket) {
            debug!(
                "dropping stale drilldown response (generation {}, current {})",
                ticket.generation, self.generation
            );
            return Resolution::Stale;
        }

        self.loading = false;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
                Resolution::Applied
            }
            Err(e) => {
                let message = match e {
                    CoreError::TransportFailure(msg) => msg,
                    other => other.to_string(),
                };
                self.error = Some(message.clone());
                Resolution::Failed(message)
            }
        }
    }

    /// Whether `ticket` belongs to the latest request of an open panel.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.active_filter.is_some() && ticket.generation == self.generation
    }

    /// Close the panel, discarding its result and invalidating any
    /// outstanding ticket.
    pub fn close(&mut self) {
        self.generation += 1;
        self.active_filter = None;
        self.loading = false;
        self.result = None;
        self.error = None;
    }

    /// Navigate to the picked game, then close the panel.
    pub fn select_record(&mut self, game_id: &str, navigator: &dyn Navigator) {
        navigator.navigate_to_game(game_id);
        self.close();
    }

    pub fn is_open(&self) -> bool {
        self.active_filter.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn active_filter(&self) -> Option<&BarFilter> {
        self.active_filter.as_ref()
    }

    pub fn result(&self) -> Option<&ReconciliationResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
