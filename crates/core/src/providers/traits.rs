use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::filter::BarFilter;
use crate::models::reconciliation::BarGamesResponse;

/// Source of the detail records behind a chart bar.
///
/// The backend owns aggregation and persistence; implementations only
/// carry a filter there and bring the raw envelope back. Interpreting the
/// `success` flag is left to the caller.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait DetailQueryProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the games matching `filter` and the server's aggregate over them.
    async fn fetch_bar_games(&self, filter: &BarFilter) -> Result<BarGamesResponse, CoreError>;
}

/// Moves the view to a single game when a record is picked.
pub trait Navigator {
    fn navigate_to_game(&self, game_id: &str);
}
