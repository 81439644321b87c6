pub mod filter;
pub mod overlay;
pub mod reconciliation;
pub mod record;
pub mod series;
pub mod settings;
