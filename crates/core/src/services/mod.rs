pub mod drilldown;
pub mod overlay_anchor;
pub mod reconciliation_service;
pub mod series_math;
pub mod trend_service;
