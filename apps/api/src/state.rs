use std::sync::Arc;

use crate::config::Config;
use crate::extraction::oracle::ExtractionOracle;
use crate::facts::backfill::BackfillOptions;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-run data: every extraction result goes back to the caller.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable fact extractor. Default: ClaudeOracle; tests use a canned one.
    pub oracle: Arc<dyn ExtractionOracle>,
    pub config: Config,
    pub backfill: BackfillOptions,
}
