// Fact pipeline: schema registry, reconciliation, normalization, context
// backfill, row assembly and the spreadsheet sink. Everything except
// `handlers` is synchronous, in-memory string work.

pub mod assemble;
pub mod backfill;
pub mod export;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod reconcile;
pub mod schema;
