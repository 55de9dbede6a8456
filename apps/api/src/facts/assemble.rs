//! Row Assembler and the end-to-end pipeline entry point.

use tracing::info;

use crate::errors::AppError;
use crate::facts::backfill::{backfill_context, BackfillOptions};
use crate::facts::models::{CandidateFact, NormalizedRow, SourceText};
use crate::facts::normalize::normalize_value;
use crate::facts::reconcile::reconcile;

/// Turns reconciled facts into output rows: normalized value, backfilled
/// comment and the key's canonical index. Total for any reconciled input.
pub fn assemble_rows(
    facts: Vec<CandidateFact>,
    source: SourceText<'_>,
    options: &BackfillOptions,
) -> Vec<NormalizedRow> {
    facts
        .into_iter()
        .map(|fact| NormalizedRow {
            index: fact.key.index(),
            key: fact.key,
            value: normalize_value(fact.key, &fact.value),
            comments: backfill_context(fact.key, fact.context.as_deref(), source, options),
        })
        .collect()
}

/// Reconcile → normalize → backfill → assemble.
///
/// Fails only when there are no candidate facts at all; that means the
/// extraction produced nothing worth normalizing.
pub fn process_document(
    source_text: &str,
    candidates: Vec<CandidateFact>,
    options: &BackfillOptions,
) -> Result<Vec<NormalizedRow>, AppError> {
    if candidates.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "Extraction returned no facts for this document".to_string(),
        ));
    }

    let candidate_count = candidates.len();
    let facts = reconcile(candidates);
    let rows = assemble_rows(facts, SourceText::new(source_text), options);

    info!(
        "Assembled {} rows from {} candidate facts",
        rows.len(),
        candidate_count
    );
    Ok(rows)
}
