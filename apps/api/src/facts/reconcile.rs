//! Coverage Reconciler: turns whatever the oracle returned into exactly one
//! fact per schema key, in canonical order.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{debug, warn};

use crate::facts::models::{CandidateFact, RawFact};
use crate::facts::schema::{keys, SchemaKey};

/// Validates raw oracle facts against the schema. Facts naming an unknown key
/// are dropped one by one; the rest of the run continues.
pub fn ingest(raw: Vec<RawFact>) -> Vec<CandidateFact> {
    raw.into_iter()
        .filter_map(|fact| match fact.key.trim().parse::<SchemaKey>() {
            Ok(key) => Some(CandidateFact::new(key, fact.value, fact.context)),
            Err(e) => {
                warn!("Dropping fact outside the schema: {e}");
                None
            }
        })
        .collect()
}

/// Returns one fact per schema key in canonical order.
///
/// The first fact seen for a key wins; later duplicates are discarded, not
/// merged. Keys with no fact get an empty placeholder. Never fails, even for
/// an empty input.
pub fn reconcile<I>(candidates: I) -> Vec<CandidateFact>
where
    I: IntoIterator<Item = CandidateFact>,
{
    let mut first_seen: HashMap<SchemaKey, CandidateFact> = HashMap::new();

    for fact in candidates {
        match first_seen.entry(fact.key) {
            Entry::Vacant(slot) => {
                slot.insert(fact);
            }
            Entry::Occupied(_) => {
                debug!("Discarding duplicate fact for '{}'", fact.key);
            }
        }
    }

    keys()
        .iter()
        .map(|key| {
            first_seen
                .remove(key)
                .unwrap_or_else(|| CandidateFact::empty(*key))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::schema::KEY_COUNT;

    fn raw(key: &str, value: &str) -> RawFact {
        RawFact {
            key: key.to_string(),
            value: value.to_string(),
            context: None,
        }
    }

    #[test]
    fn test_empty_input_yields_37_empty_facts() {
        let facts = reconcile(Vec::new());
        assert_eq!(facts.len(), KEY_COUNT);
        for (fact, key) in facts.iter().zip(keys()) {
            assert_eq!(fact.key, *key);
            assert_eq!(fact.value, "");
            assert_eq!(fact.context.as_deref(), Some(""));
        }
    }

    #[test]
    fn test_output_follows_schema_order_regardless_of_input_order() {
        let facts = reconcile(vec![
            CandidateFact::new(SchemaKey::TechnicalProficiency, "", None),
            CandidateFact::new(SchemaKey::Age, "35", None),
            CandidateFact::new(SchemaKey::FirstName, "Vijay", None),
        ]);
        assert_eq!(facts.len(), KEY_COUNT);
        assert_eq!(facts[0].value, "Vijay");
        assert_eq!(facts[5].key, SchemaKey::Age);
        assert_eq!(facts[5].value, "35");
        assert_eq!(facts[36].key, SchemaKey::TechnicalProficiency);
    }

    #[test]
    fn test_first_fact_wins_on_duplicates() {
        let facts = reconcile(vec![
            CandidateFact::new(SchemaKey::LastName, "Kumar", Some("first".into())),
            CandidateFact::new(SchemaKey::LastName, "Sharma", Some("second".into())),
        ]);
        let last = &facts[SchemaKey::LastName.index() - 1];
        assert_eq!(last.value, "Kumar");
        assert_eq!(last.context.as_deref(), Some("first"));
        assert_eq!(
            facts.iter().filter(|f| f.key == SchemaKey::LastName).count(),
            1
        );
    }

    #[test]
    fn test_ingest_drops_unknown_keys_only() {
        let candidates = ingest(vec![
            raw("First Name", "Vijay"),
            raw("Favourite Colour", "Blue"),
            raw(" Age ", "35"),
        ]);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].key, SchemaKey::FirstName);
        assert_eq!(candidates[1].key, SchemaKey::Age);

        let facts = reconcile(candidates);
        assert_eq!(facts.len(), KEY_COUNT);
    }
}
