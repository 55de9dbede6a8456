//! Value Normalizer: `(key, raw value) -> formatted value`.
//!
//! Pure and idempotent: normalizing an already-normalized value returns it
//! unchanged. Nothing here fails; unreadable input falls back to the trimmed
//! original string.

pub mod dates;
pub mod numeric;
pub mod scores;
pub mod text;

use crate::facts::schema::{KeyFamily, SchemaKey};

pub use dates::canonicalize_date;
pub use numeric::{clean_numeric, looks_numeric};
pub use scores::canonicalize_score;
pub use text::apply_text_fixes;

/// Dispatches on the key's family: date, then score, then numeric, then
/// free text. A free-text key whose value is a plain number is cleaned as a
/// number.
pub fn normalize_value(key: SchemaKey, raw: &str) -> String {
    match key.family() {
        KeyFamily::Date => canonicalize_date(raw),
        KeyFamily::Score => canonicalize_score(raw),
        KeyFamily::Numeric => clean_numeric(key, raw),
        KeyFamily::FreeText if looks_numeric(raw) => clean_numeric(key, raw),
        KeyFamily::FreeText => apply_text_fixes(key, raw),
    }
}
