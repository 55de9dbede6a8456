//! Extraction oracle: the external fact extractor behind a trait.
//!
//! Default: `ClaudeOracle`. `AppState` holds an `Arc<dyn ExtractionOracle>`,
//! so handlers never depend on a concrete backend.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::extraction::prompts::{build_system_prompt, GuidanceExample, EXTRACTION_USER_PROMPT};
use crate::facts::models::{OracleFacts, RawFact};
use crate::facts::schema::SchemaKey;
use crate::llm_client::{LlmClient, LlmError};

#[derive(Debug, Error)]
pub enum OracleError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Malformed oracle reply: {0}")]
    MalformedReply(String),
}

/// Everything the oracle is given for one document.
#[derive(Debug, Clone, Copy)]
pub struct OracleRequest<'a> {
    pub document_text: &'a str,
    pub keys: &'a [SchemaKey],
    pub guidance: &'a [GuidanceExample],
}

#[async_trait]
pub trait ExtractionOracle: Send + Sync {
    /// Proposes `(key, value, context)` facts for the document. Keys are not
    /// validated here; that happens at ingestion.
    async fn extract(&self, request: OracleRequest<'_>) -> Result<Vec<RawFact>, OracleError>;
}

/// Oracle backed by a single Claude call with structured JSON output.
pub struct ClaudeOracle {
    llm: LlmClient,
}

impl ClaudeOracle {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ExtractionOracle for ClaudeOracle {
    async fn extract(&self, request: OracleRequest<'_>) -> Result<Vec<RawFact>, OracleError> {
        let system = build_system_prompt(request.document_text, request.keys, request.guidance);
        let reply: Value = self
            .llm
            .complete_json(&system, EXTRACTION_USER_PROMPT)
            .await?;
        let response = parse_reply(reply)?;

        info!(
            "Oracle ({}) proposed {} facts for {} schema keys",
            self.llm.model(),
            response.facts.len(),
            request.keys.len()
        );
        Ok(response.facts)
    }
}

/// The reply must be an object carrying a `facts` array. Individual facts are
/// read leniently; their keys are checked later.
fn parse_reply(reply: Value) -> Result<OracleFacts, OracleError> {
    if !reply.get("facts").is_some_and(Value::is_array) {
        return Err(OracleError::MalformedReply(
            "expected an object with a 'facts' array".to_string(),
        ));
    }
    serde_json::from_value(reply).map_err(|e| OracleError::MalformedReply(e.to_string()))
}
