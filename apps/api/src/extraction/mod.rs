// External collaborators of the fact pipeline: the PDF text source and the
// extraction oracle. All LLM calls go through llm_client.

pub mod oracle;
pub mod pdf;
pub mod prompts;
