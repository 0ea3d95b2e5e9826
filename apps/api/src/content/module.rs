//! The textual data module committed to the site repository.
//!
//! The site imports `resumeData` from a TypeScript module whose body is a
//! pretty-printed JSON object, so rendering is a thin wrapper around
//! `serde_json::to_string_pretty` and parsing strips the same wrapper.

use thiserror::Error;

use crate::models::resume::ResumeRecord;

const MODULE_PREFIX: &str = "export const resumeData = ";

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("Resume data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Renders the record as `export const resumeData = {...};`.
pub fn render_module(record: &ResumeRecord) -> Result<String, ModuleError> {
    let json = serde_json::to_string_pretty(record)?;
    Ok(format!("{MODULE_PREFIX}{json};"))
}

/// Parses either a rendered module or bare JSON back into a record.
pub fn parse_module(text: &str) -> Result<ResumeRecord, ModuleError> {
    let body = text.trim();
    let body = body
        .strip_prefix(MODULE_PREFIX.trim_end())
        .unwrap_or(body)
        .trim();
    let body = body.strip_suffix(';').unwrap_or(body);
    Ok(serde_json::from_str(body)?)
}
