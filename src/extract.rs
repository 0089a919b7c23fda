//! Pulls the vocabulary document out of the model's free-text reply.
//!
//! The model is told to answer with raw JSON, but in practice it wraps the
//! payload in a markdown fence. Only the first fenced block is considered and
//! everything around it is ignored.

use crate::error::ExtractionError;
use crate::vocabulary::VocabularyDocument;

pub const FENCE: &str = "```";

pub fn extract_vocabulary(reply: &str) -> Result<VocabularyDocument, ExtractionError> {
    let body = fenced_body(reply).ok_or(ExtractionError::MissingFence)?;

    // Parse twice so a syntax error and a shape error stay distinguishable.
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(ExtractionError::InvalidJson)?;
    serde_json::from_value(value).map_err(ExtractionError::SchemaMismatch)
}

/// Second segment of the reply split on the fence, with any info string removed.
/// A reply needs an opening and a closing fence.
fn fenced_body(reply: &str) -> Option<&str> {
    let mut segments = reply.split(FENCE);
    segments.next()?;
    let body = segments.next()?;
    segments.next()?;
    Some(strip_info_string(body))
}

fn strip_info_string(body: &str) -> &str {
    match body.split_once('\n') {
        Some((first_line, rest)) if is_info_string(first_line) => rest,
        _ => body,
    }
}

fn is_info_string(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty()
        && line
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
}
