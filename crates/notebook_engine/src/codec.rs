//! Page payload encoding: a JSON array of strokes, or the empty string for a blank page.
use notebook_core::Stroke;

use crate::{ClientError, Page};

pub fn encode_strokes(strokes: &[Stroke]) -> Result<String, ClientError> {
    if strokes.is_empty() {
        return Ok(String::new());
    }
    serde_json::to_string(strokes).map_err(|err| ClientError::MalformedPayload(err.to_string()))
}

pub fn decode_strokes(data: &str) -> Result<Vec<Stroke>, ClientError> {
    let data = data.trim();
    if data.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(data).map_err(|err| ClientError::MalformedPayload(err.to_string()))
}

/// Strokes stored in a loaded page; empty pages decode to no strokes.
pub fn page_strokes(page: &Page) -> Result<Vec<Stroke>, ClientError> {
    match page.data.as_deref() {
        Some(data) if !page.empty => decode_strokes(data),
        _ => Ok(Vec::new()),
    }
}
