/// Text rendering of plain data objects

use serde_json::{Map, Value};
use std::fmt::{self, Write};

/// Longest pretty-printed rendering kept before truncating
pub const MAX_RENDERED_CHARS: usize = 2000;
/// Longest fallback rendering kept before truncating
pub const MAX_FALLBACK_CHARS: usize = 500;
/// Appended to any rendering that was cut short
pub const TRUNCATION_MARKER: &str = "\n... [truncated]";
/// Used when an object cannot be rendered at all
pub const UNRENDERABLE_PLACEHOLDER: &str = "[unrenderable object]";

/// Human-readable rendering of an object
///
/// Pretty JSON when possible, otherwise its debug form.
///
/// `serde_json` cannot fail on a `Map` with string keys today, so the
/// fallback only guards against that changing.
pub fn render_object(map: &Map<String, Value>) -> String {
    match serde_json::to_string_pretty(map) {
        Ok(rendered) => truncate_chars(&rendered, MAX_RENDERED_CHARS),
        Err(e) => {
            tracing::debug!("Falling back to debug rendering: {}", e);
            render_debug(map)
        }
    }
}

/// Debug form of `value`, cut at the fallback limit
pub(crate) fn render_debug<T: fmt::Debug + ?Sized>(value: &T) -> String {
    let mut fallback = String::new();
    match write!(fallback, "{:?}", value) {
        Ok(()) => truncate_chars(&fallback, MAX_FALLBACK_CHARS),
        Err(_) => UNRENDERABLE_PLACEHOLDER.to_string(),
    }
}

/// Cut `text` to at most `limit` characters, marking the cut
pub(crate) fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => format!("{}{}", &text[..byte_index], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}
