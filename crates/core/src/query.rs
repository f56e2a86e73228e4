//! URL query string codec for [`FilterState`].
//!
//! The query string is the durable form of the filters: it is what the
//! address bar shows, what `--query` accepts and what the MCP tools echo
//! back. Parameters:
//!
//! - `search`: name search term
//! - `consultation`: `Video Consult` or `In Clinic` (absent means all)
//! - `specialty`: repeated once per selected specialty
//! - `sort`: `fees` or `experience` (absent means source order)
//!
//! Encoding follows `application/x-www-form-urlencoded`, so spaces are
//! written as `+`.

use crate::filter::{ConsultationType, FilterState, SortKey};

pub const SEARCH_PARAM: &str = "search";
pub const CONSULTATION_PARAM: &str = "consultation";
pub const SPECIALTY_PARAM: &str = "specialty";
pub const SORT_PARAM: &str = "sort";

/// Splits a query string into decoded key/value pairs, in order.
///
/// A leading `?` is ignored, empty segments are skipped and a segment
/// without `=` reads as a key with an empty value.
pub fn parse_pairs(query: &str) -> Vec<(String, String)> {
    query
        .strip_prefix('?')
        .unwrap_or(query)
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((key, value)) => (decode_component(key), decode_component(value)),
            None => (decode_component(segment), String::new()),
        })
        .collect()
}

/// Reads filter state from a query string.
///
/// Absent parameters map to their empty defaults. When `search`,
/// `consultation` or `sort` repeat, the first occurrence wins. The
/// view-local specialty search term is always empty in the result.
pub fn decode(query: &str) -> FilterState {
    let mut state = FilterState::default();
    let mut seen_search = false;
    let mut seen_consultation = false;
    let mut seen_sort = false;

    for (key, value) in parse_pairs(query) {
        match key.as_str() {
            SEARCH_PARAM if !seen_search => {
                seen_search = true;
                state.search = value;
            }
            CONSULTATION_PARAM if !seen_consultation => {
                seen_consultation = true;
                state.consultation = ConsultationType::from_param(&value);
            }
            SPECIALTY_PARAM if !value.is_empty() => {
                state.specialties.insert(value);
            }
            SORT_PARAM if !seen_sort => {
                seen_sort = true;
                state.sort = SortKey::from_param(&value);
            }
            _ => {}
        }
    }

    state
}

/// Writes the non-empty filter fields as a query string (without `?`).
pub fn encode(state: &FilterState) -> String {
    let mut pairs: Vec<(&str, &str)> = Vec::new();

    if !state.search.is_empty() {
        pairs.push((SEARCH_PARAM, &state.search));
    }
    if state.consultation != ConsultationType::All {
        pairs.push((CONSULTATION_PARAM, state.consultation.as_param()));
    }
    for specialty in &state.specialties {
        pairs.push((SPECIALTY_PARAM, specialty));
    }
    if state.sort != SortKey::None {
        pairs.push((SORT_PARAM, state.sort.as_param()));
    }

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

fn decode_component(value: &str) -> String {
    let spaced = value.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        // Malformed UTF-8 escapes: keep the raw text rather than dropping it.
        Err(_) => spaced,
    }
}
