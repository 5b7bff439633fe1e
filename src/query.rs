//! Query-string assembly for Grist endpoints.
//!
//! Values are expected to be pre-serialized strings. They are joined as-is
//! and never percent-encoded.

use std::collections::BTreeMap;

/// Query parameters keyed by name.
///
/// The map is ordered, so the emitted string is stable, but callers and
/// servers must only rely on which parameters are present.
pub type QueryParams = BTreeMap<String, String>;

/// Build `?k=v&k2=v2` from `params`.
///
/// Entries with an empty value are dropped entirely. An empty map, or one
/// whose values are all empty, yields `""`.
///
/// Values are not escaped. A value containing `&`, `#` or `=` (a filter on
/// such text, say) splits or truncates the query the server sees.
///
/// # Examples
///
/// ```rust
/// use gristctl::query::{QueryParams, build_query};
///
/// let mut params = QueryParams::new();
/// params.insert("limit".to_string(), String::new());
/// params.insert("sort".to_string(), "name".to_string());
/// assert_eq!(build_query(&params), "?sort=name");
/// ```
pub fn build_query(params: &QueryParams) -> String {
    let parts: Vec<String> = params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();

    if parts.is_empty() {
        String::new()
    } else {
        format!("?{}", parts.join("&"))
    }
}

/// Insert `"true"` under `key` when `flag` is set.
pub(crate) fn insert_flag(params: &mut QueryParams, key: &str, flag: bool) {
    if flag {
        params.insert(key.to_string(), "true".to_string());
    }
}
