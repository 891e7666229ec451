//! Form/query-string encoding helpers.
//!
//! Percent-encoding comes from `urlencoding`; spaces are written as `+` the
//! way `application/x-www-form-urlencoded` bodies carry them.

#[cfg(test)]
#[path = "query_string_test.rs"]
mod query_string_test;

/// Percent-encode one key or value using form encoding (space becomes `+`).
pub fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw).replace("%20", "+")
}

/// Serialize ordered pairs as `k=v&k2=v2`.
pub fn encode_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", encode_component(k.as_ref()), encode_component(v.as_ref())))
        .collect::<Vec<_>>()
        .join("&")
}

/// Append encoded pairs to `base`, respecting an existing `?`.
pub fn with_query<K, V>(base: &str, pairs: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let query = encode_pairs(pairs);
    if query.is_empty() {
        return base.to_owned();
    }
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{query}")
}

/// Set `key` to `value`, replacing every earlier occurrence.
///
/// The surviving entry keeps the position of the first occurrence, matching
/// `URLSearchParams.set`.
pub fn set_pair(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    let mut seen = false;
    pairs.retain_mut(|(k, v)| {
        if k != key {
            return true;
        }
        if seen {
            return false;
        }
        seen = true;
        value.clone_into(v);
        true
    });
    if !seen {
        pairs.push((key.to_owned(), value.to_owned()));
    }
}
