//! `document.cookie` codec for the remembered decision.

use tracing::warn;

use crate::config::COOKIE_NAME;
use crate::types::PersistedChoice;

/// Assignment that expires the decision cookie immediately.
pub const EXPIRE_ASSIGNMENT: &str = "is_of_age=; expires=Thu, 01 Jan 1970 00:00:00 GMT";

/// Find `name` in a `k=v; k2=v2` cookie header. The last match wins; entries
/// without `=` are skipped.
pub fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .filter(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
        .last()
}

/// Decode a cookie value. Anything other than `true`/`false` counts as absent.
pub fn decode_choice(value: &str) -> Option<PersistedChoice> {
    match value {
        "true" => Some(PersistedChoice::new(true)),
        "false" => Some(PersistedChoice::new(false)),
        "" => None,
        other => {
            warn!(cookie = COOKIE_NAME, value = other, "Ignoring unrecognised cookie value");
            None
        }
    }
}

/// Read the persisted choice out of a full cookie header.
pub fn choice_from_header(header: &str) -> Option<PersistedChoice> {
    find_cookie(header, COOKIE_NAME).and_then(decode_choice)
}

pub fn encode_value(choice: &PersistedChoice) -> &'static str {
    if choice.decision().is_eligible() {
        "true"
    } else {
        "false"
    }
}

/// Cookie assignment string (`is_of_age=true`), browser-default path and expiry.
pub fn encode_assignment(choice: &PersistedChoice) -> String {
    format!("{}={}", COOKIE_NAME, encode_value(choice))
}

/// Split a `document.cookie` assignment into name, value, and whether its
/// attributes expire it. Only the `expires` and `max-age` attributes are
/// looked at.
pub fn parse_assignment(assignment: &str) -> Option<(String, String, bool)> {
    let mut parts = assignment.split(';');
    let (name, value) = parts.next()?.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let expired = parts.any(|attr| {
        let (key, val) = attr.split_once('=').unwrap_or((attr, ""));
        match key.trim().to_ascii_lowercase().as_str() {
            "max-age" => val.trim().parse::<i64>().map(|s| s <= 0).unwrap_or(false),
            "expires" => val.contains("1970"),
            _ => false,
        }
    });

    Some((name.to_string(), value.trim().to_string(), expired))
}
