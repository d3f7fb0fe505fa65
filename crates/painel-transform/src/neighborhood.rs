//! Neighborhood extraction from free-text addresses.
//!
//! Addresses in the rosters follow the municipal registry convention
//! `<street>, <number> - <neighborhood>, Porto Alegre - RS`, sometimes with a
//! point-of-reference prefix ending in a period. Only addresses carrying the
//! fixed `Porto Alegre - RS` suffix can yield a neighborhood.

use std::sync::LazyLock;

use painel_model::UNKNOWN_NEIGHBORHOOD;
use regex::Regex;

/// `. <neighborhood>, Porto Alegre - RS`, tried first.
static DOT_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.\s([^.,-]+), Porto Alegre - RS").expect("valid dot-prefix address pattern")
});

/// ` - <neighborhood>, Porto Alegre - RS`.
static HYPHEN_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" - ([^.,]+), Porto Alegre - RS").expect("valid hyphen address pattern")
});

fn capture(rule: &Regex, address: &str) -> Option<String> {
    let captured = rule.captures(address)?.get(1)?.as_str().trim();
    if captured.is_empty() {
        None
    } else {
        Some(captured.to_string())
    }
}

/// Extract the neighborhood from an address, or `"Unknown"`.
///
/// The dot rule takes priority over the hyphen rule. A missing or blank
/// address, or one neither rule matches, yields [`UNKNOWN_NEIGHBORHOOD`].
/// The result is never empty.
pub fn extract_neighborhood(address: Option<&str>) -> String {
    let Some(address) = address.filter(|value| !value.trim().is_empty()) else {
        return UNKNOWN_NEIGHBORHOOD.to_string();
    };
    capture(&DOT_RULE, address)
        .or_else(|| capture(&HYPHEN_RULE, address))
        .unwrap_or_else(|| UNKNOWN_NEIGHBORHOOD.to_string())
}
