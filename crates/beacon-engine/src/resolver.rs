//! Omnibox input matching.
//!
//! Matching is case-sensitive throughout. The disambiguation order in
//! [`best_alias`] is the usability contract of the whole system: an exact
//! code always wins, a unique prefix acts as its own code, and anything
//! ambiguous resolves to nothing rather than navigating somewhere
//! unintended.

use beacon_store::Alias;

/// The alias whose code equals `text` exactly, if any.
pub fn exact_match<'a>(aliases: &'a [Alias], text: &str) -> Option<&'a Alias> {
    aliases.iter().find(|alias| alias.code == text)
}

/// All aliases whose code starts with `text`, in relative order.
pub fn completions<'a>(aliases: &'a [Alias], text: &str) -> Vec<&'a Alias> {
    aliases
        .iter()
        .filter(|alias| alias.code.starts_with(text))
        .collect()
}

/// The alias `text` should resolve to at submission time.
///
/// An exact match wins outright, regardless of how many other codes share
/// `text` as a prefix. Otherwise a single prefix completion is selected.
/// Zero or multiple completions resolve to `None`.
pub fn best_alias<'a>(aliases: &'a [Alias], text: &str) -> Option<&'a Alias> {
    if let Some(alias) = exact_match(aliases, text) {
        return Some(alias);
    }
    match completions(aliases, text).as_slice() {
        [only] => Some(only),
        _ => None,
    }
}
