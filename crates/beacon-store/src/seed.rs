//! Starter aliases for first runs.

use crate::{Alias, AliasCreate};

/// A small starter set of aliases, each assigned a fresh id.
pub fn example_aliases() -> Vec<Alias> {
    [
        ("gh", "https://github.com", "GitHub"),
        ("hn", "https://news.ycombinator.com", "HackerNews"),
        ("mdn", "https://developer.mozilla.org", "MDN"),
        ("wiki", "https://en.wikipedia.org", "Wikipedia"),
        ("arch", "https://archlinux.org", "Arch Linux"),
    ]
    .into_iter()
    .map(|(code, link, note)| {
        Alias::new(AliasCreate {
            code: code.to_string(),
            link: link.to_string(),
            note: note.to_string(),
        })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn example_aliases_have_unique_codes_and_ids() {
        let aliases = example_aliases();
        let codes: HashSet<_> = aliases.iter().map(|a| a.code.as_str()).collect();
        let ids: HashSet<_> = aliases.iter().map(|a| a.id.as_str()).collect();

        assert_eq!(codes.len(), aliases.len());
        assert_eq!(ids.len(), aliases.len());
    }
}
