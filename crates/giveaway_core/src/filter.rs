use crate::{FilterConfig, Listing};

/// Decides whether a parsed listing is worth an entry attempt.
///
/// Each rule is independent: faded rows are never entered, pinned rows only
/// when the config allows it, and any ignore word found in the name (case
/// insensitive) excludes the listing. Ignore words are lowercase already,
/// see [`FilterConfig::new`].
pub fn is_eligible(listing: &Listing, config: &FilterConfig) -> bool {
    if listing.is_faded {
        return false;
    }
    if listing.is_pinned && !config.enter_pinned {
        return false;
    }
    let name = listing.name.to_lowercase();
    !config
        .ignored_words
        .iter()
        .filter(|word| !word.is_empty())
        .any(|word| name.contains(word.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Variant;

    fn config(enter_pinned: bool, words: &[&str]) -> FilterConfig {
        FilterConfig::new(Variant::All, enter_pinned, 0, words.iter().copied())
    }

    #[test]
    fn faded_is_always_excluded() {
        let listing = Listing::new("a", "Portal", 10).faded().pinned();
        assert!(!is_eligible(&listing, &config(true, &[])));
        assert!(!is_eligible(&listing, &config(false, &[])));
    }

    #[test]
    fn pinned_needs_policy() {
        let listing = Listing::new("a", "Portal", 10).pinned();
        assert!(!is_eligible(&listing, &config(false, &[])));
        assert!(is_eligible(&listing, &config(true, &[])));
    }

    #[test]
    fn ignore_words_match_case_insensitively() {
        let listing = Listing::new("a", "Portal 2 Soundtrack", 10);
        assert!(!is_eligible(&listing, &config(false, &["SOUNDTRACK"])));
        assert!(!is_eligible(&listing, &config(false, &["tal 2"])));
        assert!(is_eligible(&listing, &config(false, &["demo"])));
    }

    #[test]
    fn raw_empty_ignore_word_matches_nothing() {
        let mut cfg = config(false, &[]);
        cfg.ignored_words.push(String::new());
        assert!(is_eligible(&Listing::new("a", "Portal", 10), &cfg));
    }
}
