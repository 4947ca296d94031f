//! Token-set name similarity on a 0..=100 scale.
//!
//! Both names are lowercased, stripped of punctuation and split on
//! whitespace. The shared tokens form a common prefix; the score is the best
//! edit-distance ratio among (shared, shared+rest_a, shared+rest_b). A name
//! whose tokens are a subset of the other's therefore scores 100, and token
//! order never matters.

use std::collections::BTreeSet;

/// Lowercase, replace non-alphanumerics with spaces, collapse whitespace.
pub fn normalize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Plain edit-distance ratio between two already-normalized strings.
pub fn ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    (strsim::normalized_levenshtein(a, b) * 100.0).round() as u8
}

pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let a = normalize_name(a);
    let b = normalize_name(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let tokens_a: BTreeSet<&str> = a.split(' ').collect();
    let tokens_b: BTreeSet<&str> = b.split(' ').collect();

    let shared = join(tokens_a.intersection(&tokens_b));
    let rest_a = join(tokens_a.difference(&tokens_b));
    let rest_b = join(tokens_b.difference(&tokens_a));

    let combined_a = concat(&shared, &rest_a);
    let combined_b = concat(&shared, &rest_b);

    ratio(&shared, &combined_a)
        .max(ratio(&shared, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

fn join<S: AsRef<str>>(tokens: impl Iterator<Item = S>) -> String {
    tokens
        .map(|t| t.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn concat(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (false, true) => head.to_string(),
        (false, false) => format!("{head} {tail}"),
    }
}
