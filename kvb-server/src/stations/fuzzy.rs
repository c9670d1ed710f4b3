//! Token-set similarity scoring.
//!
//! Word-order-insensitive fuzzy matching: both strings are split into
//! word sets, and the score is the best pairwise ratio between the
//! intersection and each full set. Matches the behavior of the common
//! "token set ratio" found in fuzzy-matching libraries, with
//! `strsim`'s normalized Levenshtein distance as the ratio primitive.

use std::collections::BTreeSet;

/// Similarity score between two strings, 0–100.
///
/// Case-insensitive and independent of word order: `"markt porz"` and
/// `"Porz Markt"` score 100.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let tokens_a = tokens(a);
    let tokens_b = tokens(b);

    // Blank input matches nothing.
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let intersection = join(tokens_a.intersection(&tokens_b));
    let diff_a = join(tokens_a.difference(&tokens_b));
    let diff_b = join(tokens_b.difference(&tokens_a));

    let combined_a = combine(&intersection, &diff_a);
    let combined_b = combine(&intersection, &diff_b);

    ratio(&intersection, &combined_a)
        .max(ratio(&intersection, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

fn tokens(s: &str) -> BTreeSet<String> {
    s.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn join<'a>(words: impl Iterator<Item = &'a String>) -> String {
    words.cloned().collect::<Vec<_>>().join(" ")
}

fn combine(base: &str, rest: &str) -> String {
    if base.is_empty() {
        rest.to_string()
    } else if rest.is_empty() {
        base.to_string()
    } else {
        format!("{base} {rest}")
    }
}

fn ratio(a: &str, b: &str) -> u8 {
    (strsim::normalized_levenshtein(a, b) * 100.0).round() as u8
}
