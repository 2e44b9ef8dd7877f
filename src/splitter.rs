//! Splits article text into the segments of a record chain
//!
//! The first segment is sized for the root record, every later segment for a
//! continuation record. Slicing is purely positional on character offsets;
//! segment boundaries may fall mid-word and are preserved exactly at
//! reassembly.

use crate::budget::{record_count, CHUNK_TEXT_MAX, ROOT_TEXT_MAX};

/// Split off the first `n` characters of `s` on a char boundary.
fn take_chars(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}

/// Split article text into ordered segments (first = root, rest = chunks).
///
/// Concatenating the returned segments reproduces `text` exactly, and the
/// segment count always equals [`record_count`] for the same length.
/// Deterministic: the same input always yields the same segments.
pub fn split_article_text(text: &str) -> Vec<String> {
    let total = text.chars().count();
    if total <= ROOT_TEXT_MAX {
        return vec![text.to_string()];
    }

    let mut segments = Vec::with_capacity(record_count(total));
    let (root, mut rest) = take_chars(text, ROOT_TEXT_MAX);
    segments.push(root.to_string());

    while !rest.is_empty() {
        let (chunk, tail) = take_chars(rest, CHUNK_TEXT_MAX);
        segments.push(chunk.to_string());
        rest = tail;
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_single_empty_segment() {
        assert_eq!(split_article_text(""), vec![String::new()]);
    }

    #[test]
    fn short_text_is_a_single_segment() {
        let text = "a short note";
        assert_eq!(split_article_text(text), vec![text.to_string()]);
    }

    #[test]
    fn root_boundary_exact_fit() {
        let text = "x".repeat(ROOT_TEXT_MAX);
        let segments = split_article_text(&text);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0], text);
    }

    #[test]
    fn one_char_over_root_budget_spills_a_single_char_chunk() {
        let text = "x".repeat(ROOT_TEXT_MAX + 1);
        let segments = split_article_text(&text);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].chars().count(), ROOT_TEXT_MAX);
        assert_eq!(segments[1].chars().count(), 1);
    }

    #[test]
    fn segments_obey_budgets_and_concatenate_exactly() {
        let text: String = ('a'..='z').cycle().take(5000).collect();
        let segments = split_article_text(&text);

        assert_eq!(segments.len(), record_count(5000));
        assert!(segments[0].chars().count() <= ROOT_TEXT_MAX);
        for chunk in &segments[1..] {
            assert!(chunk.chars().count() <= CHUNK_TEXT_MAX);
        }
        assert_eq!(segments.concat(), text);
    }

    #[test]
    fn segment_count_matches_record_count_for_all_small_lengths() {
        for len in 0..=(ROOT_TEXT_MAX + 3 * CHUNK_TEXT_MAX + 2) {
            let text = "y".repeat(len);
            assert_eq!(
                split_article_text(&text).len(),
                record_count(len),
                "length {len}"
            );
        }
    }

    #[test]
    fn splitting_is_deterministic() {
        let text: String = ('0'..='9').cycle().take(2500).collect();
        assert_eq!(split_article_text(&text), split_article_text(&text));
    }

    #[test]
    fn multibyte_text_never_splits_inside_a_code_point() {
        let text: String = "žluťoučký kůň úpěl ďábelské ódy "
            .chars()
            .cycle()
            .take(3000)
            .collect();
        let segments = split_article_text(&text);

        assert_eq!(segments.len(), record_count(3000));
        assert_eq!(segments[0].chars().count(), ROOT_TEXT_MAX);
        assert_eq!(segments.concat(), text);
    }
}
