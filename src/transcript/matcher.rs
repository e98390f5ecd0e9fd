//! Quote matching against transcript fragments.
//!
//! A quote is compared with every window of 1 to 4 consecutive fragments.
//! The first window (earliest start, then shortest) that contains the quote
//! verbatim wins immediately. Otherwise the window with the highest word
//! overlap is accepted if its score reaches the threshold.

use super::TranscriptFragment;
use std::collections::HashSet;

/// Default overlap threshold for [`find_quote`].
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.5;

/// Largest number of consecutive fragments joined into one window.
const MAX_WINDOW: usize = 4;

/// Find the fragment a quote most plausibly came from.
///
/// Returns the first fragment of the matching window, or `None` when no
/// window contains the quote and the best overlap is below `threshold`.
///
/// An empty quote is a substring of every window and therefore matches the
/// very first fragment.
pub fn find_quote<'a>(
    quote: &str,
    fragments: &'a [TranscriptFragment],
    threshold: f64,
) -> Option<&'a TranscriptFragment> {
    let quote = quote.trim().to_lowercase();
    let quote_words: HashSet<&str> = quote.split_whitespace().collect();

    let mut best: Option<&TranscriptFragment> = None;
    let mut best_score = 0.0;

    for start in 0..fragments.len() {
        let max_len = MAX_WINDOW.min(fragments.len() - start);

        for len in 1..=max_len {
            let window = &fragments[start..start + len];
            let combined = window
                .iter()
                .map(|f| f.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();

            if combined.contains(quote.as_str()) {
                return Some(&window[0]);
            }

            if quote_words.is_empty() {
                continue;
            }

            let window_words: HashSet<&str> = combined.split_whitespace().collect();
            let shared = quote_words.intersection(&window_words).count();
            let score = shared as f64 / quote_words.len() as f64;

            if score > best_score {
                best_score = score;
                best = Some(&window[0]);
            }
        }
    }

    if best_score >= threshold {
        best
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<TranscriptFragment> {
        vec![
            TranscriptFragment::new("hello world this is a test", 0.0, 5.0),
            TranscriptFragment::new("the quick brown fox jumps", 5.0, 5.0),
            TranscriptFragment::new("over the lazy dog today", 10.0, 5.0),
            TranscriptFragment::new("and that is all folks", 15.0, 5.0),
        ]
    }

    #[test]
    fn test_exact_match() {
        let fragments = sample();
        let found = find_quote("hello world this is a test", &fragments, 0.5).unwrap();
        assert_eq!(found.start, 0.0);
    }

    #[test]
    fn test_two_fragment_scenario() {
        let fragments = vec![
            TranscriptFragment::new("hello world this is a test", 0.0, 5.0),
            TranscriptFragment::new("the quick brown fox jumps", 5.0, 5.0),
        ];
        let found = find_quote("hello world this is a test", &fragments, 0.5).unwrap();
        assert_eq!(found.start, 0.0);
    }

    #[test]
    fn test_earliest_window_wins_over_tighter_match() {
        let fragments = sample();
        // The 2-fragment window starting at 0.0 already contains the quote.
        let found = find_quote("quick brown fox", &fragments, 0.5).unwrap();
        assert_eq!(found.start, 0.0);
    }

    #[test]
    fn test_match_beyond_first_windows() {
        let fragments: Vec<TranscriptFragment> = (0..8)
            .map(|i| TranscriptFragment::new(format!("line number {}", i), i as f64 * 10.0, 10.0))
            .collect();

        // Fragment 6 is first reachable from the 4-fragment window starting at 3.
        let found = find_quote("line number 6", &fragments, 0.5).unwrap();
        assert_eq!(found.start, 30.0);
    }

    #[test]
    fn test_match_spanning_fragments_returns_window_start() {
        let fragments = sample();
        let found = find_quote("brown fox jumps over the lazy", &fragments, 0.5).unwrap();
        assert_eq!(found.start, 0.0);

        let tail = &fragments[1..];
        let found = find_quote("fox jumps over the lazy", tail, 0.5).unwrap();
        assert_eq!(found.start, 5.0);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let fragments = sample();
        let found = find_quote("  The LAZY dog  ", &fragments[2..], 0.5).unwrap();
        assert_eq!(found.start, 10.0);
    }

    #[test]
    fn test_first_match_wins() {
        let fragments = vec![
            TranscriptFragment::new("say it again", 0.0, 1.0),
            TranscriptFragment::new("filler", 1.0, 1.0),
            TranscriptFragment::new("say it again", 2.0, 1.0),
        ];
        let found = find_quote("say it again", &fragments, 0.5).unwrap();
        assert_eq!(found.start, 0.0);
    }

    #[test]
    fn test_word_overlap_above_threshold() {
        let fragments = sample();
        // 3 of 4 words, not contiguous. The window starting at 0.0 spanning
        // three fragments reaches that score first.
        let found = find_quote("lazy dog over yesterday", &fragments, 0.5).unwrap();
        assert_eq!(found.start, 0.0);

        let found = find_quote("lazy dog over yesterday", &fragments[2..], 0.5).unwrap();
        assert_eq!(found.start, 10.0);
    }

    #[test]
    fn test_overlap_below_threshold_not_found() {
        let fragments = sample();
        assert!(find_quote("completely unrelated words here", &fragments, 0.5).is_none());
    }

    #[test]
    fn test_looser_threshold_accepts_weaker_overlap() {
        let fragments = sample();
        let quote = "the cat sat on a mat";
        assert!(find_quote(quote, &fragments, 0.5).is_none());
        assert!(find_quote(quote, &fragments, 0.2).is_some());
    }

    #[test]
    fn test_empty_quote_matches_first_fragment() {
        let fragments = sample();
        let found = find_quote("", &fragments, 0.5).unwrap();
        assert_eq!(found.start, 0.0);
    }

    #[test]
    fn test_empty_transcript() {
        assert!(find_quote("anything", &[], 0.0).is_none());
    }

    #[test]
    fn test_single_fragment_transcript() {
        let fragments = vec![TranscriptFragment::new("only one line here", 3.0, 2.0)];
        let found = find_quote("one line", &fragments, 0.5).unwrap();
        assert_eq!(found.start, 3.0);
    }
}
