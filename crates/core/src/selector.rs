//! Candidate selection.
//!
//! Picks the highest scoring submission that has not been posted before.

use crate::searcher::SearchEntry;

/// Select the entry to post from a batch of search results.
///
/// An entry is eligible when its id is not in `history`, its score reaches
/// `min_score`, and its score is at least the best score seen so far
/// (starting from 0). Each eligible entry replaces the previous pick, so
/// among equal scores the last one wins, and negative scores never qualify.
pub fn select_candidate<'a>(
    results: &'a [SearchEntry],
    history: &[String],
    min_score: f64,
) -> Option<&'a SearchEntry> {
    let mut picked = None;
    let mut best = 0.0;

    for entry in results {
        if entry.score >= best
            && entry.score >= min_score
            && !history.iter().any(|id| *id == entry.id)
        {
            best = entry.score;
            picked = Some(entry);
        }
    }

    picked
}
