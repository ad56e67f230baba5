//! Relevance ranking for commercial news candidates
//!
//! Naver's own relevance sort considers the full document; this ranker
//! re-scores candidates against only the title and summary the caller will
//! actually see, so the top results visibly contain the keyword.

use std::cmp::Reverse;

use newsrelay_core::Article;

/// A scored candidate, transient between fetch and top-K selection
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub score: u32,
    pub article: Article,
}

/// Score a candidate by keyword occurrence, title weighted double.
///
/// Case-sensitive, non-overlapping substring counting. An empty term
/// always scores 0.
pub fn relevance_score(term: &str, title: &str, description: &str) -> u32 {
    let term = term.trim();
    if term.is_empty() {
        return 0;
    }
    2 * count_occurrences(title, term) + count_occurrences(description, term)
}

fn count_occurrences(haystack: &str, needle: &str) -> u32 {
    haystack.matches(needle).count() as u32
}

/// Order candidates by descending score and keep the top `limit`.
///
/// The sort is stable: candidates with equal scores retain upstream
/// relative order. With `rank` off the upstream order is preserved and
/// candidates are only truncated.
pub fn select_top(mut candidates: Vec<RankedCandidate>, limit: usize, rank: bool) -> Vec<Article> {
    if rank {
        candidates.sort_by_key(|candidate| Reverse(candidate.score));
    }
    candidates.truncate(limit);
    candidates.into_iter().map(|c| c.article).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            link: format!("https://news.example.com/{}", title.len()),
            published_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            source_keyword: None,
        }
    }

    #[test]
    fn test_title_weighted_double() {
        assert_eq!(relevance_score("AI", "AI policy AI", "new AI rules"), 5);
    }

    #[test]
    fn test_empty_term_scores_zero() {
        assert_eq!(relevance_score("", "AI policy", "AI rules"), 0);
        assert_eq!(relevance_score("  ", "AI policy", "AI rules"), 0);
    }

    #[test]
    fn test_counting_is_case_sensitive() {
        assert_eq!(relevance_score("ai", "AI policy", "AI rules"), 0);
    }

    #[test]
    fn test_select_top_orders_by_score() {
        let candidates = vec![
            RankedCandidate { score: 1, article: article("low") },
            RankedCandidate { score: 5, article: article("high") },
            RankedCandidate { score: 3, article: article("mid") },
        ];
        let selected = select_top(candidates, 2, true);
        assert_eq!(selected[0].title, "high");
        assert_eq!(selected[1].title, "mid");
    }

    #[test]
    fn test_equal_scores_keep_upstream_order() {
        let candidates = vec![
            RankedCandidate { score: 2, article: article("first") },
            RankedCandidate { score: 2, article: article("second") },
            RankedCandidate { score: 2, article: article("third") },
        ];
        let selected = select_top(candidates, 3, true);
        let titles: Vec<&str> = selected.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_ranking_off_truncates_in_upstream_order() {
        let candidates = vec![
            RankedCandidate { score: 0, article: article("a") },
            RankedCandidate { score: 0, article: article("b") },
            RankedCandidate { score: 0, article: article("c") },
        ];
        let selected = select_top(candidates, 2, false);
        let titles: Vec<&str> = selected.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }
}
