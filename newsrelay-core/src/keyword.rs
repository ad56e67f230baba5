//! Keyword parsing and extraction

use std::collections::HashMap;

/// Stop words excluded from frequency extraction: Korean particles,
/// demonstratives, conjunctions, and auxiliary verbs.
const STOP_WORDS: &[&str] = &[
    "은", "는", "이", "가", "을", "를", "의", "에", "와", "과", "도", "로", "으로",
    "에서", "에게", "한테", "께", "더", "만", "까지", "부터", "조차", "마저",
    "그", "그것", "이것", "저것", "그런", "이런", "저런", "그렇게", "이렇게", "저렇게",
    "그리고", "또한", "또", "그러나", "하지만", "그런데", "그래서", "그러므로",
    "있다", "없다", "되다", "하다", "이다", "아니다", "같다", "다르다",
];

/// Split raw search input into individual terms.
///
/// Terms are separated by commas and/or newlines, mixed arbitrarily.
/// Each segment is trimmed; blank segments are dropped; relative order
/// and duplicates are preserved. Empty input yields an empty list, which
/// callers must treat as a validation failure.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(|c| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract the most frequent meaningful words from free text.
///
/// Punctuation is treated as whitespace, stop words and single-character
/// words are dropped, and the top `top_n` words by occurrence count are
/// returned. Ties keep first-appearance order.
pub fn extract_keywords(text: &str, top_n: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for word in text.split(|c: char| !(c.is_alphanumeric() || c == '_')) {
        if word.chars().count() < 2 || STOP_WORDS.contains(&word) {
            continue;
        }
        let entry = counts.entry(word).or_insert(0);
        if *entry == 0 {
            order.push(word);
        }
        *entry += 1;
    }

    let mut ranked: Vec<&str> = order;
    ranked.sort_by_key(|word| std::cmp::Reverse(counts[word]));
    ranked.into_iter().take(top_n).map(str::to_string).collect()
}
