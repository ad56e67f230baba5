//! Upstream text and date normalization shared by the news clients

use chrono::{DateTime, NaiveDate};

use newsrelay_core::kst;

/// Strip HTML tags from text
///
/// Upstream titles and descriptions arrive with markup such as `<b>`
/// highlights. Idempotent: text without tags passes through unchanged.
pub fn strip_tags(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize an upstream publication timestamp to the local civil date.
///
/// Both Naver (`Mon, 26 Sep 2016 07:50:00 +0900`) and Google News
/// (`Wed, 05 Feb 2025 10:00:00 GMT`) publish RFC 2822 timestamps; either is
/// converted to its +09:00 civil date. An absent or unparsable value falls
/// back to `today`, never an error.
pub fn normalize_pub_date(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    raw.and_then(|value| DateTime::parse_from_rfc2822(value.trim()).ok())
        .map(|dt| dt.with_timezone(&kst()).date_naive())
        .unwrap_or(today)
}
