//! Credential redaction for error messages and log lines
//!
//! Upstream error bodies can echo the request URL back, which leaks API
//! keys and webhook paths into diagnostics. Every error message built from
//! upstream text must pass through [`redact`] before it is logged or
//! surfaced to a caller.

use regex::Regex;

const MASK: &str = "[redacted]";

/// Mask credential-bearing substrings in diagnostic text.
///
/// Covers keyed query parameters (`key=`, `cx=`, `client_secret=`), the
/// Naver secret header, and Slack webhook path segments. Redaction never
/// fails; a pattern that does not compile is skipped.
pub fn redact(text: &str) -> String {
    let rules: [(&str, String); 5] = [
        (r#"(?i)\b(key=)[^&\s"']+"#, format!("${{1}}{MASK}")),
        (r#"(?i)\b(cx=)[^&\s"']+"#, format!("${{1}}{MASK}")),
        (r#"(?i)\b(client_secret=)[^&\s"']+"#, format!("${{1}}{MASK}")),
        (
            r#"(?i)(x-naver-client-secret["':=\s]+)[A-Za-z0-9_\-]+"#,
            format!("${{1}}{MASK}"),
        ),
        (
            r"(hooks\.slack\.com/services/)[A-Za-z0-9/]+",
            format!("${{1}}{MASK}"),
        ),
    ];

    let mut out = text.to_string();
    for (pattern, replacement) in rules {
        if let Ok(re) = Regex::new(pattern) {
            out = re.replace_all(&out, replacement.as_str()).into_owned();
        }
    }
    out
}
