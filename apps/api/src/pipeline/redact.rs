//! Redactor — strips emails and phone numbers from free text before it may
//! reach a prompt or an audit record.
//!
//! Pattern matching is best-effort by design: emails and phone numbers only.
//! Names, addresses, and other identifiers are NOT redacted — a documented
//! limitation, not something to paper over with guesswork heuristics.

use std::sync::LazyLock;

use regex::Regex;

/// Placeholder substituted for every matched email address.
pub const REDACTED_EMAIL: &str = "[REDACTED_EMAIL]";
/// Placeholder substituted for every matched phone number.
pub const REDACTED_PHONE: &str = "[REDACTED_PHONE]";

/// Maximum accepted length for any single free-text field, in characters.
/// Oversized payloads are rejected before redaction ever runs.
pub const MAX_TEXT_LEN: usize = 30_000;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").unwrap()
});

// 6+ digits/dashes/spaces between two digits, optional leading `+`.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d\-\s]{6,}\d").unwrap());

/// Replaces every email- and phone-shaped substring with a fixed placeholder.
///
/// Idempotent: the placeholders contain no `@` and no digits, so running the
/// redactor over already-redacted text changes nothing.
pub fn redact(text: &str) -> String {
    let pass = EMAIL_RE.replace_all(text, REDACTED_EMAIL);
    PHONE_RE.replace_all(&pass, REDACTED_PHONE).into_owned()
}

/// True if the text still contains an email- or phone-shaped substring.
/// Used by tests and the audit layer as a final tripwire.
pub fn contains_pii(text: &str) -> bool {
    EMAIL_RE.is_match(text) || PHONE_RE.is_match(text)
}
