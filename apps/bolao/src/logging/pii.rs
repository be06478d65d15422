//! Redaction helpers for log fields that carry participant data or secrets.
//!
//! Chat display names and `@handles` identify real people; bot tokens grant
//! full control of the bot. Neither goes into logs verbatim.

use std::fmt;

use lazy_regex::regex;

/// Mask everything after the first character: `"Maria"` -> `"M***"`.
pub fn mask_name(input: &str) -> String {
    let mut chars = input.trim().chars();
    match chars.next() {
        None => String::new(),
        Some(first) => format!("{first}***"),
    }
}

/// Redact secrets and handles embedded in free text.
///
/// - Bot tokens (`<digits>:<35+ url-safe chars>`) become `[REDACTED_TOKEN]`.
/// - `@handles` keep their first character: `@joao_silva` -> `@j***`.
pub fn redact(input: &str) -> String {
    let without_tokens =
        regex!(r"\d{6,}:[A-Za-z0-9_-]{30,}").replace_all(input, "[REDACTED_TOKEN]");

    regex!(r"@([A-Za-z0-9_]{2,32})")
        .replace_all(&without_tokens, |caps: &regex::Captures| {
            format!("@{}", mask_name(&caps[1]))
        })
        .into_owned()
}

/// Wrapper that redacts free text when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

/// Wrapper for person names; only the first character survives.
pub struct MaskedName<'a>(pub &'a str);

impl fmt::Display for MaskedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&mask_name(self.0))
    }
}

impl fmt::Debug for MaskedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&mask_name(self.0))
    }
}
