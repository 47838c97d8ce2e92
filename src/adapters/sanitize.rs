//! Log sanitization for patient identifiers and credentials.
//!
//! Every formatted log line passes through [`SanitizingMakeWriter`], which
//! redacts:
//! - DNA kit ids (`PRDV-XXXX-XXXX-XXXX`)
//! - Phone numbers and email addresses
//! - Dates of birth (`MM/DD/YYYY`)
//! - Session tokens, bearer tokens and JWTs
//! - `password=...` style assignments
//!
//! Call sites should still avoid logging patient fields; this is a fallback.
//!
//! Input is capped (see `PREDICTIV_SANITIZE_MAX_BYTES`) so a huge line cannot
//! stall the logging thread.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static PII_PATTERNS: OnceLock<PiiPatterns> = OnceLock::new();

/// Default cap on bytes sanitized per call (16 KiB).
const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

const SANITIZE_MAX_BYTES_ENV: &str = "PREDICTIV_SANITIZE_MAX_BYTES";

struct PiiPattern {
    regex: Regex,
    replacement: &'static str,
}

struct PiiPatterns {
    set: RegexSet,
    patterns: Vec<PiiPattern>,
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    let mut end = max_bytes.min(input.len());
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn max_sanitize_bytes() -> usize {
    std::env::var(SANITIZE_MAX_BYTES_ENV)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn get_patterns() -> &'static PiiPatterns {
    PII_PATTERNS.get_or_init(|| {
        // Order matters: credential assignments go first so the value is
        // replaced whole before narrower patterns touch it.
        let rules: Vec<(&'static str, &'static str)> = vec![
            (
                r"(?i)\b(?:password|passwd|pwd|current_password|new_password)\b\s*[:=]\s*\S+",
                "[REDACTED-PASSWORD]",
            ),
            (r"(?i)\bbearer\s+[A-Za-z0-9._~+/-]+=*", "[REDACTED-TOKEN]"),
            (
                r"\beyJ[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\b",
                "[REDACTED-JWT]",
            ),
            (r"\b[A-Za-z0-9]+_auth_token_[A-Za-z0-9]+\b", "[REDACTED-TOKEN]"),
            (r"(?i)\btoken\b\s*[:=]\s*\S+", "[REDACTED-TOKEN]"),
            (r"\bPRDV(?:-[A-Z0-9]{4}){3}\b", "[REDACTED-DNA-ID]"),
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            (r"\b(?:0[1-9]|1[0-2])/(?:0[1-9]|[12]\d|3[01])/(?:19|20)\d{2}\b", "[REDACTED-DOB]"),
            // Korean mobile/landline, with or without separators
            (r"\b0\d{1,2}[-.\s]?\d{3,4}[-.\s]?\d{4}\b", "[REDACTED-PHONE]"),
            (r"\+\d{1,3}[-.\s]?\d{1,4}[-.\s]?\d{3,4}[-.\s]?\d{4}\b", "[REDACTED-PHONE]"),
        ];

        let set = RegexSet::new(rules.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let patterns = rules
            .into_iter()
            .map(|(pattern, replacement)| PiiPattern {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        PiiPatterns { set, patterns }
    })
}

/// Replace identifiers and secrets in `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = get_patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let matched: Vec<usize> = patterns.set.matches(prefix).into_iter().collect();
    let mut result = prefix.to_string();
    for idx in matched {
        let pattern = &patterns.patterns[idx];
        result = pattern.regex.replace_all(&result, pattern.replacement).to_string();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// Check if a string contains anything [`sanitize`] would redact.
#[must_use]
pub fn contains_pii(input: &str) -> bool {
    let (prefix, _truncated) = truncate_to_char_boundary(input, max_sanitize_bytes());
    get_patterns().set.is_match(prefix)
}

/// A `tracing_subscriber` writer wrapper that sanitizes formatted log output
/// line by line before it reaches the underlying sink.
#[derive(Debug)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M> Clone for SanitizingMakeWriter<M>
where
    M: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }
}

impl<W> SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line = self.buffer.drain(..=pos).collect::<Vec<u8>>();
            let sanitized = sanitize(&String::from_utf8_lossy(&line));
            self.inner.write_all(sanitized.as_bytes())?;
        }
        Ok(())
    }
}

impl<W> std::io::Write for SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A single line with no newline must not grow without bound.
        let hard_cap = max_sanitize_bytes().saturating_mul(2);
        if hard_cap > 0 && self.buffer.len() > hard_cap {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.inner.write_all(b"\n")?;
            self.buffer.clear();
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;

        if !self.buffer.is_empty() {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.buffer.clear();
        }

        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sanitize_dna_id() {
        let sanitized = sanitize("Created patient with kit PRDV-C4M6-2E1N-G8FM");
        assert!(sanitized.contains("[REDACTED-DNA-ID]"));
        assert!(!sanitized.contains("C4M6"));
    }

    #[test]
    fn test_sanitize_phone() {
        let sanitized = sanitize("phone 010-1234-5678 updated");
        assert!(sanitized.contains("[REDACTED-PHONE]"));
        assert!(!sanitized.contains("5678"));

        assert!(sanitize("call 01098765432").contains("[REDACTED-PHONE]"));
    }

    #[test]
    fn test_sanitize_email() {
        let sanitized = sanitize("login attempt for demo@predictivcare.com");
        assert!(sanitized.contains("[REDACTED-EMAIL]"));
        assert!(!sanitized.contains("predictivcare.com"));
    }

    #[test]
    fn test_sanitize_dob() {
        let sanitized = sanitize("dob 07/01/1980");
        assert!(sanitized.contains("[REDACTED-DOB]"));
    }

    #[test]
    fn test_sanitize_tokens() {
        assert!(!sanitize("saved dummy_auth_token_12345").contains("12345"));
        assert!(sanitize("Authorization: Bearer abc.def-123").contains("[REDACTED-TOKEN]"));
        assert!(sanitize("token=abcdef").contains("[REDACTED-TOKEN]"));
    }

    #[test]
    fn test_sanitize_password_assignment() {
        let sanitized = sanitize("body password=qweasd31d end");
        assert!(sanitized.contains("[REDACTED-PASSWORD]"));
        assert!(!sanitized.contains("qweasd31d"));
    }

    #[test]
    fn test_contains_pii() {
        assert!(contains_pii("kit PRDV-AAAA-BBBB-CCCC"));
        assert!(contains_pii("010-5566-7788"));
        assert!(!contains_pii("Fetched 5 patients in 120ms"));
        assert!(!contains_pii("GET /patients/patient-3 -> 200"));
    }

    #[test]
    fn test_truncates_large_inputs() {
        let sanitized = sanitize_with_limit("prefix PRDV-AAAA-BBBB-CCCC suffix", 10);
        assert!(sanitized.ends_with("[TRUNCATED]"));
        assert!(!sanitized.contains("PRDV-AAAA"));
    }

    #[test]
    fn test_writer_sanitizes_lines() {
        let mut out = Vec::new();
        {
            let mut writer = SanitizingWriter::new(&mut out);
            writer.write_all(b"first 010-1234-5678\nsecond ").expect("Should write");
            writer.write_all(b"demo@predictivcare.com").expect("Should write");
            writer.flush().expect("Should flush");
        }
        let text = String::from_utf8(out).expect("Should be utf8");
        assert!(text.contains("first [REDACTED-PHONE]\n"));
        assert!(text.contains("second [REDACTED-EMAIL]"));
    }
}
