//! Hybrid intelligence extraction for a single turn.
//!
//! A deterministic regex pass over the message text, plus re-validation of
//! collaborator-supplied candidates, merged into one per-category result.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{validate, CandidateEntity, IntelligenceCategory, IntelligenceSet};

static DIGIT_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d\s-]{7,24}\d").expect("digit run regex"));

static MAILBOX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9][A-Za-z0-9._%+\-]*@[A-Za-z0-9][A-Za-z0-9.\-]*")
        .expect("mailbox regex")
});

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:https?://|www\.)[^\s<>"']+"#).expect("url regex")
});

static CONTACT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[\s,;:(])@([A-Za-z][A-Za-z0-9_.]{2,31})").expect("contact regex")
});

static REFERENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{2,6}[-#]?[A-Z0-9]{4,12}\b").expect("reference regex"));

/// Extracts and validates intelligence from one turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntelligenceExtractor;

impl IntelligenceExtractor {
    /// Creates a new extractor.
    pub fn new() -> Self {
        Self
    }

    /// Produces the turn's per-category result set.
    ///
    /// Deterministic finds and validated candidates are unioned and
    /// deduplicated by normalized value. Pure: identical input yields an
    /// identical set.
    pub fn extract(&self, text: &str, candidates: &[CandidateEntity]) -> IntelligenceSet {
        let mut result = self.extract_deterministic(text);
        for candidate in candidates {
            if let Some(normalized) = validate(candidate.category, &candidate.value) {
                result.insert(candidate.category, normalized);
            }
        }
        result
    }

    /// Regex pass over the raw text; every find still passes through the
    /// category validator, which also settles account-vs-phone and
    /// handle-vs-email confusions.
    fn extract_deterministic(&self, text: &str) -> IntelligenceSet {
        let mut result = IntelligenceSet::new();

        for m in DIGIT_RUN_RE.find_iter(text) {
            if let Some(phone) = validate(IntelligenceCategory::Phone, m.as_str()) {
                result.insert(IntelligenceCategory::Phone, phone);
            } else if let Some(account) = validate(IntelligenceCategory::AccountNumber, m.as_str())
            {
                result.insert(IntelligenceCategory::AccountNumber, account);
            }
        }

        for m in MAILBOX_RE.find_iter(text) {
            let domain = m.as_str().rsplit_once('@').map(|(_, d)| d).unwrap_or("");
            if domain.contains('.') {
                if let Some(email) = validate(IntelligenceCategory::Email, m.as_str()) {
                    result.insert(IntelligenceCategory::Email, email);
                }
            } else if let Some(handle) = validate(IntelligenceCategory::PaymentHandle, m.as_str()) {
                result.insert(IntelligenceCategory::PaymentHandle, handle);
            }
        }

        for m in URL_RE.find_iter(text) {
            if let Some(url) = validate(IntelligenceCategory::Url, m.as_str()) {
                result.insert(IntelligenceCategory::Url, url);
            }
        }

        for caps in CONTACT_RE.captures_iter(text) {
            if let Some(body) = caps.get(1) {
                if let Some(handle) = validate(IntelligenceCategory::ContactHandle, body.as_str()) {
                    result.insert(IntelligenceCategory::ContactHandle, handle);
                }
            }
        }

        for m in REFERENCE_RE.find_iter(text) {
            if let Some(code) = validate(IntelligenceCategory::ReferenceCode, m.as_str()) {
                result.insert(IntelligenceCategory::ReferenceCode, code);
            }
        }

        result
    }
}
