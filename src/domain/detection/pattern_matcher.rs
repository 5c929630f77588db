//! Deterministic weighted pattern scan over message text.
//!
//! The cheapest detection signal, evaluated before the classification
//! collaborator. Zero matches means inconclusive, never "safe".

use once_cell::sync::Lazy;
use regex::Regex;

use super::{DetectionSignal, ScamCategory};
use crate::domain::foundation::Confidence;

/// Ceiling for pattern-derived confidence.
pub const CONFIDENCE_CAP: f64 = 0.95;

/// Bonus added per matching pattern beyond the first.
pub const ADDITIONAL_MATCH_BONUS: f64 = 0.03;

/// Tunable base weights per category. These are constants, not derived.
pub const CREDENTIAL_THEFT_WEIGHT: f64 = 0.92;
pub const PHISHING_LINK_WEIGHT: f64 = 0.90;
pub const ACCOUNT_THREAT_WEIGHT: f64 = 0.88;
pub const AUTHORITY_IMPERSONATION_WEIGHT: f64 = 0.87;
pub const PRIZE_SCAM_WEIGHT: f64 = 0.86;

struct CategoryPatterns {
    category: ScamCategory,
    base_weight: f64,
    patterns: Vec<Regex>,
}

fn compile(exprs: &[&str]) -> Vec<Regex> {
    exprs
        .iter()
        .map(|e| Regex::new(e).expect("pattern table regex must compile"))
        .collect()
}

static PATTERN_TABLE: Lazy<Vec<CategoryPatterns>> = Lazy::new(|| {
    vec![
        CategoryPatterns {
            category: ScamCategory::CredentialTheft,
            base_weight: CREDENTIAL_THEFT_WEIGHT,
            patterns: compile(&[
                r"(?i)\b(otp|one[ -]?time ?(pass(word|code)?|pin))\b",
                r"(?i)\b(send|share|tell|give|enter)\b.{0,40}\b(otp|pin|password|passcode|cvv)\b",
                r"(?i)\bverify\b.{0,30}\b(account|identity|card)\b",
                r"(?i)\b(card number|cvv|atm pin|net ?banking password)\b",
            ]),
        },
        CategoryPatterns {
            category: ScamCategory::PhishingLink,
            base_weight: PHISHING_LINK_WEIGHT,
            patterns: compile(&[
                r"(?i)\b(click|tap|open|visit)\b.{0,40}\b(link|below|https?://)",
                r"(?i)https?://(bit\.ly|tinyurl\.com|t\.co|goo\.gl|rb\.gy|cutt\.ly|is\.gd)/",
                r"(?i)\b(update|complete|confirm)\b.{0,30}\bkyc\b.{0,60}https?://",
            ]),
        },
        CategoryPatterns {
            category: ScamCategory::AccountThreat,
            base_weight: ACCOUNT_THREAT_WEIGHT,
            patterns: compile(&[
                r"(?i)\b(account|card|sim|number)\b.{0,40}\b(block(ed)?|suspend(ed)?|frozen|deactivat\w+|disconnect\w+|clos(ed|ure))\b",
                r"(?i)\b(block(ed)?|suspend(ed)?|deactivat\w+)\b.{0,40}\b(account|card|sim)\b",
                r"(?i)\b(immediately|urgent(ly)?|within \d+ ?(hours?|minutes?|hrs?))\b.{0,50}\b(account|kyc|card)\b",
            ]),
        },
        CategoryPatterns {
            category: ScamCategory::AuthorityImpersonation,
            base_weight: AUTHORITY_IMPERSONATION_WEIGHT,
            patterns: compile(&[
                r"(?i)\b(calling|speaking|messaging)\b.{0,40}\bfrom\b.{0,40}\b(bank|rbi|police|customs|income tax|cyber ?(cell|crime)|telecom|courier)\b",
                r"(?i)\bthis is\b.{0,30}\b(officer|inspector|constable|official|executive)\b",
                r"(?i)\b(rbi|cbi|trai|fedex|customs)\b.{0,40}\b(notice|warrant|case|parcel|penalty)\b",
            ]),
        },
        CategoryPatterns {
            category: ScamCategory::PrizeScam,
            base_weight: PRIZE_SCAM_WEIGHT,
            patterns: compile(&[
                r"(?i)\b(congratulations?|you (have )?won|you are .{0,20}winner)\b",
                r"(?i)\b(lottery|jackpot|lucky draw)\b",
                r"(?i)\bclaim\b.{0,30}\b(prize|reward|winnings|cash ?back)\b",
            ]),
        },
    ]
});

/// Deterministic, zero-side-effect scan of message text against the
/// weighted category pattern table.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternMatcher;

impl PatternMatcher {
    /// Creates a new pattern matcher.
    pub fn new() -> Self {
        Self
    }

    /// Scans text against every category pattern.
    ///
    /// Returns `None` when nothing matches (inconclusive). On one or more
    /// matches, confidence is `min(0.95, base + 0.03 * additional)` where
    /// `base` is the strongest matching category's weight and `additional`
    /// counts every further matching pattern across all categories.
    pub fn evaluate(&self, text: &str) -> Option<DetectionSignal> {
        let mut total_matches = 0usize;
        let mut best: Option<(ScamCategory, f64)> = None;

        for entry in PATTERN_TABLE.iter() {
            let hits = entry.patterns.iter().filter(|p| p.is_match(text)).count();
            if hits == 0 {
                continue;
            }
            total_matches += hits;
            match best {
                Some((_, weight)) if weight >= entry.base_weight => {}
                _ => best = Some((entry.category, entry.base_weight)),
            }
        }

        let (category, base_weight) = best?;
        let additional = (total_matches - 1) as f64;
        let raw = (base_weight + ADDITIONAL_MATCH_BONUS * additional).min(CONFIDENCE_CAP);
        Some(DetectionSignal::pattern(Confidence::new(raw), category))
    }
}
