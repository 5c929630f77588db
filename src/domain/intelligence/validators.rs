//! Per-category validity predicates and value normalization.
//!
//! The same predicate validates values found by the deterministic pass and
//! candidates supplied by the engagement collaborator, so nothing enters a
//! session's accumulated set without passing through here.

use super::IntelligenceCategory;

/// Known UPI payment providers. Handles against these are accepted with
/// any local part; other providers fall back to a stricter shape check.
const PAYMENT_PROVIDER_ALLOWLIST: &[&str] = &[
    "upi", "ybl", "ibl", "axl", "apl", "paytm", "okaxis", "okhdfcbank", "okicici", "oksbi",
    "freecharge", "mbk", "ptyes", "ptaxis", "yapl", "waicici", "wahdfcbank",
];

const ACCOUNT_MIN_DIGITS: usize = 9;
const ACCOUNT_MAX_DIGITS: usize = 18;

/// Validates a raw value for a category and returns its normalized form,
/// or `None` when the value fails the category's predicate.
///
/// Normalization case-folds and strips separators so that accumulated
/// sets deduplicate by canonical value.
pub fn validate(category: IntelligenceCategory, raw: &str) -> Option<String> {
    match category {
        IntelligenceCategory::PaymentHandle => payment_handle(raw),
        IntelligenceCategory::AccountNumber => account_number(raw),
        IntelligenceCategory::Phone => phone(raw),
        IntelligenceCategory::ContactHandle => contact_handle(raw),
        IntelligenceCategory::Url => url(raw),
        IntelligenceCategory::Email => email(raw),
        IntelligenceCategory::ReferenceCode => reference_code(raw),
        IntelligenceCategory::IdentityName => identity_name(raw),
    }
}

fn strip_digit_separators(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '+'))
        .collect()
}

fn all_same_digit(digits: &str) -> bool {
    let mut chars = digits.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => true,
    }
}

/// Ten digits starting 6-9, the national mobile format.
fn is_phone_shaped(digits: &str) -> bool {
    digits.len() == 10
        && digits.starts_with(['6', '7', '8', '9'])
        && digits.chars().all(|c| c.is_ascii_digit())
}

fn phone(raw: &str) -> Option<String> {
    let digits = strip_digit_separators(raw.trim());
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    // Accept an optional country (91) or trunk (0) prefix.
    let national = if digits.len() == 12 && digits.starts_with("91") {
        &digits[2..]
    } else if digits.len() == 11 && digits.starts_with('0') {
        &digits[1..]
    } else {
        digits.as_str()
    };
    if is_phone_shaped(national) && !all_same_digit(national) {
        Some(national.to_string())
    } else {
        None
    }
}

fn account_number(raw: &str) -> Option<String> {
    let digits = strip_digit_separators(raw.trim());
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if digits.len() < ACCOUNT_MIN_DIGITS || digits.len() > ACCOUNT_MAX_DIGITS {
        return None;
    }
    if all_same_digit(&digits) {
        return None;
    }
    // A value that reads as a mobile number is a phone, not an account.
    if is_phone_shaped(&digits) {
        return None;
    }
    Some(digits)
}

fn payment_handle(raw: &str) -> Option<String> {
    let lowered = raw.trim().to_lowercase();
    let (local, provider) = lowered.split_once('@')?;
    if provider.contains('@') || provider.contains('.') {
        return None; // dotted domain means email territory
    }
    if !(2..=64).contains(&local.len()) || !(2..=20).contains(&provider.len()) {
        return None;
    }
    if !local.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return None;
    }
    if !provider.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let allowlisted = PAYMENT_PROVIDER_ALLOWLIST.contains(&provider);
    // Permissive fallback: unknown providers need a handle-shaped local part.
    let handle_shaped = local.chars().any(|c| c.is_ascii_digit()) || local.contains('.');
    if allowlisted || handle_shaped {
        Some(lowered)
    } else {
        None
    }
}

fn email(raw: &str) -> Option<String> {
    let lowered = raw.trim().trim_end_matches(['.', ',']).to_lowercase();
    let (local, domain) = lowered.split_once('@')?;
    if local.is_empty() || local.len() > 64 || domain.len() > 255 {
        return None;
    }
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
    {
        return None;
    }
    let (_, tld) = domain.rsplit_once('.')?;
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
    {
        return None;
    }
    Some(lowered)
}

fn url(raw: &str) -> Option<String> {
    let trimmed = raw
        .trim()
        .trim_end_matches(['.', ',', '!', '?', ';', ':', ')'])
        .to_lowercase();
    let rest = if let Some(rest) = trimmed.strip_prefix("https://") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("http://") {
        rest
    } else if trimmed.starts_with("www.") {
        trimmed.as_str()
    } else {
        return None;
    };
    if rest.len() < 4 || trimmed.len() > 2048 {
        return None;
    }
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if !host.contains('.') {
        return None;
    }
    Some(trimmed)
}

fn contact_handle(raw: &str) -> Option<String> {
    let body = raw.trim().trim_start_matches('@').to_lowercase();
    if !(3..=32).contains(&body.len()) {
        return None;
    }
    if !body.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if !body
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.'))
    {
        return None;
    }
    Some(format!("@{}", body))
}

fn reference_code(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '#' | ' '))
        .collect::<String>()
        .to_uppercase();
    if !(6..=14).contains(&cleaned.len()) {
        return None;
    }
    if !cleaned.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    let has_letter = cleaned.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = cleaned.chars().any(|c| c.is_ascii_digit());
    if has_letter && has_digit {
        Some(cleaned)
    } else {
        None
    }
}

fn identity_name(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let words: Vec<&str> = collapsed.split(' ').collect();
    if !(2..=4).contains(&words.len()) || collapsed.len() > 60 {
        return None;
    }
    for word in &words {
        let core = word.trim_end_matches('.');
        if core.is_empty() || core.len() > 20 {
            return None;
        }
        if !core.chars().all(|c| c.is_alphabetic()) {
            return None;
        }
    }
    Some(collapsed.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use IntelligenceCategory::*;

    #[test]
    fn phone_accepts_national_format() {
        assert_eq!(validate(Phone, "9876543210"), Some("9876543210".into()));
        assert_eq!(validate(Phone, "+91 98765 43210"), Some("9876543210".into()));
        assert_eq!(validate(Phone, "09876543210"), Some("9876543210".into()));
        assert_eq!(validate(Phone, "91-9876543210"), Some("9876543210".into()));
    }

    #[test]
    fn phone_rejects_bad_shapes() {
        assert_eq!(validate(Phone, "1234567890"), None); // starts with 1
        assert_eq!(validate(Phone, "98765"), None); // too short
        assert_eq!(validate(Phone, "9999999999"), None); // all same digit
        assert_eq!(validate(Phone, "98765abc10"), None);
    }

    #[test]
    fn account_accepts_bounded_digit_runs() {
        assert_eq!(
            validate(AccountNumber, "1234 5678 9012"),
            Some("123456789012".into())
        );
        assert_eq!(
            validate(AccountNumber, "50100123456789"),
            Some("50100123456789".into())
        );
    }

    #[test]
    fn account_rejects_phone_shaped_values() {
        assert_eq!(validate(AccountNumber, "9876543210"), None);
    }

    #[test]
    fn account_rejects_out_of_bounds_and_repeats() {
        assert_eq!(validate(AccountNumber, "12345678"), None); // 8 digits
        assert_eq!(validate(AccountNumber, "1234567890123456789"), None); // 19
        assert_eq!(validate(AccountNumber, "111111111"), None);
    }

    #[test]
    fn payment_handle_accepts_allowlisted_provider() {
        assert_eq!(
            validate(PaymentHandle, "Fraudster@YBL"),
            Some("fraudster@ybl".into())
        );
        assert_eq!(
            validate(PaymentHandle, "refunds@okicici"),
            Some("refunds@okicici".into())
        );
    }

    #[test]
    fn payment_handle_fallback_requires_handle_shape() {
        // Unknown provider, digit in the local part: permissive fallback.
        assert_eq!(
            validate(PaymentHandle, "agent99@unknownbank"),
            Some("agent99@unknownbank".into())
        );
        // Unknown provider, word-only local: too email-like to trust.
        assert_eq!(validate(PaymentHandle, "hello@world"), None);
    }

    #[test]
    fn payment_handle_rejects_dotted_domains() {
        assert_eq!(validate(PaymentHandle, "someone@gmail.com"), None);
    }

    #[test]
    fn email_requires_dotted_domain() {
        assert_eq!(
            validate(Email, "Scam.Desk@Example.COM"),
            Some("scam.desk@example.com".into())
        );
        assert_eq!(validate(Email, "fraudster@ybl"), None);
        assert_eq!(validate(Email, "not-an-email"), None);
    }

    #[test]
    fn url_accepts_schemes_and_www() {
        assert_eq!(
            validate(Url, "https://Bit.ly/Claim"),
            Some("https://bit.ly/claim".into())
        );
        assert_eq!(
            validate(Url, "www.kyc-update.example"),
            Some("www.kyc-update.example".into())
        );
        assert_eq!(validate(Url, "ftp://files.example"), None);
    }

    #[test]
    fn url_strips_trailing_punctuation() {
        assert_eq!(
            validate(Url, "https://bit.ly/x91ref."),
            Some("https://bit.ly/x91ref".into())
        );
    }

    #[test]
    fn contact_handle_normalizes_with_at_prefix() {
        assert_eq!(
            validate(ContactHandle, "Refund_Desk"),
            Some("@refund_desk".into())
        );
        assert_eq!(
            validate(ContactHandle, "@SBI.Care"),
            Some("@sbi.care".into())
        );
        assert_eq!(validate(ContactHandle, "@ab"), None);
        assert_eq!(validate(ContactHandle, "@1number"), None);
    }

    #[test]
    fn reference_code_requires_mixed_alnum() {
        assert_eq!(validate(ReferenceCode, "TXN-482910"), Some("TXN482910".into()));
        assert_eq!(validate(ReferenceCode, "ref#99x21"), Some("REF99X21".into()));
        assert_eq!(validate(ReferenceCode, "12345678"), None); // digits only
        assert_eq!(validate(ReferenceCode, "REFUNDED"), None); // letters only
    }

    #[test]
    fn identity_name_bounds_word_count() {
        assert_eq!(validate(IdentityName, "Rahul  Sharma"), Some("rahul sharma".into()));
        assert_eq!(
            validate(IdentityName, "A. P. J. Kalam"),
            Some("a. p. j. kalam".into())
        );
        assert_eq!(validate(IdentityName, "Rahul"), None); // one word
        assert_eq!(validate(IdentityName, "agent 007"), None); // digits
    }
}
