//! Closed set of intelligence categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of an extractable intelligence value.
///
/// The set is closed: externally-supplied candidates with an unknown
/// category fail deserialization at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntelligenceCategory {
    /// UPI-style `handle@provider` payment identifiers.
    PaymentHandle,
    /// Bank account-like digit sequences.
    AccountNumber,
    /// National-format phone numbers.
    Phone,
    /// Social `@handle` contact points.
    ContactHandle,
    /// Links the counterpart wants visited.
    Url,
    /// Email addresses.
    Email,
    /// Fixed-format reference and case codes.
    ReferenceCode,
    /// Names the counterpart identifies themselves (or payees) by.
    IdentityName,
}

impl IntelligenceCategory {
    /// All categories, in canonical order.
    pub const ALL: [IntelligenceCategory; 8] = [
        IntelligenceCategory::PaymentHandle,
        IntelligenceCategory::AccountNumber,
        IntelligenceCategory::Phone,
        IntelligenceCategory::ContactHandle,
        IntelligenceCategory::Url,
        IntelligenceCategory::Email,
        IntelligenceCategory::ReferenceCode,
        IntelligenceCategory::IdentityName,
    ];
}

impl fmt::Display for IntelligenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IntelligenceCategory::PaymentHandle => "payment-handle",
            IntelligenceCategory::AccountNumber => "account-number",
            IntelligenceCategory::Phone => "phone",
            IntelligenceCategory::ContactHandle => "contact-handle",
            IntelligenceCategory::Url => "url",
            IntelligenceCategory::Email => "email",
            IntelligenceCategory::ReferenceCode => "reference-code",
            IntelligenceCategory::IdentityName => "identity-name",
        };
        write!(f, "{}", s)
    }
}
