//! Sensitive-data redaction.
//!
//! Masks payment-card numbers, IBANs, SSNs, and national-ID codes before
//! text is allowed anywhere near a retrieval query or a generation prompt,
//! and again on the generated answer. Each mask keeps only the trailing
//! four characters of the matched span.
//!
//! Categories are applied in a fixed order. Patterns overlap (a national-ID
//! code carries enough digits to satisfy the payment-card pattern), so the
//! order is part of the contract: earlier categories claim their spans and
//! masked text is a fixed point of [`Redactor::redact`].

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    /// Loose payment-card digit-run pattern (13-19 digits, separators allowed).
    static ref PAYMENT_CARD_PATTERN: Regex = Regex::new(r"\b(?:\d[ -]*?){13,19}\b").unwrap();

    /// IBAN-like pattern: country code, check digits, 11-30 alphanumerics.
    static ref IBAN_PATTERN: Regex = Regex::new(r"\b[A-Z]{2}\d{2}[A-Z0-9]{11,30}\b").unwrap();

    /// SSN-like pattern (XXX-XX-XXXX).
    static ref SSN_PATTERN: Regex = Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").unwrap();

    /// National-ID-like pattern (784-XXXX-XXXXXXX-X).
    static ref NATIONAL_ID_PATTERN: Regex = Regex::new(r"\b784-\d{4}-\d{7}-\d{1}\b").unwrap();
}

/// A sensitive-data category the redactor knows how to mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiCategory {
    PaymentCard,
    Iban,
    Ssn,
    NationalId,
}

impl PiiCategory {
    /// All categories in masking order. Order is load-bearing: earlier
    /// categories must claim overlapping spans before later ones run.
    pub const ORDERED: [PiiCategory; 4] = [
        PiiCategory::PaymentCard,
        PiiCategory::Iban,
        PiiCategory::Ssn,
        PiiCategory::NationalId,
    ];

    fn pattern(&self) -> &'static Regex {
        match self {
            PiiCategory::PaymentCard => &PAYMENT_CARD_PATTERN,
            PiiCategory::Iban => &IBAN_PATTERN,
            PiiCategory::Ssn => &SSN_PATTERN,
            PiiCategory::NationalId => &NATIONAL_ID_PATTERN,
        }
    }

    /// Mask template for this category. `####` is replaced by the trailing
    /// characters preserved from the matched span.
    pub fn mask_template(&self) -> &'static str {
        match self {
            PiiCategory::PaymentCard => "**** **** **** ####",
            PiiCategory::Iban => "****-IBAN-****-####",
            PiiCategory::Ssn => "***-**-####",
            PiiCategory::NationalId => "EID-****####",
        }
    }

    /// Count of raw matches for this category in `text`. Used by the
    /// offline leak evaluator.
    pub(crate) fn match_count(&self, text: &str) -> usize {
        self.pattern().find_iter(text).count()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PiiCategory::PaymentCard => "payment_card",
            PiiCategory::Iban => "iban",
            PiiCategory::Ssn => "ssn",
            PiiCategory::NationalId => "national_id",
        }
    }
}

impl fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit record of one redaction pass over one category.
///
/// Carries the category and the mask template used, never the matched
/// substring. One record per category per [`Redactor::redact`] call,
/// regardless of how many spans that category masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionRecord {
    pub category: PiiCategory,
    pub mask_pattern: String,
}

/// Masks sensitive-data patterns in arbitrary text.
///
/// Stateless and total: no I/O, no failures, empty input yields empty
/// output with no records.
#[derive(Debug, Clone, Default)]
pub struct Redactor;

impl Redactor {
    pub fn new() -> Self {
        Self
    }

    /// Mask every span matching a supported category.
    ///
    /// Returns the masked text and one [`RedactionRecord`] per category
    /// that produced at least one match, in category order.
    pub fn redact(&self, text: &str) -> (String, Vec<RedactionRecord>) {
        let mut masked = text.to_string();
        let mut records = Vec::new();

        for category in PiiCategory::ORDERED {
            let pattern = category.pattern();
            if !pattern.is_match(&masked) {
                continue;
            }

            masked = pattern
                .replace_all(&masked, |caps: &regex::Captures<'_>| {
                    let span = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
                    category.mask_template().replace("####", trailing_four(span))
                })
                .into_owned();

            records.push(RedactionRecord {
                category,
                mask_pattern: category.mask_template().to_string(),
            });
        }

        (masked, records)
    }
}

/// Trailing four characters of a span, or the whole span if shorter.
fn trailing_four(span: &str) -> &str {
    match span.char_indices().rev().nth(3) {
        Some((idx, _)) => &span[idx..],
        None => span,
    }
}
