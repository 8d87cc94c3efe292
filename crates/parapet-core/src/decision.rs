//! Refuse-vs-pass-through decision.
//!
//! Aggregates the risk signals produced upstream and applies strict,
//! non-configurable rules: any flag replaces the generated answer with the
//! refusal template. These rules are governance machinery, not a tuning
//! toy; there are no partial refusals.

use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Opening of the fixed refusal template.
pub const REFUSAL_PREAMBLE: &str = "I cannot provide a policy-confirmed answer with the current context. \
     Please consult a supervisor or escalate per KYC/SOP. Reason(s): ";

/// A tagged reason that routes the answer through the refusal path.
///
/// Serialized as its wire form (`insufficient_context`,
/// `policy_violation:<detail>`) so payloads round-trip exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskFlag {
    /// The evidence set used to build prompt context was empty.
    InsufficientContext,

    /// A linter violation on the generated text.
    PolicyViolation(String),
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskFlag::InsufficientContext => f.write_str("insufficient_context"),
            RiskFlag::PolicyViolation(detail) => write!(f, "policy_violation:{}", detail),
        }
    }
}

impl FromStr for RiskFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "insufficient_context" {
            return Ok(RiskFlag::InsufficientContext);
        }
        if let Some(detail) = s.strip_prefix("policy_violation:") {
            return Ok(RiskFlag::PolicyViolation(detail.to_string()));
        }
        Err(format!("unknown risk flag: '{}'", s))
    }
}

impl Serialize for RiskFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RiskFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Outcome of the decision stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Final answer text: the redacted generation, or the refusal template.
    pub final_text: String,

    /// Flags that triggered the refusal, empty on pass-through.
    pub risk_flags: Vec<RiskFlag>,
}

impl Verdict {
    pub fn refused(&self) -> bool {
        !self.risk_flags.is_empty()
    }
}

/// Pure, total decision function over evidence presence and lint results.
#[derive(Debug, Clone, Default)]
pub struct Decision;

impl Decision {
    pub fn new() -> Self {
        Self
    }

    /// Decide refuse-vs-pass-through.
    ///
    /// Flag order is fixed: insufficient context first, then one policy
    /// violation per lint finding in lint order. Any flag replaces
    /// `redacted_answer` with the refusal template naming every reason.
    pub fn decide(
        &self,
        redacted_answer: &str,
        evidence_present: bool,
        violations: &[String],
    ) -> Verdict {
        let mut risk_flags = Vec::new();

        if !evidence_present {
            risk_flags.push(RiskFlag::InsufficientContext);
        }

        for violation in violations {
            risk_flags.push(RiskFlag::PolicyViolation(violation.clone()));
        }

        if risk_flags.is_empty() {
            return Verdict {
                final_text: redacted_answer.to_string(),
                risk_flags,
            };
        }

        let reasons = risk_flags
            .iter()
            .map(RiskFlag::to_string)
            .collect::<Vec<_>>()
            .join("; ");

        Verdict {
            final_text: format!("{}{}", REFUSAL_PREAMBLE, reasons),
            risk_flags,
        }
    }
}
