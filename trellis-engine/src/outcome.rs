//! What a caller makes of the root accumulator

use crate::accumulator::Accumulator;
use crate::error::E_QUERY_NOT_UNDERSTOOD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of interpreting one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// A handler determined the query type
    Answered {
        /// Query type
        qtype: String,
        /// Query key, if one was set
        #[serde(default, skip_serializing_if = "Option::is_none")]
        qkey: Option<Value>,
    },
    /// No handler set a query type
    NotUnderstood,
    /// A handler failed; the error is recorded
    Failed {
        /// Recorded error
        error: String,
    },
}

impl Outcome {
    /// Classify a root accumulator
    pub fn from_accumulator(acc: &Accumulator) -> Self {
        if let Some(error) = acc.error() {
            return Outcome::Failed {
                error: error.to_string(),
            };
        }
        match acc.qtype() {
            Some(qtype) => Outcome::Answered {
                qtype: qtype.to_string(),
                qkey: acc.qkey().cloned(),
            },
            None => Outcome::NotUnderstood,
        }
    }

    /// Error code for outcomes that are not answers
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Outcome::Answered { .. } => None,
            Outcome::NotUnderstood => Some(E_QUERY_NOT_UNDERSTOOD),
            Outcome::Failed { error } => Some(error.as_str()),
        }
    }

    /// Whether the query was understood
    pub fn is_answered(&self) -> bool {
        matches!(self, Outcome::Answered { .. })
    }
}

impl From<&Accumulator> for Outcome {
    fn from(acc: &Accumulator) -> Self {
        Outcome::from_accumulator(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outcomes() {
        let mut acc = Accumulator::new();
        assert_eq!(Outcome::from(&acc), Outcome::NotUnderstood);
        assert_eq!(
            Outcome::from(&acc).error_code(),
            Some(E_QUERY_NOT_UNDERSTOOD)
        );

        acc.set_qtype("ArrivalTime");
        acc.set_qkey(3);
        let outcome = Outcome::from(&acc);
        assert!(outcome.is_answered());
        assert_eq!(
            outcome,
            Outcome::Answered {
                qtype: "ArrivalTime".to_string(),
                qkey: Some(json!(3))
            }
        );

        let failed = Accumulator::failed("E_EXCEPTION: boom");
        assert_eq!(
            Outcome::from(&failed).error_code(),
            Some("E_EXCEPTION: boom")
        );
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(Outcome::NotUnderstood).unwrap();
        assert_eq!(value, json!({"status": "not_understood"}));
    }
}
