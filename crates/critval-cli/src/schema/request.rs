//! JSON schema of batch evaluation files.

use critval_stats::{
    CalculationMode, DEFAULT_ALPHA, DegreesOfFreedom, DistributionKind, EvaluationError,
    Outcome, Parameters, TailMode,
};
use serde::{Deserialize, Serialize};

/// One request in a batch file.
///
/// Only `distribution` is required; every other field defaults the same way
/// the command-line flags do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BatchRequest {
    pub distribution: DistributionKind,
    #[serde(default)]
    pub tail: TailMode,
    #[serde(default)]
    pub mode: CalculationMode,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_df")]
    pub df: u32,
    #[serde(default = "default_dfn")]
    pub dfn: u32,
    #[serde(default = "default_dfd")]
    pub dfd: u32,
    #[serde(default)]
    pub statistic: f64,
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

fn default_df() -> u32 {
    DegreesOfFreedom::default().df
}

fn default_dfn() -> u32 {
    DegreesOfFreedom::default().numerator
}

fn default_dfd() -> u32 {
    DegreesOfFreedom::default().denominator
}

impl BatchRequest {
    pub fn parameters(&self) -> Parameters {
        Parameters {
            alpha: self.alpha,
            dof: DegreesOfFreedom {
                df: self.df,
                numerator: self.dfn,
                denominator: self.dfd,
            },
            statistic: self.statistic,
        }
    }

    pub fn evaluate(&self) -> Result<Outcome, EvaluationError> {
        critval_stats::evaluate(self.distribution, self.tail, self.mode, &self.parameters())
    }
}

/// The result of one batch request, echoing the request it answers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BatchRecord {
    pub request: BatchRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchRecord {
    pub fn new(request: BatchRequest, result: Result<Outcome, EvaluationError>) -> Self {
        match result {
            Ok(outcome) => Self {
                request,
                formatted: Some(outcome.to_string()),
                outcome: Some(outcome),
                error: None,
            },
            Err(err) => Self {
                request,
                outcome: None,
                formatted: None,
                error: Some(err.to_string()),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let request: BatchRequest = serde_json::from_str(r#"{"distribution": "t"}"#).unwrap();
        assert_eq!(request.distribution, DistributionKind::StudentT);
        assert_eq!(request.tail, TailMode::RightTailed);
        assert_eq!(request.mode, CalculationMode::CriticalValue);
        assert_eq!(request.parameters(), Parameters::default());
    }

    #[test]
    fn test_full_request() {
        let request: BatchRequest = serde_json::from_str(
            r#"{
                "distribution": "f",
                "tail": "two",
                "mode": "p-value",
                "dfn": 3,
                "dfd": 20,
                "statistic": 3.1
            }"#,
        )
        .unwrap();
        assert_eq!(request.mode, CalculationMode::PValue);
        let outcome = request.evaluate().unwrap();
        assert_eq!(outcome.tail(), TailMode::RightTailed);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = serde_json::from_str::<BatchRequest>(r#"{"distribution": "z", "sigma": 2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_record_keeps_error_message() {
        let request: BatchRequest =
            serde_json::from_str(r#"{"distribution": "chi2", "mode": "p-value", "statistic": -1}"#)
                .unwrap();
        let record = BatchRecord::new(request.clone(), request.evaluate());
        assert!(record.is_error());
        assert!(record.outcome.is_none());
        assert!(
            record
                .error
                .as_deref()
                .is_some_and(|msg| msg.contains("non-negative support"))
        );
    }
}
