//! Evaluation results and their four-decimal rendering.

use std::fmt;

use serde::Serialize;

use crate::{DistributionKind, TailMode};

/// A critical value at a given significance level.
///
/// `quantile` is always the upper quantile `q`; the reported value is derived
/// from the effective tail mode: `q` (right), `-q` (left) or `±q` (two-tailed).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalValue {
    pub kind: DistributionKind,
    /// The tail mode actually applied, after forcing right-tailed where needed.
    pub tail: TailMode,
    pub alpha: f64,
    pub quantile: f64,
}

impl CriticalValue {
    /// The signed critical value of a one-sided test, or the upper bound of a
    /// two-tailed one.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self.tail {
            TailMode::LeftTailed => positive_zero(-self.quantile),
            TailMode::RightTailed | TailMode::TwoTailed => self.quantile,
        }
    }

    /// The `(lower, upper)` pair of a two-tailed critical value.
    #[must_use]
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.tail
            .is_two_tailed()
            .then(|| (positive_zero(-self.quantile), self.quantile))
    }
}

impl fmt::Display for CriticalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.kind.value_label();
        match (self.tail.side_label(), self.kind.supports_left_tail()) {
            (None, _) => write!(f, "Critical {label}: ±{:.4}", self.quantile),
            (Some(side), true) => write!(f, "Critical {label} ({side}): {:.4}", self.value()),
            (Some(_), false) => write!(f, "Critical {label}: {:.4}", self.value()),
        }
    }
}

/// The probability of a result at least as extreme as the observed statistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PValue {
    pub kind: DistributionKind,
    pub tail: TailMode,
    pub statistic: f64,
    pub p_value: f64,
}

impl fmt::Display for PValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-value: {:.4}", self.p_value)
    }
}

/// The result of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, derive_more::From, derive_more::IsVariant)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Outcome {
    CriticalValue(CriticalValue),
    PValue(PValue),
}

impl Outcome {
    #[must_use]
    pub fn kind(&self) -> DistributionKind {
        match self {
            Self::CriticalValue(cv) => cv.kind,
            Self::PValue(pv) => pv.kind,
        }
    }

    #[must_use]
    pub fn tail(&self) -> TailMode {
        match self {
            Self::CriticalValue(cv) => cv.tail,
            Self::PValue(pv) => pv.tail,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CriticalValue(cv) => fmt::Display::fmt(cv, f),
            Self::PValue(pv) => fmt::Display::fmt(pv, f),
        }
    }
}

// -0.0 + 0.0 == +0.0, so a negated zero quantile never renders as "-0.0000".
fn positive_zero(value: f64) -> f64 {
    value + 0.0
}
