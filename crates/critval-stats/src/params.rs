//! Inputs to an evaluation and their validation rules.

use serde::{Deserialize, Serialize};

use crate::{DistributionKind, InvalidParameter, ShapeKind};

/// Default significance level.
pub const DEFAULT_ALPHA: f64 = 0.05;
/// Largest accepted significance level.
pub const MAX_ALPHA: f64 = 0.5;

/// Whether to compute a critical value from α or a p-value from a statistic.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "kebab-case")]
pub enum CalculationMode {
    #[default]
    #[display("critical value")]
    CriticalValue,
    #[display("p-value")]
    PValue,
}

/// Degrees of freedom for every supported distribution.
///
/// A distribution only reads (and only validates) the fields it uses:
/// `df` for Student's t and Chi-Square, `numerator`/`denominator` for F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreesOfFreedom {
    pub df: u32,
    pub numerator: u32,
    pub denominator: u32,
}

impl Default for DegreesOfFreedom {
    fn default() -> Self {
        Self {
            df: 10,
            numerator: 1,
            denominator: 10,
        }
    }
}

impl DegreesOfFreedom {
    /// Degrees of freedom with only `df` set away from its default.
    #[must_use]
    pub fn single(df: u32) -> Self {
        Self {
            df,
            ..Self::default()
        }
    }

    /// Degrees of freedom for an F distribution.
    #[must_use]
    pub fn pair(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
            ..Self::default()
        }
    }

    /// Checks that every degrees-of-freedom value `kind` reads is at least 1.
    pub fn validate_for(&self, kind: DistributionKind) -> Result<(), InvalidParameter> {
        let check = |name: &'static str, value: u32| {
            if value < 1 {
                Err(InvalidParameter::DegreesOfFreedom { name, value })
            } else {
                Ok(())
            }
        };
        match kind.shape() {
            ShapeKind::None => Ok(()),
            ShapeKind::Single => check("df", self.df),
            ShapeKind::Pair => {
                check("numerator", self.numerator)?;
                check("denominator", self.denominator)
            }
        }
    }
}

/// Everything an evaluation may need besides the distribution and tail mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Significance level, in `(0, 0.5]`. Used for critical values.
    pub alpha: f64,
    pub dof: DegreesOfFreedom,
    /// Observed test statistic. Used for p-values.
    pub statistic: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            dof: DegreesOfFreedom::default(),
            statistic: 0.0,
        }
    }
}

/// Checks that `alpha` lies in `(0, 0.5]`.
///
/// # Examples
///
/// ```
/// use critval_stats::validate_alpha;
///
/// assert!(validate_alpha(0.05).is_ok());
/// assert!(validate_alpha(0.5).is_ok());
/// assert!(validate_alpha(0.0).is_err());
/// assert!(validate_alpha(0.75).is_err());
/// assert!(validate_alpha(f64::NAN).is_err());
/// ```
pub fn validate_alpha(alpha: f64) -> Result<f64, InvalidParameter> {
    if alpha > 0.0 && alpha <= MAX_ALPHA {
        Ok(alpha)
    } else {
        Err(InvalidParameter::SignificanceLevel { alpha })
    }
}

/// Checks that a test statistic is a finite number.
pub fn validate_statistic(statistic: f64) -> Result<f64, InvalidParameter> {
    if statistic.is_finite() {
        Ok(statistic)
    } else {
        Err(InvalidParameter::Statistic { statistic })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unused_dof_not_validated() {
        let dof = DegreesOfFreedom {
            df: 0,
            numerator: 3,
            denominator: 7,
        };
        assert!(dof.validate_for(DistributionKind::F).is_ok());
        assert!(dof.validate_for(DistributionKind::StandardNormal).is_ok());
        assert_eq!(
            dof.validate_for(DistributionKind::StudentT),
            Err(InvalidParameter::DegreesOfFreedom {
                name: "df",
                value: 0
            })
        );
    }

    #[test]
    fn test_f_reports_offending_dof() {
        let err = DegreesOfFreedom::pair(4, 0)
            .validate_for(DistributionKind::F)
            .unwrap_err();
        assert_eq!(
            err,
            InvalidParameter::DegreesOfFreedom {
                name: "denominator",
                value: 0
            }
        );
    }

    #[test]
    fn test_alpha_bounds() {
        for alpha in [1e-4, 0.01, 0.05, 0.25, 0.5] {
            assert!(validate_alpha(alpha).is_ok(), "{alpha}");
        }
        for alpha in [-0.1, 0.0, 0.5001, 1.0, f64::INFINITY] {
            assert!(validate_alpha(alpha).is_err(), "{alpha}");
        }
    }

    #[test]
    fn test_statistic_must_be_finite() {
        assert!(validate_statistic(-3.5).is_ok());
        assert!(validate_statistic(f64::NEG_INFINITY).is_err());
        assert!(validate_statistic(f64::NAN).is_err());
    }

    #[test]
    fn test_defaults() {
        let params = Parameters::default();
        assert!((params.alpha - 0.05).abs() < f64::EPSILON);
        assert_eq!(params.dof.df, 10);
        assert_eq!(params.dof.numerator, 1);
        assert_eq!(params.dof.denominator, 10);
    }
}
