//! Critical values and p-values for common test distributions.
//!
//! This crate maps a distribution, a tail configuration and either a
//! significance level or an observed test statistic to a critical value or a
//! p-value. The quantile and cumulative functions come from [`statrs`].
//!
//! Supported distributions:
//!
//! - **Student's t** with `df` degrees of freedom
//! - **Standard normal** (z)
//! - **F** with numerator and denominator degrees of freedom
//! - **Chi-Square** with `df` degrees of freedom
//!
//! F and Chi-Square have non-negative support, so they are always evaluated
//! right-tailed, whatever tail mode is requested.
//!
//! # Modules
//!
//! - [`kind`]: the distribution enumeration and its per-distribution facts
//! - [`tail`]: tail modes and how α is split between tails
//! - [`params`]: evaluation inputs and their validation
//! - [`outcome`]: critical value / p-value results and their rendering
//! - [`evaluator`]: the evaluation entry points
//!
//! # Examples
//!
//! ## Computing a critical value
//!
//! ```
//! use critval_stats::{CalculationMode, DistributionKind, Parameters, TailMode, evaluate};
//!
//! let params = Parameters { alpha: 0.05, ..Parameters::default() };
//! let outcome = evaluate(
//!     DistributionKind::ChiSquare,
//!     TailMode::RightTailed,
//!     CalculationMode::CriticalValue,
//!     &params,
//! )
//! .unwrap();
//! assert_eq!(outcome.to_string(), "Critical Chi-Square value: 18.3070");
//! ```
//!
//! ## Computing a p-value
//!
//! ```
//! use critval_stats::{DegreesOfFreedom, DistributionKind, TailMode, p_value};
//!
//! let p = p_value(
//!     DistributionKind::StudentT,
//!     TailMode::TwoTailed,
//!     2.228_139,
//!     &DegreesOfFreedom::single(10),
//! )
//! .unwrap();
//! assert_eq!(p.to_string(), "P-value: 0.0500");
//! ```

pub use self::{evaluator::*, kind::*, outcome::*, params::*, tail::*};

pub mod evaluator;
pub mod kind;
pub mod outcome;
pub mod params;
mod primitives;
pub mod tail;

/// Error returned by an evaluation.
#[derive(
    Debug,
    Clone,
    PartialEq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum EvaluationError {
    #[display("{_0}")]
    InvalidParameter(#[error(not(source))] InvalidParameter),
    #[display("{_0}")]
    Domain(#[error(not(source))] DomainError),
}

/// An input outside its accepted range.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidParameter {
    #[display("significance level must be in (0, 0.5], got {alpha}")]
    SignificanceLevel { alpha: f64 },
    #[display("{name} degrees of freedom must be at least 1, got {value}")]
    DegreesOfFreedom { name: &'static str, value: u32 },
    #[display("test statistic must be a finite number, got {statistic}")]
    Statistic { statistic: f64 },
}

/// A valid input the distribution cannot be evaluated at.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum DomainError {
    #[display("{kind} has non-negative support, test statistic {statistic} is out of its domain")]
    NegativeStatistic {
        kind: DistributionKind,
        statistic: f64,
    },
    #[display("{kind} cannot be evaluated: {reason}")]
    Unsupported {
        kind: DistributionKind,
        reason: String,
    },
}
