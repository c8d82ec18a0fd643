//! The distributions the evaluator knows about.
//!
//! Every per-distribution fact (display labels, whether signed tails make
//! sense, which degrees of freedom are consumed) lives in one table keyed by
//! [`DistributionKind`], so the evaluator never branches on distribution names.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named continuous distribution.
///
/// # Examples
///
/// ```
/// use critval_stats::DistributionKind;
///
/// let kind: DistributionKind = "chi2".parse().unwrap();
/// assert_eq!(kind, DistributionKind::ChiSquare);
/// assert!(!kind.supports_left_tail());
/// assert_eq!(kind.to_string(), "Chi-Square distribution");
/// ```
#[derive(
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
pub enum DistributionKind {
    /// Student's t distribution with `df` degrees of freedom.
    #[display("t-distribution")]
    #[serde(alias = "t")]
    StudentT,
    /// Standard normal distribution (z).
    #[display("z-distribution")]
    #[serde(alias = "z", alias = "normal")]
    StandardNormal,
    /// Fisher-Snedecor F distribution with numerator and denominator degrees of freedom.
    #[display("F-distribution")]
    F,
    /// Chi-Square distribution with `df` degrees of freedom.
    #[display("Chi-Square distribution")]
    #[serde(alias = "chi2", alias = "chi-squared")]
    ChiSquare,
}

/// Which degrees-of-freedom inputs a distribution consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// No shape parameters.
    None,
    /// A single `df`.
    Single,
    /// Numerator and denominator degrees of freedom.
    Pair,
}

/// Static facts about one [`DistributionKind`].
#[derive(Debug, Clone, Copy)]
pub struct KindInfo {
    /// Whether left-tailed and two-tailed evaluation is meaningful.
    ///
    /// Distributions with non-negative support only report right-tailed values.
    pub supports_left_tail: bool,
    /// Label used in the rendered critical value line, e.g. `t-value`.
    pub value_label: &'static str,
    /// Short name accepted on the command line and used in table headers.
    pub short_name: &'static str,
    /// Shape parameters this distribution needs.
    pub shape: ShapeKind,
}

const STUDENT_T_INFO: KindInfo = KindInfo {
    supports_left_tail: true,
    value_label: "t-value",
    short_name: "t",
    shape: ShapeKind::Single,
};

const STANDARD_NORMAL_INFO: KindInfo = KindInfo {
    supports_left_tail: true,
    value_label: "z-value",
    short_name: "z",
    shape: ShapeKind::None,
};

const F_INFO: KindInfo = KindInfo {
    supports_left_tail: false,
    value_label: "F-value",
    short_name: "f",
    shape: ShapeKind::Pair,
};

const CHI_SQUARE_INFO: KindInfo = KindInfo {
    supports_left_tail: false,
    value_label: "Chi-Square value",
    short_name: "chi2",
    shape: ShapeKind::Single,
};

impl DistributionKind {
    /// All kinds, in the order they are presented to users.
    pub const ALL: [Self; 4] = [Self::StudentT, Self::StandardNormal, Self::F, Self::ChiSquare];

    /// Returns the static facts for this kind.
    #[must_use]
    pub const fn info(self) -> &'static KindInfo {
        match self {
            Self::StudentT => &STUDENT_T_INFO,
            Self::StandardNormal => &STANDARD_NORMAL_INFO,
            Self::F => &F_INFO,
            Self::ChiSquare => &CHI_SQUARE_INFO,
        }
    }

    #[must_use]
    pub const fn supports_left_tail(self) -> bool {
        self.info().supports_left_tail
    }

    #[must_use]
    pub const fn value_label(self) -> &'static str {
        self.info().value_label
    }

    #[must_use]
    pub const fn short_name(self) -> &'static str {
        self.info().short_name
    }

    #[must_use]
    pub const fn shape(self) -> ShapeKind {
        self.info().shape
    }
}

/// Error returned when a distribution name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown distribution {input:?} (expected one of: t, z, f, chi2)")]
pub struct ParseKindError {
    input: String,
}

impl FromStr for DistributionKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "t" | "student-t" | "studentt" | "t-distribution" => Self::StudentT,
            "z" | "normal" | "standard-normal" | "standardnormal" | "z-distribution" => {
                Self::StandardNormal
            }
            "f" | "f-distribution" => Self::F,
            "chi2" | "chi-square" | "chisquare" | "chi-squared" | "chi-square distribution" => {
                Self::ChiSquare
            }
            _ => {
                return Err(ParseKindError {
                    input: s.to_owned(),
                });
            }
        };
        Ok(kind)
    }
}
