//! Tail modes and how a significance level is spread over them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DistributionKind;

/// Which tail (or tails) of the distribution a test rejects in.
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
pub enum TailMode {
    #[default]
    #[display("Right-Tailed")]
    #[serde(alias = "right")]
    RightTailed,
    #[display("Left-Tailed")]
    #[serde(alias = "left")]
    LeftTailed,
    #[display("Two-Tailed")]
    #[serde(alias = "two")]
    TwoTailed,
}

impl TailMode {
    pub const ALL: [Self; 3] = [Self::RightTailed, Self::LeftTailed, Self::TwoTailed];

    /// Returns the tail mode actually used for `kind`.
    ///
    /// Distributions without left-tail support are always evaluated right-tailed,
    /// whatever was requested.
    ///
    /// # Examples
    ///
    /// ```
    /// use critval_stats::{DistributionKind, TailMode};
    ///
    /// assert_eq!(
    ///     TailMode::TwoTailed.effective_for(DistributionKind::F),
    ///     TailMode::RightTailed
    /// );
    /// assert_eq!(
    ///     TailMode::TwoTailed.effective_for(DistributionKind::StudentT),
    ///     TailMode::TwoTailed
    /// );
    /// ```
    #[must_use]
    pub const fn effective_for(self, kind: DistributionKind) -> Self {
        if kind.supports_left_tail() {
            self
        } else {
            Self::RightTailed
        }
    }

    /// Splits the significance level across the rejected tails.
    #[must_use]
    pub fn split_alpha(self, alpha: f64) -> f64 {
        match self {
            Self::RightTailed | Self::LeftTailed => alpha,
            Self::TwoTailed => alpha / 2.0,
        }
    }

    /// Short suffix used in rendered one-sided critical values.
    #[must_use]
    pub const fn side_label(self) -> Option<&'static str> {
        match self {
            Self::RightTailed => Some("Right"),
            Self::LeftTailed => Some("Left"),
            Self::TwoTailed => None,
        }
    }
}

/// Error returned when a tail mode name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown tail mode {input:?} (expected one of: right, left, two)")]
pub struct ParseTailError {
    input: String,
}

impl FromStr for TailMode {
    type Err = ParseTailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tail = match s.trim().to_ascii_lowercase().as_str() {
            "right" | "right-tailed" | "upper" => Self::RightTailed,
            "left" | "left-tailed" | "lower" => Self::LeftTailed,
            "two" | "two-tailed" | "both" => Self::TwoTailed,
            _ => {
                return Err(ParseTailError {
                    input: s.to_owned(),
                });
            }
        };
        Ok(tail)
    }
}
