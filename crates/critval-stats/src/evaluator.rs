//! Critical value and p-value evaluation.

use crate::{
    CalculationMode, CriticalValue, DegreesOfFreedom, DistributionKind, DomainError,
    EvaluationError, Outcome, PValue, Parameters, TailMode, primitives::Primitives,
    validate_alpha, validate_statistic,
};

/// Evaluates one request.
///
/// Dispatches to [`critical_value`] or [`p_value`] depending on `mode`,
/// reading only the parameters that mode and `kind` need.
///
/// # Examples
///
/// ```
/// use critval_stats::{CalculationMode, DistributionKind, Parameters, TailMode, evaluate};
///
/// let outcome = evaluate(
///     DistributionKind::StandardNormal,
///     TailMode::TwoTailed,
///     CalculationMode::CriticalValue,
///     &Parameters::default(),
/// )
/// .unwrap();
/// assert_eq!(outcome.to_string(), "Critical z-value: ±1.9600");
/// ```
pub fn evaluate(
    kind: DistributionKind,
    tail: TailMode,
    mode: CalculationMode,
    params: &Parameters,
) -> Result<Outcome, EvaluationError> {
    match mode {
        CalculationMode::CriticalValue => {
            critical_value(kind, tail, params.alpha, &params.dof).map(Outcome::from)
        }
        CalculationMode::PValue => {
            p_value(kind, tail, params.statistic, &params.dof).map(Outcome::from)
        }
    }
}

/// Computes the critical value of `kind` at significance level `alpha`.
///
/// Two-tailed tests split `alpha` evenly between both tails, so the reported
/// bound is the `1 - alpha / 2` quantile. Distributions without left-tail
/// support are always evaluated right-tailed.
///
/// # Examples
///
/// ```
/// use critval_stats::{DegreesOfFreedom, DistributionKind, TailMode, critical_value};
///
/// let cv = critical_value(
///     DistributionKind::StudentT,
///     TailMode::RightTailed,
///     0.05,
///     &DegreesOfFreedom::single(10),
/// )
/// .unwrap();
/// assert!((cv.value() - 1.8125).abs() < 1e-4);
/// ```
pub fn critical_value(
    kind: DistributionKind,
    requested_tail: TailMode,
    alpha: f64,
    dof: &DegreesOfFreedom,
) -> Result<CriticalValue, EvaluationError> {
    let alpha = validate_alpha(alpha)?;
    dof.validate_for(kind)?;

    let tail = requested_tail.effective_for(kind);
    if tail != requested_tail {
        tracing::debug!(%kind, %requested_tail, "evaluating right-tailed only");
    }
    let effective_alpha = tail.split_alpha(alpha);
    let quantile = (Primitives::of(kind).upper_quantile)(dof, effective_alpha)?;
    tracing::debug!(%kind, %tail, alpha, effective_alpha, quantile, "critical value computed");

    Ok(CriticalValue {
        kind,
        tail,
        alpha,
        quantile,
    })
}

/// Computes the p-value of an observed `statistic` under `kind`.
///
/// * right-tailed: `1 - F(x)`
/// * left-tailed: `F(x)`
/// * two-tailed: `2 * (1 - F(|x|))`, capped at 1
///
/// F and Chi-Square are always right-tailed and reject negative statistics.
pub fn p_value(
    kind: DistributionKind,
    requested_tail: TailMode,
    statistic: f64,
    dof: &DegreesOfFreedom,
) -> Result<PValue, EvaluationError> {
    let statistic = validate_statistic(statistic)?;
    dof.validate_for(kind)?;
    if !kind.supports_left_tail() && statistic < 0.0 {
        return Err(DomainError::NegativeStatistic { kind, statistic }.into());
    }

    let tail = requested_tail.effective_for(kind);
    let prims = Primitives::of(kind);
    let p_value = match tail {
        TailMode::RightTailed => (prims.sf)(dof, statistic)?,
        TailMode::LeftTailed => (prims.cdf)(dof, statistic)?,
        TailMode::TwoTailed => 2.0 * (prims.sf)(dof, statistic.abs())?,
    }
    .clamp(0.0, 1.0);
    if p_value.is_nan() {
        return Err(DomainError::Unsupported {
            kind,
            reason: format!("no finite p-value for statistic {statistic}"),
        }
        .into());
    }
    tracing::debug!(%kind, %tail, statistic, p_value, "p-value computed");

    Ok(PValue {
        kind,
        tail,
        statistic,
        p_value,
    })
}
