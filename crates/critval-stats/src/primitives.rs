//! Quantile and cumulative functions backed by `statrs`.
//!
//! Each [`DistributionKind`] maps to a [`Primitives`] record of plain function
//! pointers, so callers dispatch through a table lookup instead of matching on
//! the distribution at every step.

use std::f64::consts::SQRT_2;

use statrs::{
    distribution::{ChiSquared, Continuous, ContinuousCDF, FisherSnedecor, Normal, StudentsT},
    function::erf::erfc_inv,
};

use crate::{DegreesOfFreedom, DistributionKind, DomainError};

const NEWTON_MAX_STEPS: usize = 64;
const NEWTON_TOLERANCE: f64 = 1e-12;

/// Degrees of freedom from which quantiles are seeded by a closed-form
/// approximation; `statrs`' inverse regularized beta and gamma functions stall
/// or return NaN well before `u32::MAX`.
const LARGE_DF: f64 = 1e5;

type PrimitiveFn = fn(&DegreesOfFreedom, f64) -> Result<f64, DomainError>;

/// The numerical primitives of one distribution.
#[derive(Clone, Copy)]
pub(crate) struct Primitives {
    /// `x` such that `P(X > x) = tail_probability`, i.e. `InverseCDF(1 - tail_probability)`.
    pub(crate) upper_quantile: PrimitiveFn,
    /// `P(X <= x)`.
    pub(crate) cdf: PrimitiveFn,
    /// `P(X > x)`.
    pub(crate) sf: PrimitiveFn,
}

impl Primitives {
    pub(crate) fn of(kind: DistributionKind) -> Self {
        match kind {
            DistributionKind::StudentT => Self::table::<StudentsT>(),
            DistributionKind::StandardNormal => Self::table::<Normal>(),
            DistributionKind::F => Self::table::<FisherSnedecor>(),
            DistributionKind::ChiSquare => Self::table::<ChiSquared>(),
        }
    }

    fn table<D>() -> Self
    where
        D: Shaped,
    {
        Self {
            upper_quantile: upper_quantile::<D>,
            cdf: cdf::<D>,
            sf: sf::<D>,
        }
    }
}

/// A `statrs` distribution that can be built from [`DegreesOfFreedom`].
trait Shaped: Continuous<f64, f64> + ContinuousCDF<f64, f64> + Sized {
    const KIND: DistributionKind;

    fn build(dof: &DegreesOfFreedom) -> Result<Self, String>;

    fn from_dof(dof: &DegreesOfFreedom) -> Result<Self, DomainError> {
        Self::build(dof).map_err(|reason| DomainError::Unsupported {
            kind: Self::KIND,
            reason,
        })
    }

    /// Starting point for [`refine_upper_quantile`].
    fn upper_seed(&self, tail_probability: f64) -> f64 {
        self.inverse_cdf(1.0 - tail_probability)
    }
}

impl Shaped for StudentsT {
    const KIND: DistributionKind = DistributionKind::StudentT;

    fn build(dof: &DegreesOfFreedom) -> Result<Self, String> {
        StudentsT::new(0.0, 1.0, f64::from(dof.df)).map_err(|err| err.to_string())
    }

    fn upper_seed(&self, tail_probability: f64) -> f64 {
        let df = self.freedom();
        if df < LARGE_DF {
            return self.inverse_cdf(1.0 - tail_probability);
        }
        // Cornish-Fisher expansion around the normal quantile.
        let z = normal_upper_quantile(tail_probability);
        z + (z.powi(3) + z) / (4.0 * df)
    }
}

impl Shaped for Normal {
    const KIND: DistributionKind = DistributionKind::StandardNormal;

    fn build(_dof: &DegreesOfFreedom) -> Result<Self, String> {
        Normal::new(0.0, 1.0).map_err(|err| err.to_string())
    }
}

impl Shaped for FisherSnedecor {
    const KIND: DistributionKind = DistributionKind::F;

    fn build(dof: &DegreesOfFreedom) -> Result<Self, String> {
        FisherSnedecor::new(f64::from(dof.numerator), f64::from(dof.denominator))
            .map_err(|err| err.to_string())
    }

    fn upper_seed(&self, tail_probability: f64) -> f64 {
        let (dfn, dfd) = (self.freedom_1(), self.freedom_2());
        if dfn.max(dfd) < LARGE_DF {
            return self.inverse_cdf(1.0 - tail_probability);
        }
        // Paulson's cube-root approximation, solved for F^(1/3).
        let z = normal_upper_quantile(tail_probability);
        let (a, b) = (2.0 / (9.0 * dfn), 2.0 / (9.0 * dfd));
        let qa = (1.0 - b).powi(2) - z * z * b;
        let qb = (1.0 - a) * (1.0 - b);
        let qc = (1.0 - a).powi(2) - z * z * a;
        let discriminant = qb * qb - qa * qc;
        if qa <= 0.0 || discriminant < 0.0 {
            return f64::NAN;
        }
        ((qb + discriminant.sqrt()) / qa).powi(3)
    }
}

impl Shaped for ChiSquared {
    const KIND: DistributionKind = DistributionKind::ChiSquare;

    fn build(dof: &DegreesOfFreedom) -> Result<Self, String> {
        ChiSquared::new(f64::from(dof.df)).map_err(|err| err.to_string())
    }

    fn upper_seed(&self, tail_probability: f64) -> f64 {
        let df = self.freedom();
        if df < LARGE_DF {
            return self.inverse_cdf(1.0 - tail_probability);
        }
        // Wilson-Hilferty
        let z = normal_upper_quantile(tail_probability);
        let h = 2.0 / (9.0 * df);
        df * (1.0 - h + z * h.sqrt()).powi(3)
    }
}

fn normal_upper_quantile(tail_probability: f64) -> f64 {
    SQRT_2 * erfc_inv(2.0 * tail_probability)
}

fn upper_quantile<D>(dof: &DegreesOfFreedom, tail_probability: f64) -> Result<f64, DomainError>
where
    D: Shaped,
{
    let dist = D::from_dof(dof)?;
    let seed = dist.upper_seed(tail_probability);
    let quantile = refine_upper_quantile(&dist, tail_probability, seed);
    if !quantile.is_finite() {
        return Err(DomainError::Unsupported {
            kind: D::KIND,
            reason: format!("no finite quantile for tail probability {tail_probability}"),
        });
    }
    Ok(quantile)
}

fn cdf<D>(dof: &DegreesOfFreedom, x: f64) -> Result<f64, DomainError>
where
    D: Shaped,
{
    Ok(D::from_dof(dof)?.cdf(x))
}

fn sf<D>(dof: &DegreesOfFreedom, x: f64) -> Result<f64, DomainError>
where
    D: Shaped,
{
    Ok(D::from_dof(dof)?.sf(x))
}

/// Polishes a quantile estimate with Newton steps on `sf(x) - tail_probability`.
///
/// Working on the survival function keeps full precision for small tail
/// probabilities, where `1 - cdf(x)` would cancel. Upper quantiles requested
/// here never lie left of zero, so a step that overshoots below zero is
/// replaced by halving the current point.
fn refine_upper_quantile<D>(dist: &D, tail_probability: f64, estimate: f64) -> f64
where
    D: Continuous<f64, f64> + ContinuousCDF<f64, f64>,
{
    if !estimate.is_finite() {
        return estimate;
    }

    let mut x = estimate;
    for _ in 0..NEWTON_MAX_STEPS {
        let density = dist.pdf(x);
        if !(density.is_finite() && density > 0.0) {
            break;
        }
        let mut next = x + (dist.sf(x) - tail_probability) / density;
        if next < 0.0 {
            next = x / 2.0;
        }
        if !next.is_finite() {
            break;
        }
        let converged = (next - x).abs() <= NEWTON_TOLERANCE * x.abs().max(1.0);
        x = next;
        if converged {
            break;
        }
    }

    let residual = |v: f64| (dist.sf(v) - tail_probability).abs();
    if residual(x) <= residual(estimate) {
        x
    } else {
        estimate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "got {actual}, expected {expected}"
        );
    }

    #[test]
    fn test_upper_quantiles_match_tables() {
        let dof = DegreesOfFreedom::default();
        let tests = [
            (DistributionKind::StandardNormal, 0.05, 1.644_854),
            (DistributionKind::StandardNormal, 0.025, 1.959_964),
            (DistributionKind::StudentT, 0.05, 1.812_461),
            (DistributionKind::StudentT, 0.025, 2.228_139),
            (DistributionKind::ChiSquare, 0.05, 18.307_038),
            (DistributionKind::F, 0.05, 4.964_603),
        ];
        for (kind, alpha, expected) in tests {
            let q = (Primitives::of(kind).upper_quantile)(&dof, alpha).unwrap();
            assert_close(q, expected, 1e-5);
        }
    }

    #[test]
    fn test_f_quantile_with_larger_numerator() {
        let q = (Primitives::of(DistributionKind::F).upper_quantile)(
            &DegreesOfFreedom::pair(5, 20),
            0.01,
        )
        .unwrap();
        assert_close(q, 4.1027, 1e-3);
    }

    #[test]
    fn test_cdf_and_sf_are_complementary() {
        let dof = DegreesOfFreedom::pair(3, 12);
        for kind in DistributionKind::ALL {
            let prims = Primitives::of(kind);
            for x in [0.25, 1.0, 2.5, 7.0] {
                let lower = (prims.cdf)(&dof, x).unwrap();
                let upper = (prims.sf)(&dof, x).unwrap();
                assert_close(lower + upper, 1.0, 1e-9);
            }
        }
    }

    #[test]
    fn test_small_tail_probability_keeps_precision() {
        let dof = DegreesOfFreedom::single(4);
        let prims = Primitives::of(DistributionKind::ChiSquare);
        let q = (prims.upper_quantile)(&dof, 1e-8).unwrap();
        let back = (prims.sf)(&dof, q).unwrap();
        assert!((back / 1e-8 - 1.0).abs() < 1e-4, "sf(q) = {back}");
    }

    #[test]
    fn test_large_df_seeds_are_close() {
        let z = normal_upper_quantile(0.05);
        assert_close(z, 1.644_854, 1e-6);

        let t = StudentsT::new(0.0, 1.0, 2e5).unwrap();
        assert_close(t.upper_seed(0.05), t.inverse_cdf(0.95), 1e-6);

        let chi2 = ChiSquared::new(2e5).unwrap();
        let seed = chi2.upper_seed(0.05);
        assert!((seed / chi2.inverse_cdf(0.95) - 1.0).abs() < 1e-4, "seed = {seed}");
    }

    #[test]
    fn test_large_df_quantiles_are_finite() {
        let tests = [
            (DistributionKind::StudentT, DegreesOfFreedom::single(100_000_000)),
            (DistributionKind::ChiSquare, DegreesOfFreedom::single(10_000_000)),
            (DistributionKind::ChiSquare, DegreesOfFreedom::single(u32::MAX)),
            (DistributionKind::F, DegreesOfFreedom::pair(1, 100_000_000)),
            (DistributionKind::F, DegreesOfFreedom::pair(10_000_000, 10_000_000)),
        ];
        for (kind, dof) in tests {
            match (Primitives::of(kind).upper_quantile)(&dof, 0.05) {
                Ok(q) => assert!(q.is_finite() && q > 0.0, "{kind} {dof:?}: {q}"),
                Err(err) => assert!(matches!(err, DomainError::Unsupported { .. }), "{err}"),
            }
        }
    }
}
