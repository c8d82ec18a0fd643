use std::path::PathBuf;

use anyhow::Context as _;
use critval_stats::{
    CalculationMode, DEFAULT_ALPHA, DegreesOfFreedom, DistributionKind, Parameters, TailMode,
};

use crate::util::Output;

const RIGHT_TAIL_ONLY_NOTE: &str =
    "Note: Only Right-Tailed critical values are shown for this distribution.";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DistributionArg {
    /// Distribution: t, z, f or chi2
    #[arg(long, short = 'd', default_value = "t")]
    pub(crate) distribution: DistributionKind,
    /// Tail mode: right, left or two (F and Chi-Square are always right-tailed)
    #[arg(long, default_value = "right")]
    pub(crate) tail: TailMode,
    /// Degrees of freedom (t and Chi-Square)
    #[arg(long, default_value_t = 10)]
    pub(crate) df: u32,
    /// Numerator degrees of freedom (F)
    #[arg(long, default_value_t = 1)]
    pub(crate) dfn: u32,
    /// Denominator degrees of freedom (F)
    #[arg(long, default_value_t = 10)]
    pub(crate) dfd: u32,
}

impl Default for DistributionArg {
    fn default() -> Self {
        let dof = DegreesOfFreedom::default();
        Self {
            distribution: DistributionKind::StudentT,
            tail: TailMode::RightTailed,
            df: dof.df,
            dfn: dof.numerator,
            dfd: dof.denominator,
        }
    }
}

impl DistributionArg {
    fn dof(&self) -> DegreesOfFreedom {
        DegreesOfFreedom {
            df: self.df,
            numerator: self.dfn,
            denominator: self.dfd,
        }
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct OutputArg {
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
    /// Output file path (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CriticalArg {
    #[clap(flatten)]
    distribution: DistributionArg,
    /// Significance level alpha, in (0, 0.5]
    #[arg(long, short = 'a', default_value_t = DEFAULT_ALPHA)]
    alpha: f64,
    #[clap(flatten)]
    output: OutputArg,
}

impl Default for CriticalArg {
    fn default() -> Self {
        Self {
            distribution: DistributionArg::default(),
            alpha: DEFAULT_ALPHA,
            output: OutputArg::default(),
        }
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PValueArg {
    #[clap(flatten)]
    distribution: DistributionArg,
    /// Observed test statistic (non-negative for F and Chi-Square)
    #[arg(long, short = 's', default_value_t = 0.0, allow_hyphen_values = true)]
    statistic: f64,
    #[clap(flatten)]
    output: OutputArg,
}

pub(crate) fn run_critical(arg: &CriticalArg) -> anyhow::Result<()> {
    let CriticalArg {
        distribution,
        alpha,
        output,
    } = arg;

    let params = Parameters {
        alpha: *alpha,
        dof: distribution.dof(),
        ..Parameters::default()
    };
    evaluate_and_print(distribution, CalculationMode::CriticalValue, &params, output)
}

pub(crate) fn run_p_value(arg: &PValueArg) -> anyhow::Result<()> {
    let PValueArg {
        distribution,
        statistic,
        output,
    } = arg;

    let params = Parameters {
        statistic: *statistic,
        dof: distribution.dof(),
        ..Parameters::default()
    };
    evaluate_and_print(distribution, CalculationMode::PValue, &params, output)
}

fn evaluate_and_print(
    distribution: &DistributionArg,
    mode: CalculationMode,
    params: &Parameters,
    output: &OutputArg,
) -> anyhow::Result<()> {
    let kind = distribution.distribution;
    let tail = distribution.tail;
    if tail.effective_for(kind) != tail {
        tracing::warn!(%kind, requested = %tail, "tail mode ignored, evaluating right-tailed");
    }

    let outcome = critval_stats::evaluate(kind, tail, mode, params)
        .with_context(|| format!("Failed to compute {mode} for {kind}"))?;

    let mut writer = Output::from_output_path(output.output.clone())?;
    if output.json {
        writer.write_json(outcome)?;
    } else {
        if mode.is_critical_value() && !kind.supports_left_tail() {
            eprintln!("{RIGHT_TAIL_ONLY_NOTE}");
        }
        writer.write_lines([outcome.to_string()])?;
    }
    if let Output::File { path, .. } = &writer {
        tracing::info!("wrote {mode} to {}", path.display());
    }
    Ok(())
}
