//! Critical value tables
//!
//! Rows vary the degrees of freedom (the denominator for F, a single row for
//! the standard normal), columns vary the significance level.

use std::path::PathBuf;

use anyhow::{Context as _, bail};
use critval_stats::{CriticalValue, DegreesOfFreedom, DistributionKind, ShapeKind, TailMode};
use serde::Serialize;

use crate::util::Output;

const LABEL_WIDTH: usize = 8;
const VALUE_WIDTH: usize = 12;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TableArg {
    /// Distribution: t, z, f or chi2
    #[arg(long, short = 'd', default_value = "t")]
    distribution: DistributionKind,
    /// Tail mode: right, left or two (F and Chi-Square are always right-tailed)
    #[arg(long, default_value = "right")]
    tail: TailMode,
    /// Significance levels, comma separated
    #[arg(
        long,
        short = 'a',
        value_delimiter = ',',
        default_values_t = vec![0.10, 0.05, 0.025, 0.01]
    )]
    alpha: Vec<f64>,
    /// First degrees of freedom row (denominator for F)
    #[arg(long, default_value_t = 1)]
    df_from: u32,
    /// Last degrees of freedom row (denominator for F)
    #[arg(long, default_value_t = 30)]
    df_to: u32,
    /// Numerator degrees of freedom (F)
    #[arg(long, default_value_t = 1)]
    dfn: u32,
    /// Print the table as JSON
    #[arg(long)]
    json: bool,
    /// Output file path (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct CriticalValueTable {
    distribution: DistributionKind,
    tail: TailMode,
    alphas: Vec<f64>,
    rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Serialize)]
struct TableRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    df: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    numerator: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    denominator: Option<u32>,
    #[serde(skip)]
    critical_values: Vec<CriticalValue>,
    values: Vec<f64>,
}

impl TableRow {
    fn label(&self) -> String {
        match (self.df, self.numerator, self.denominator) {
            (Some(df), _, _) => df.to_string(),
            (None, Some(dfn), Some(dfd)) => format!("{dfn},{dfd}"),
            _ => "-".to_string(),
        }
    }
}

pub(crate) fn run(arg: &TableArg) -> anyhow::Result<()> {
    let table = build_table(arg)?;

    let mut output = Output::from_output_path(arg.output.clone())?;
    if arg.json {
        output.write_json(&table)?;
    } else {
        output.write_lines(render_table(&table))?;
    }
    Ok(())
}

fn dof_rows(arg: &TableArg) -> anyhow::Result<Vec<DegreesOfFreedom>> {
    if arg.df_from > arg.df_to {
        bail!(
            "--df-from ({}) must not exceed --df-to ({})",
            arg.df_from,
            arg.df_to
        );
    }
    let rows = match arg.distribution.shape() {
        ShapeKind::None => vec![DegreesOfFreedom::default()],
        ShapeKind::Single => (arg.df_from..=arg.df_to)
            .map(DegreesOfFreedom::single)
            .collect(),
        ShapeKind::Pair => (arg.df_from..=arg.df_to)
            .map(|dfd| DegreesOfFreedom::pair(arg.dfn, dfd))
            .collect(),
    };
    Ok(rows)
}

fn build_table(arg: &TableArg) -> anyhow::Result<CriticalValueTable> {
    if arg.alpha.is_empty() {
        bail!("at least one significance level is required");
    }
    let kind = arg.distribution;
    let tail = arg.tail.effective_for(kind);
    if tail != arg.tail {
        tracing::warn!(%kind, requested = %arg.tail, "tail mode ignored, evaluating right-tailed");
    }

    let dof_rows = dof_rows(arg)?;
    tracing::debug!(%kind, %tail, rows = dof_rows.len(), columns = arg.alpha.len(), "building table");

    let rows = dof_rows
        .into_iter()
        .map(|dof| -> anyhow::Result<TableRow> {
            let critical_values = arg
                .alpha
                .iter()
                .map(|&alpha| {
                    critval_stats::critical_value(kind, tail, alpha, &dof).with_context(|| {
                        format!("Failed to compute critical value at alpha={alpha}")
                    })
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            let (df, numerator, denominator) = match kind.shape() {
                ShapeKind::None => (None, None, None),
                ShapeKind::Single => (Some(dof.df), None, None),
                ShapeKind::Pair => (None, Some(dof.numerator), Some(dof.denominator)),
            };
            Ok(TableRow {
                df,
                numerator,
                denominator,
                values: critical_values.iter().map(CriticalValue::value).collect(),
                critical_values,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CriticalValueTable {
        distribution: kind,
        tail,
        alphas: arg.alpha.clone(),
        rows,
    })
}

fn render_table(table: &CriticalValueTable) -> Vec<String> {
    let label_col = match table.distribution.shape() {
        ShapeKind::None => "",
        ShapeKind::Single => "df",
        ShapeKind::Pair => "dfn,dfd",
    };

    let mut lines = Vec::with_capacity(table.rows.len() + 3);
    lines.push(format!(
        "Critical {} ({})",
        table.distribution.value_label(),
        table.tail
    ));

    let header = table
        .alphas
        .iter()
        .map(|alpha| format!(" {:>VALUE_WIDTH$}", format!("α={alpha}")))
        .collect::<String>();
    lines.push(format!("  {label_col:<LABEL_WIDTH$}{header}"));
    lines.push(format!(
        "  {}",
        "-".repeat(LABEL_WIDTH + (VALUE_WIDTH + 1) * table.alphas.len())
    ));

    for row in &table.rows {
        let cells = row
            .critical_values
            .iter()
            .map(|cv| {
                let cell = match cv.bounds() {
                    Some((_, upper)) => format!("±{upper:.4}"),
                    None => format!("{:.4}", cv.value()),
                };
                format!(" {cell:>VALUE_WIDTH$}")
            })
            .collect::<String>();
        lines.push(format!("  {:<LABEL_WIDTH$}{cells}", row.label()));
    }
    lines
}
