use std::path::PathBuf;

use anyhow::bail;

use crate::{
    schema::request::BatchRecord,
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct BatchArg {
    /// Path to the requests file (JSON array)
    #[arg(long)]
    input: PathBuf,
    /// Output file path (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Fail if any request could not be evaluated
    #[arg(long)]
    strict: bool,
}

pub(crate) fn run(arg: &BatchArg) -> anyhow::Result<()> {
    let BatchArg {
        input,
        output,
        strict,
    } = arg;

    let requests = util::read_requests_file(input)?;
    tracing::info!("Loaded {} requests from {}", requests.len(), input.display());

    let records = requests
        .into_iter()
        .enumerate()
        .map(|(index, request)| {
            let result = request.evaluate();
            if let Err(err) = &result {
                tracing::warn!(index, %err, "request failed");
            }
            BatchRecord::new(request, result)
        })
        .collect::<Vec<_>>();
    let failed = records.iter().filter(|record| record.is_error()).count();
    tracing::info!("Evaluated {} requests ({failed} failed)", records.len());

    let mut output = Output::from_output_path(output.clone())?;
    output.write_json(&records)?;

    if *strict && failed > 0 {
        bail!("{failed} of {} requests failed", records.len());
    }
    Ok(())
}
