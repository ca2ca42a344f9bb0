// Shared plumbing for command handlers: parameter loading and JSON output.

use std::path::Path;

use miette::{IntoDiagnostic, WrapErr};
use serde::Serialize;
use snowtune_params::{preset, Parameters};

use crate::cli::ParamsSource;

/// Default preset when a command is given neither `--preset` nor `--params`.
const DEFAULT_PRESET: &str = "mainnet";

pub(crate) fn load_params(source: &ParamsSource) -> miette::Result<Parameters> {
    match (&source.preset, &source.params) {
        (_, Some(path)) => read_params_file(path),
        (Some(name), None) => Ok(preset(name)?),
        (None, None) => Ok(preset(DEFAULT_PRESET)?),
    }
}

/// Decodes and validates a JSON parameter file.
pub(crate) fn read_params_file(path: &Path) -> miette::Result<Parameters> {
    let data = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let params = Parameters::from_json(&data)?;
    params.validate()?;
    Ok(params)
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> miette::Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{json}");
    Ok(())
}
