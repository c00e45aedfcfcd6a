mod help;
mod logging;

use anyhow::Context;
use help::HELP_TEXT;
use refactor_core::engine::external::{ExternalConfigLoader, ExternalEngineBuilder};
use refactor_core::paths::current_working_dir;
use refactor_core::{Invocation, RefactorError, execute, prepare};
use std::ffi::OsString;
use std::io::Write;

pub fn run_from_env() -> i32 {
    match run(std::env::args_os().skip(1)) {
        Ok(code) => code,
        Err(error) => {
            let refactor_error = error.as_refactor_error();
            eprintln!("{}", refactor_error.diagnostic_line());
            if let Some(hint) = refactor_error.hint_line() {
                eprintln!("{}", hint);
            }
            eprintln!("{}", refactor_error.fatal_exit_line());
            refactor_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let tokens = utf8_tokens(args)?;
    logging::init(logging::progress_from_tokens(&tokens));
    let working_dir = current_working_dir()?;

    let request = match prepare(&tokens, &working_dir)? {
        Invocation::Help => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(HELP_TEXT.as_bytes())
                .context("failed to write help text")?;
            return Ok(0);
        }
        Invocation::Run(request) => request,
    };

    let builder = ExternalEngineBuilder::from_env();
    tracing::debug!(engine = %builder.program().display(), "using analysis engine");
    let report = execute(&request, &ExternalConfigLoader, &builder)?;

    println!(
        "Renamed {} to {} in {:.2}s.",
        request.rule.from_symbol(),
        request.rule.to_symbol(),
        report.elapsed.as_secs_f64()
    );
    Ok(0)
}

fn utf8_tokens<I, S>(args: I) -> Result<Vec<String>, RefactorError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    args.into_iter()
        .map(|arg| {
            arg.into().into_string().map_err(|raw| {
                RefactorError::usage(
                    "USAGE.NON_UTF8_ARGUMENT",
                    format!("Argument {:?} is not valid UTF-8", raw),
                )
            })
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Refactor(#[from] RefactorError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_refactor_error(&self) -> RefactorError {
        match self {
            Self::Refactor(error) => error.clone(),
            Self::Internal(error) => RefactorError::internal("SYS.CLI", format!("{error:#}")),
        }
    }
}
