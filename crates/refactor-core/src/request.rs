use crate::domain::{ProgressMode, RefactorResult};
use crate::engine::EngineSettings;
use crate::options::{ParsedOptions, resolve, validate};
use crate::paths::resolve_paths;
use crate::rule::{RenameRule, compile};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything the engine needs for one rename run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub root_path: PathBuf,
    pub config_path: Option<PathBuf>,
    pub thread_count: NonZeroUsize,
    pub debug: bool,
    pub progress: ProgressMode,
    pub find_unused: bool,
    pub rule: RenameRule,
}

impl RunRequest {
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            find_unused: self.find_unused,
            thread_count: self.thread_count,
            progress: self.progress,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Run(RunRequest),
}

/// Turns raw command-line tokens into either a help request or a run.
///
/// Every usage, path and rule error surfaces here, before any engine is
/// constructed.
pub fn prepare<S: AsRef<str>>(tokens: &[S], cwd: &Path) -> RefactorResult<Invocation> {
    validate(tokens)?;
    let parsed = ParsedOptions::from_tokens(tokens)?;
    let options = resolve(&parsed)?;

    if options.help {
        return Ok(Invocation::Help);
    }

    let paths = resolve_paths(cwd, options.root.as_deref(), options.config.as_deref())?;
    let rule = compile(parsed.positionals())?;
    debug!(
        root = %paths.root.display(),
        config = ?paths.config,
        threads = options.threads.get(),
        from = rule.from_symbol(),
        to = rule.to_symbol(),
        "prepared rename request"
    );

    Ok(Invocation::Run(RunRequest {
        root_path: paths.root,
        config_path: paths.config,
        thread_count: options.threads,
        debug: options.debug(),
        progress: options.progress,
        find_unused: options.find_unused,
        rule,
    }))
}
