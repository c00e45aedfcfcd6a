use refactor_core::domain::ProgressMode;
use refactor_core::options::spec::{DEBUG_BY_LINE_LONG, DEBUG_LONG};
use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber; `RUST_LOG` overrides the mode default.
pub(super) fn init(progress: ProgressMode) {
    let default_level = match progress {
        ProgressMode::Default => "warn",
        ProgressMode::Debug => "debug",
        ProgressMode::DebugByLine => "trace",
    };

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .try_init();
}

/// Debug level picked from the raw tokens, so the subscriber is live while
/// the request itself is still being prepared.
pub(super) fn progress_from_tokens<S: AsRef<str>>(tokens: &[S]) -> ProgressMode {
    let flags = tokens
        .iter()
        .map(AsRef::as_ref)
        .take_while(|token| *token != "--")
        .filter_map(|token| token.strip_prefix("--"));

    flags.fold(ProgressMode::Default, |mode, name| {
        if name == DEBUG_BY_LINE_LONG {
            ProgressMode::DebugByLine
        } else if name == DEBUG_LONG && mode == ProgressMode::Default {
            ProgressMode::Debug
        } else {
            mode
        }
    })
}
