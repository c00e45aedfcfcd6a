use super::parse::ParsedOptions;
use super::spec::{
    CONFIG_LONG, CONFIG_SHORT, DEBUG_BY_LINE_LONG, DEBUG_LONG, HELP_LONG, HELP_SHORT,
    NO_UNUSED_SHORT, ROOT_LONG, ROOT_SHORT, THREADS_LONG,
};
use crate::domain::{ProgressMode, RefactorError, RefactorResult};
use std::num::NonZeroUsize;

/// Normalized view of the command line: aliases merged, duplicates rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub help: bool,
    pub config: Option<String>,
    pub root: Option<String>,
    pub progress: ProgressMode,
    pub find_unused: bool,
    pub threads: NonZeroUsize,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            help: false,
            config: None,
            root: None,
            progress: ProgressMode::Default,
            find_unused: true,
            threads: NonZeroUsize::MIN,
        }
    }
}

impl ResolvedOptions {
    pub const fn debug(&self) -> bool {
        self.progress.is_debug()
    }
}

pub fn resolve(parsed: &ParsedOptions) -> RefactorResult<ResolvedOptions> {
    let help = parsed.is_present(HELP_LONG) || parsed.is_present(HELP_SHORT);

    let config = single_value(parsed, CONFIG_LONG, CONFIG_SHORT).ok_or_else(|| {
        RefactorError::usage("USAGE.TOO_MANY_CONFIGS", "Too many config files provided")
    })?;

    if help {
        return Ok(ResolvedOptions {
            help,
            config,
            ..ResolvedOptions::default()
        });
    }

    let root = single_value(parsed, ROOT_LONG, ROOT_SHORT).ok_or_else(|| {
        RefactorError::usage("USAGE.TOO_MANY_ROOTS", "Too many root directories provided")
    })?;

    let progress = if parsed.is_present(DEBUG_BY_LINE_LONG) {
        ProgressMode::DebugByLine
    } else if parsed.is_present(DEBUG_LONG) {
        ProgressMode::Debug
    } else {
        ProgressMode::Default
    };

    Ok(ResolvedOptions {
        help,
        config,
        root,
        progress,
        find_unused: !parsed.is_present(NO_UNUSED_SHORT),
        threads: thread_count(parsed)?,
    })
}

/// Long spelling replaces the short one; `None` means more than one value.
fn single_value(parsed: &ParsedOptions, long: &str, short: &str) -> Option<Option<String>> {
    let slot = if parsed.is_present(long) {
        parsed.values(long)
    } else {
        parsed.values(short)
    };

    match slot.as_slice() {
        [] => Some(None),
        [value] => Some(Some((*value).to_string())),
        _ => None,
    }
}

fn thread_count(parsed: &ParsedOptions) -> RefactorResult<NonZeroUsize> {
    match parsed.values(THREADS_LONG).as_slice() {
        [] => Ok(NonZeroUsize::MIN),
        [raw] => raw
            .trim()
            .parse::<NonZeroUsize>()
            .map_err(|_| {
                RefactorError::usage(
                    "USAGE.INVALID_THREADS",
                    format!("Invalid thread count \"{raw}\"; expected a positive integer"),
                )
            }),
        _ => Err(RefactorError::usage(
            "USAGE.TOO_MANY_THREADS",
            "Too many thread counts provided",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{ResolvedOptions, resolve};
    use crate::domain::{ProgressMode, RefactorResult};
    use crate::options::ParsedOptions;

    fn resolve_tokens(tokens: &[&str]) -> RefactorResult<ResolvedOptions> {
        let parsed = ParsedOptions::from_tokens(tokens).expect("tokens should parse");
        resolve(&parsed)
    }

    #[test]
    fn defaults_without_options() {
        let resolved = resolve_tokens(&["a", "into", "b"]).expect("should resolve");
        assert_eq!(resolved, ResolvedOptions::default());
        assert_eq!(resolved.threads.get(), 1);
        assert!(resolved.find_unused);
    }

    #[test]
    fn long_help_implies_short_help() {
        assert!(resolve_tokens(&["--help"]).expect("should resolve").help);
        assert!(resolve_tokens(&["-h"]).expect("should resolve").help);
    }

    #[test]
    fn long_config_takes_the_slot_over_short() {
        let resolved =
            resolve_tokens(&["--config=a.xml", "-c", "b.xml"]).expect("long form should win");
        assert_eq!(resolved.config.as_deref(), Some("a.xml"));
    }

    #[test]
    fn duplicate_config_values_are_fatal() {
        for tokens in [
            &["-c", "a.xml", "-c", "b.xml"][..],
            &["--config=a.xml", "--config=b.xml"][..],
        ] {
            let error = resolve_tokens(tokens).expect_err("duplicate config should fail");
            assert_eq!(error.message(), "Too many config files provided");
            assert_eq!(error.exit_code(), 1);
        }
    }

    #[test]
    fn duplicate_config_fails_even_with_help() {
        assert!(resolve_tokens(&["--help", "-c", "a", "-c", "b"]).is_err());
    }

    #[test]
    fn help_skips_root_and_thread_checks() {
        let resolved = resolve_tokens(&["-h", "--threads=abc", "-r", "a", "-r", "b"])
            .expect("help should short-circuit");
        assert!(resolved.help);
        assert_eq!(resolved.root, None);
    }

    #[test]
    fn long_root_takes_the_slot_over_short() {
        let resolved = resolve_tokens(&["-r", "short", "--root=long"]).expect("should resolve");
        assert_eq!(resolved.root.as_deref(), Some("long"));
    }

    #[test]
    fn duplicate_root_values_are_fatal() {
        let error = resolve_tokens(&["-r", "a", "-r", "b"]).expect_err("duplicate root");
        assert_eq!(error.code(), "USAGE.TOO_MANY_ROOTS");
    }

    #[test]
    fn threads_value_is_propagated() {
        let resolved = resolve_tokens(&["--threads=4"]).expect("should resolve");
        assert_eq!(resolved.threads.get(), 4);
    }

    #[test]
    fn malformed_thread_counts_are_rejected() {
        for raw in ["--threads=abc", "--threads=0", "--threads=1.5"] {
            let error = resolve_tokens(&[raw]).expect_err("thread count should be rejected");
            assert_eq!(error.code(), "USAGE.INVALID_THREADS");
        }
    }

    #[test]
    fn debug_flags_select_progress_mode() {
        let debug = resolve_tokens(&["--debug"]).expect("should resolve");
        assert_eq!(debug.progress, ProgressMode::Debug);
        assert!(debug.debug());

        let by_line = resolve_tokens(&["--debug", "--debug-by-line"]).expect("should resolve");
        assert_eq!(by_line.progress, ProgressMode::DebugByLine);
    }

    #[test]
    fn m_flag_disables_unused_code_detection() {
        let resolved = resolve_tokens(&["-m"]).expect("should resolve");
        assert!(!resolved.find_unused);
    }
}
