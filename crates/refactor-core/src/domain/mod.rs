pub mod errors;

pub use errors::{HELP_HINT, RefactorError, RefactorErrorCategory, RefactorResult};

use std::fmt::{Display, Formatter};

/// How the engine reports progress while it works through the codebase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProgressMode {
    #[default]
    Default,
    Debug,
    DebugByLine,
}

impl ProgressMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Debug => "debug",
            Self::DebugByLine => "debug-by-line",
        }
    }

    pub const fn is_debug(self) -> bool {
        !matches!(self, Self::Default)
    }
}

impl Display for ProgressMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}
