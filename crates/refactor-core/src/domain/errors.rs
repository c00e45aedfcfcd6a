use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RefactorResult<T> = Result<T, RefactorError>;

pub const HELP_HINT: &str = "Type --help to see a list of supported arguments";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefactorErrorCategory {
    Usage,
    Path,
    Rule,
    Engine,
    Internal,
}

impl RefactorErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Usage | Self::Path | Self::Rule => 1,
            Self::Engine => 2,
            Self::Internal => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usage => "UsageError",
            Self::Path => "PathError",
            Self::Rule => "RuleError",
            Self::Engine => "EngineError",
            Self::Internal => "InternalError",
        }
    }

    /// Usage mistakes are the only ones the help text can fix.
    pub const fn wants_help_hint(self) -> bool {
        matches!(self, Self::Usage)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefactorError {
    category: RefactorErrorCategory,
    code: &'static str,
    message: String,
}

impl RefactorError {
    pub fn new(
        category: RefactorErrorCategory,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    pub fn usage(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(RefactorErrorCategory::Usage, code, message)
    }

    pub fn path(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(RefactorErrorCategory::Path, code, message)
    }

    pub fn rule(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(RefactorErrorCategory::Rule, code, message)
    }

    pub fn engine(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(RefactorErrorCategory::Engine, code, message)
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(RefactorErrorCategory::Internal, code, message)
    }

    pub const fn category(&self) -> RefactorErrorCategory {
        self.category
    }

    pub const fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.code, self.message)
    }

    pub fn hint_line(&self) -> Option<&'static str> {
        self.category.wants_help_hint().then_some(HELP_HINT)
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}

impl Display for RefactorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.as_str(),
            self.code,
            self.message
        )
    }
}

impl Error for RefactorError {}
