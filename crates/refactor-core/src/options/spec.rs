//! Catalog of every option the command line understands.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionForm {
    Short,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionArity {
    None,
    Required,
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub form: OptionForm,
    pub arity: OptionArity,
}

impl OptionSpec {
    const fn short(name: &'static str, arity: OptionArity) -> Self {
        Self {
            name,
            form: OptionForm::Short,
            arity,
        }
    }

    const fn long(name: &'static str, arity: OptionArity) -> Self {
        Self {
            name,
            form: OptionForm::Long,
            arity,
        }
    }
}

pub const HELP_SHORT: &str = "h";
pub const HELP_LONG: &str = "help";
pub const NO_UNUSED_SHORT: &str = "m";
pub const CONFIG_SHORT: &str = "c";
pub const CONFIG_LONG: &str = "config";
pub const ROOT_SHORT: &str = "r";
pub const ROOT_LONG: &str = "root";
pub const DEBUG_LONG: &str = "debug";
pub const DEBUG_BY_LINE_LONG: &str = "debug-by-line";
pub const THREADS_LONG: &str = "threads";

/// Accepted for parity with the analysis-only tool and otherwise ignored.
pub const REFACTOR_LONG: &str = "refactor";

pub const SHORT_OPTIONS: [OptionSpec; 4] = [
    OptionSpec::short(HELP_SHORT, OptionArity::None),
    OptionSpec::short(NO_UNUSED_SHORT, OptionArity::None),
    OptionSpec::short(CONFIG_SHORT, OptionArity::Required),
    OptionSpec::short(ROOT_SHORT, OptionArity::Required),
];

pub const LONG_OPTIONS: [OptionSpec; 7] = [
    OptionSpec::long(HELP_LONG, OptionArity::None),
    OptionSpec::long(DEBUG_LONG, OptionArity::None),
    OptionSpec::long(DEBUG_BY_LINE_LONG, OptionArity::None),
    OptionSpec::long(CONFIG_LONG, OptionArity::Required),
    OptionSpec::long(ROOT_LONG, OptionArity::Required),
    OptionSpec::long(THREADS_LONG, OptionArity::Required),
    OptionSpec::long(REFACTOR_LONG, OptionArity::Optional),
];

pub fn short_option(name: &str) -> Option<OptionSpec> {
    SHORT_OPTIONS.iter().copied().find(|spec| spec.name == name)
}

pub fn long_option(name: &str) -> Option<OptionSpec> {
    LONG_OPTIONS.iter().copied().find(|spec| spec.name == name)
}

pub fn all_options() -> impl Iterator<Item = OptionSpec> {
    SHORT_OPTIONS.iter().chain(LONG_OPTIONS.iter()).copied()
}
