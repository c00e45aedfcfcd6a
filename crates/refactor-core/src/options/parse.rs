use super::spec::{OptionArity, OptionForm, OptionSpec, all_options};
use crate::domain::{RefactorError, RefactorResult};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::collections::BTreeMap;

const POSITIONALS_ID: &str = "positionals";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Flag,
    Value(String),
}

/// Options as they appeared on the command line, keyed by catalog name.
///
/// Short and long spellings keep separate slots; merging them is the
/// resolver's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    occurrences: BTreeMap<&'static str, Vec<OptionValue>>,
    positionals: Vec<String>,
}

impl ParsedOptions {
    /// Classifies already-validated tokens into options and positionals.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> RefactorResult<Self> {
        let matches = option_command()
            .try_get_matches_from(tokens.iter().map(|token| token.as_ref()))
            .map_err(malformed_argument)?;
        Ok(Self::from_matches(&matches))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let mut occurrences = BTreeMap::new();
        for spec in all_options() {
            let values = match spec.arity {
                OptionArity::None => {
                    vec![OptionValue::Flag; usize::from(matches.get_count(spec.name))]
                }
                OptionArity::Required | OptionArity::Optional => matches
                    .get_many::<String>(spec.name)
                    .map(|values| {
                        values
                            .map(|value| match value.as_str() {
                                "" if spec.arity == OptionArity::Optional => OptionValue::Flag,
                                _ => OptionValue::Value(value.clone()),
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            };
            if !values.is_empty() {
                occurrences.insert(spec.name, values);
            }
        }

        let positionals = matches
            .get_many::<String>(POSITIONALS_ID)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        Self {
            occurrences,
            positionals,
        }
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.occurrences.contains_key(name)
    }

    pub fn occurrences(&self, name: &str) -> &[OptionValue] {
        self.occurrences
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Values given to `name`, in command-line order; bare flags are skipped.
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.occurrences(name)
            .iter()
            .filter_map(|occurrence| match occurrence {
                OptionValue::Value(value) => Some(value.as_str()),
                OptionValue::Flag => None,
            })
            .collect()
    }

    pub fn option_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.occurrences.keys().copied()
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }
}

fn option_command() -> Command {
    let positionals = Arg::new(POSITIONALS_ID)
        .value_name("SYMBOL")
        .action(ArgAction::Append);

    all_options().fold(
        Command::new("refactor")
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .arg(positionals),
        |command, spec| command.arg(option_arg(spec)),
    )
}

fn option_arg(spec: OptionSpec) -> Arg {
    let arg = Arg::new(spec.name);
    let arg = match spec.form {
        OptionForm::Short => match spec.name.chars().next() {
            Some(short) => arg.short(short),
            None => arg,
        },
        OptionForm::Long => arg.long(spec.name),
    };

    match spec.arity {
        OptionArity::None => arg.action(ArgAction::Count),
        OptionArity::Required => arg.action(ArgAction::Append).num_args(1),
        OptionArity::Optional => arg
            .action(ArgAction::Append)
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value(""),
    }
}

fn malformed_argument(error: clap::Error) -> RefactorError {
    let rendered = error.to_string();
    let summary = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string();
    RefactorError::usage("USAGE.MALFORMED_ARGUMENT", summary)
}

#[cfg(test)]
mod tests {
    use super::{OptionValue, ParsedOptions};

    fn parse(tokens: &[&str]) -> ParsedOptions {
        ParsedOptions::from_tokens(tokens).expect("tokens should parse")
    }

    #[test]
    fn splits_options_from_positionals() {
        let parsed = parse(&["-m", "Foo\\bar", "into", "--threads=4", "Foo\\baz"]);

        assert!(parsed.is_present("m"));
        assert_eq!(parsed.values("threads"), vec!["4"]);
        assert_eq!(parsed.positionals(), ["Foo\\bar", "into", "Foo\\baz"]);
    }

    #[test]
    fn accepts_separate_glued_and_inline_values() {
        let parsed = parse(&["-c", "a.xml", "-cb.xml", "--config=c.xml", "--root", "src"]);

        assert_eq!(parsed.values("c"), vec!["a.xml", "b.xml"]);
        assert_eq!(parsed.values("config"), vec!["c.xml"]);
        assert_eq!(parsed.values("root"), vec!["src"]);
        assert!(!parsed.is_present("r"));
    }

    #[test]
    fn repeated_flags_keep_every_occurrence() {
        let parsed = parse(&["--debug", "--debug"]);
        assert_eq!(
            parsed.occurrences("debug"),
            [OptionValue::Flag, OptionValue::Flag]
        );
    }

    #[test]
    fn double_dash_ends_option_parsing() {
        let parsed = parse(&["--", "a", "into", "b"]);
        assert_eq!(parsed.positionals(), ["a", "into", "b"]);
        assert_eq!(parsed.option_names().count(), 0);
    }

    #[test]
    fn missing_required_value_is_a_usage_error() {
        let error = ParsedOptions::from_tokens(&["--config"]).expect_err("value is required");
        assert_eq!(error.code(), "USAGE.MALFORMED_ARGUMENT");
    }
}
