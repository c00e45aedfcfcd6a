use super::spec::{OptionArity, long_option, short_option};
use crate::domain::{RefactorError, RefactorResult};

/// Rejects the first token that looks like a flag but is not in the catalog.
///
/// Tokens that are not flag-shaped (including the bare `-` and `--`) are
/// left for the positional pass.
pub fn validate<S: AsRef<str>>(tokens: &[S]) -> RefactorResult<()> {
    tokens.iter().try_for_each(|token| validate_token(token.as_ref()))
}

fn validate_token(token: &str) -> RefactorResult<()> {
    if let Some(rest) = token.strip_prefix("--") {
        if rest.is_empty() {
            return Ok(());
        }
        let name = strip_inline_value(rest);
        return if long_option(name).is_some() {
            Ok(())
        } else {
            Err(unrecognised(format!("--{name}")))
        };
    }

    if let Some(rest) = token.strip_prefix('-') {
        if rest.is_empty() {
            return Ok(());
        }
        let name = strip_inline_value(rest);
        return if short_option(name).is_some() || has_glued_value(name) {
            Ok(())
        } else {
            Err(unrecognised(format!("-{name}")))
        };
    }

    Ok(())
}

fn strip_inline_value(name: &str) -> &str {
    name.split_once('=').map_or(name, |(head, _)| head)
}

/// `-cpsalm.xml`: a value-taking short option with its value attached.
fn has_glued_value(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return false;
    };
    let (head, tail) = name.split_at(first.len_utf8());
    !tail.is_empty()
        && short_option(head).is_some_and(|spec| spec.arity == OptionArity::Required)
}

fn unrecognised(flag: String) -> RefactorError {
    RefactorError::usage(
        "USAGE.UNRECOGNISED_ARGUMENT",
        format!("Unrecognised argument \"{flag}\""),
    )
}
