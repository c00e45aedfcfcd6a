//! Compiles `OLD into NEW` into the rename rule handed to the engine.
//!
//! A rule carries two artifacts: a declaration mapping (old name to new
//! name, applied where the symbol is defined) and a call-site rewrite that
//! swaps the callee name and reproduces the parenthesized argument text
//! untouched. Argument lists are never parsed, so renames that also change
//! the calling convention cannot be expressed here.

use crate::domain::{RefactorError, RefactorResult};
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

pub const INTO_KEYWORD: &str = "into";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameRule {
    from_symbol: String,
    to_symbol: String,
    call_pattern: String,
    call_replacement: String,
}

impl RenameRule {
    /// Lower-cased; the engine looks these symbols up case-insensitively.
    pub fn from_symbol(&self) -> &str {
        &self.from_symbol
    }

    pub fn to_symbol(&self) -> &str {
        &self.to_symbol
    }

    pub fn call_pattern(&self) -> &str {
        &self.call_pattern
    }

    pub fn call_replacement(&self) -> &str {
        &self.call_replacement
    }

    pub fn declaration_mapping(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(self.from_symbol.clone(), self.to_symbol.clone())])
    }

    pub fn call_site_patterns(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(self.call_pattern.clone(), self.call_replacement.clone())])
    }

    pub fn call_site_transform(&self) -> RefactorResult<CallSiteTransform> {
        let matcher = Regex::new(&self.call_pattern).map_err(|source| {
            RefactorError::internal(
                "SYS.CALL_PATTERN",
                format!(
                    "call-site pattern '{}' failed to compile: {}",
                    self.call_pattern, source
                ),
            )
        })?;
        Ok(CallSiteTransform {
            matcher,
            replacement: self.call_replacement.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct CallSiteTransform {
    matcher: Regex,
    replacement: String,
}

impl CallSiteTransform {
    pub fn matches(&self, call_site: &str) -> bool {
        self.matcher.is_match(call_site)
    }

    pub fn rewrite<'a>(&self, call_site: &'a str) -> Cow<'a, str> {
        self.matcher.replace(call_site, self.replacement.as_str())
    }
}

pub fn compile<S: AsRef<str>>(positionals: &[S]) -> RefactorResult<RenameRule> {
    let [from, keyword, to] = positionals else {
        return Err(rename_shape_error());
    };
    let (from, keyword, to) = (from.as_ref(), keyword.as_ref(), to.as_ref());

    if keyword != INTO_KEYWORD || from.trim().is_empty() || to.trim().is_empty() {
        return Err(rename_shape_error());
    }

    let from_symbol = from.to_lowercase();
    let call_pattern = format!(r"(?is)^{}\((.*\))$", regex::escape(&from_symbol));
    let call_replacement = format!("{}(${{1}}", to.replace('$', "$$"));

    let rule = RenameRule {
        from_symbol,
        to_symbol: to.to_string(),
        call_pattern,
        call_replacement,
    };
    rule.call_site_transform()?;
    Ok(rule)
}

fn rename_shape_error() -> RefactorError {
    RefactorError::rule("RULE.RENAME_SHAPE", "Expecting SYMBOL into SYMBOL")
}
