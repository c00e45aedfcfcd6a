//! Command-line option handling: catalog, validation, classification and
//! alias resolution, in that order.

pub mod spec;

mod parse;
mod resolve;
mod validate;

pub use parse::{OptionValue, ParsedOptions};
pub use resolve::{ResolvedOptions, resolve};
pub use spec::{OptionArity, OptionForm, OptionSpec};
pub use validate::validate;
