pub mod domain;
pub mod engine;
pub mod options;
pub mod orchestrate;
pub mod paths;
pub mod request;
pub mod rule;

pub use domain::{RefactorError, RefactorErrorCategory, RefactorResult};
pub use orchestrate::execute;
pub use request::{Invocation, RunRequest, prepare};
pub use rule::{RenameRule, compile};
