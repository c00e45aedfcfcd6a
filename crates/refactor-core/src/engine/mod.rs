//! Seams to the external analysis engine.
//!
//! The engine owns symbol resolution, codebase traversal and the actual
//! text rewriting. This crate only hands it a configuration source, the
//! run settings and a compiled [`RenameRule`].

pub mod external;

use crate::domain::{ProgressMode, RefactorResult};
use crate::rule::RenameRule;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub find_unused: bool,
    pub thread_count: NonZeroUsize,
    pub progress: ProgressMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource<'a> {
    File { path: &'a Path, base_dir: &'a Path },
    Discover { root: &'a Path },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineReport {
    pub elapsed: Duration,
}

pub trait ConfigLoader {
    type Config;

    fn load(&self, source: ConfigSource<'_>) -> RefactorResult<Self::Config>;
}

pub trait EngineBuilder {
    type Config;
    type Engine: AnalysisEngine;

    fn build(&self, config: Self::Config, settings: &EngineSettings)
    -> RefactorResult<Self::Engine>;
}

pub trait AnalysisEngine {
    /// Reads the project's own bootstrap/autoload files before analysis.
    fn visit_bootstrap_files(&mut self) -> RefactorResult<()>;

    fn register_rule(&mut self, rule: &RenameRule) -> RefactorResult<()>;

    fn analyze_and_transform(&mut self, root: &Path) -> RefactorResult<()>;

    fn finish(self, started: Instant) -> RefactorResult<EngineReport>;
}
