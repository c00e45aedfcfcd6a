//! Process-backed engine: runs an analyzer executable with the resolved
//! settings and the rename rule serialized as JSON.

use super::{
    AnalysisEngine, ConfigLoader, ConfigSource, EngineBuilder, EngineReport, EngineSettings,
};
use crate::domain::{RefactorError, RefactorResult};
use crate::rule::RenameRule;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;
use tracing::{debug, info};

pub const ENGINE_ENV_VAR: &str = "REFACTOR_ENGINE";
pub const DEFAULT_ENGINE_PROGRAM: &str = "refactor-engine";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalConfig {
    pub config_path: Option<PathBuf>,
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalConfigLoader;

impl ConfigLoader for ExternalConfigLoader {
    type Config = ExternalConfig;

    fn load(&self, source: ConfigSource<'_>) -> RefactorResult<ExternalConfig> {
        match source {
            ConfigSource::File { path, base_dir } => {
                if !path.is_file() {
                    return Err(RefactorError::engine(
                        "ENGINE.CONFIG_MISSING",
                        format!("config file '{}' is no longer readable", path.display()),
                    ));
                }
                Ok(ExternalConfig {
                    config_path: Some(path.to_path_buf()),
                    base_dir: base_dir.to_path_buf(),
                })
            }
            ConfigSource::Discover { root } => Ok(ExternalConfig {
                config_path: None,
                base_dir: root.to_path_buf(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEngineBuilder {
    program: PathBuf,
}

impl ExternalEngineBuilder {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_env() -> Self {
        let program = std::env::var_os(ENGINE_ENV_VAR)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| OsString::from(DEFAULT_ENGINE_PROGRAM));
        Self::new(program)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl EngineBuilder for ExternalEngineBuilder {
    type Config = ExternalConfig;
    type Engine = ExternalEngine;

    fn build(
        &self,
        config: ExternalConfig,
        settings: &EngineSettings,
    ) -> RefactorResult<ExternalEngine> {
        Ok(ExternalEngine {
            program: self.program.clone(),
            config,
            settings: *settings,
            bootstrap: false,
            rule_json: None,
            analyzed: false,
        })
    }
}

#[derive(Serialize)]
struct RuleRegistration<'a> {
    declaration_mapping: BTreeMap<String, String>,
    call_site_patterns: BTreeMap<String, String>,
    rule: &'a RenameRule,
}

#[derive(Debug)]
pub struct ExternalEngine {
    program: PathBuf,
    config: ExternalConfig,
    settings: EngineSettings,
    bootstrap: bool,
    rule_json: Option<String>,
    analyzed: bool,
}

impl ExternalEngine {
    fn command_args(&self, root: &Path, rule_json: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--root".into(), root.into()];
        if let Some(config_path) = &self.config.config_path {
            args.push("--config".into());
            args.push(config_path.into());
        }
        args.push("--base-dir".into());
        args.push(self.config.base_dir.as_os_str().to_owned());
        args.push("--threads".into());
        args.push(self.settings.thread_count.to_string().into());
        args.push("--progress".into());
        args.push(self.settings.progress.as_str().into());
        if !self.settings.find_unused {
            args.push("--no-unused".into());
        }
        if self.bootstrap {
            args.push("--bootstrap".into());
        }
        args.push("--rule".into());
        args.push(rule_json.into());
        args
    }
}

impl AnalysisEngine for ExternalEngine {
    fn visit_bootstrap_files(&mut self) -> RefactorResult<()> {
        self.bootstrap = true;
        Ok(())
    }

    fn register_rule(&mut self, rule: &RenameRule) -> RefactorResult<()> {
        let registration = RuleRegistration {
            declaration_mapping: rule.declaration_mapping(),
            call_site_patterns: rule.call_site_patterns(),
            rule,
        };
        let json = serde_json::to_string(&registration).map_err(|source| {
            RefactorError::internal(
                "SYS.RULE_SERIALIZE",
                format!("failed to serialize rename rule: {}", source),
            )
        })?;
        self.rule_json = Some(json);
        Ok(())
    }

    fn analyze_and_transform(&mut self, root: &Path) -> RefactorResult<()> {
        let rule_json = self.rule_json.as_deref().ok_or_else(|| {
            RefactorError::internal(
                "SYS.RULE_UNREGISTERED",
                "analysis requested before a rename rule was registered",
            )
        })?;

        let args = self.command_args(root, rule_json);
        debug!(program = %self.program.display(), ?args, "launching analysis engine");

        let status = Command::new(&self.program)
            .args(&args)
            .current_dir(root)
            .status()
            .map_err(|source| {
                RefactorError::engine(
                    "ENGINE.EXEC",
                    format!(
                        "failed to execute analysis engine '{}': {}",
                        self.program.display(),
                        source
                    ),
                )
            })?;

        if !status.success() {
            let status_text = status.code().map_or_else(
                || "terminated by signal".to_string(),
                |code| format!("exit code {}", code),
            );
            return Err(RefactorError::engine(
                "ENGINE.FAILED",
                format!("analysis engine failed with {}", status_text),
            ));
        }

        self.analyzed = true;
        Ok(())
    }

    fn finish(self, started: Instant) -> RefactorResult<EngineReport> {
        if !self.analyzed {
            return Err(RefactorError::internal(
                "SYS.ENGINE_NOT_RUN",
                "engine finished without running analysis",
            ));
        }
        let report = EngineReport {
            elapsed: started.elapsed(),
        };
        info!(elapsed = ?report.elapsed, "analysis engine finished");
        Ok(report)
    }
}
