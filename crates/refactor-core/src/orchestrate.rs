use crate::domain::RefactorResult;
use crate::engine::{AnalysisEngine, ConfigLoader, ConfigSource, EngineBuilder, EngineReport};
use crate::request::RunRequest;
use std::time::Instant;
use tracing::info;

/// Drives one rename run through the engine collaborators.
///
/// The rule is registered before analysis starts; engine failures are
/// propagated unchanged.
pub fn execute<L, B>(request: &RunRequest, loader: &L, builder: &B) -> RefactorResult<EngineReport>
where
    L: ConfigLoader,
    B: EngineBuilder<Config = L::Config>,
{
    let source = match &request.config_path {
        Some(path) => ConfigSource::File {
            path,
            base_dir: &request.root_path,
        },
        None => ConfigSource::Discover {
            root: &request.root_path,
        },
    };
    let config = loader.load(source)?;

    let mut engine = builder.build(config, &request.engine_settings())?;
    engine.visit_bootstrap_files()?;
    engine.register_rule(&request.rule)?;

    info!(
        root = %request.root_path.display(),
        from = request.rule.from_symbol(),
        to = request.rule.to_symbol(),
        "renaming symbol"
    );
    let started = Instant::now();
    engine.analyze_and_transform(&request.root_path)?;
    engine.finish(started)
}

#[cfg(test)]
mod tests {
    use super::execute;
    use crate::domain::{ProgressMode, RefactorError, RefactorResult};
    use crate::engine::{
        AnalysisEngine, ConfigLoader, ConfigSource, EngineBuilder, EngineReport, EngineSettings,
    };
    use crate::request::RunRequest;
    use crate::rule::{RenameRule, compile};
    use std::cell::RefCell;
    use std::num::NonZeroUsize;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    type Journal = Rc<RefCell<Vec<String>>>;

    struct FakeLoader {
        journal: Journal,
    }

    impl ConfigLoader for FakeLoader {
        type Config = String;

        fn load(&self, source: ConfigSource<'_>) -> RefactorResult<String> {
            let entry = match source {
                ConfigSource::File { path, .. } => format!("config:{}", path.display()),
                ConfigSource::Discover { root } => format!("discover:{}", root.display()),
            };
            self.journal.borrow_mut().push(entry.clone());
            Ok(entry)
        }
    }

    struct FakeBuilder {
        journal: Journal,
        fail_analysis: bool,
    }

    impl EngineBuilder for FakeBuilder {
        type Config = String;
        type Engine = FakeEngine;

        fn build(&self, config: String, settings: &EngineSettings) -> RefactorResult<FakeEngine> {
            self.journal.borrow_mut().push(format!(
                "build:{}:threads={}:unused={}:{}",
                config, settings.thread_count, settings.find_unused, settings.progress
            ));
            Ok(FakeEngine {
                journal: Rc::clone(&self.journal),
                fail_analysis: self.fail_analysis,
            })
        }
    }

    struct FakeEngine {
        journal: Journal,
        fail_analysis: bool,
    }

    impl AnalysisEngine for FakeEngine {
        fn visit_bootstrap_files(&mut self) -> RefactorResult<()> {
            self.journal.borrow_mut().push("bootstrap".to_string());
            Ok(())
        }

        fn register_rule(&mut self, rule: &RenameRule) -> RefactorResult<()> {
            let transform = rule.call_site_transform()?;
            self.journal.borrow_mut().push(format!(
                "rule:{}->{}:{}",
                rule.from_symbol(),
                rule.to_symbol(),
                transform.rewrite("Foo\\bar(1, 2)")
            ));
            Ok(())
        }

        fn analyze_and_transform(&mut self, root: &Path) -> RefactorResult<()> {
            self.journal
                .borrow_mut()
                .push(format!("analyze:{}", root.display()));
            if self.fail_analysis {
                return Err(RefactorError::engine("ENGINE.FAKE", "analysis exploded"));
            }
            Ok(())
        }

        fn finish(self, _started: Instant) -> RefactorResult<EngineReport> {
            self.journal.borrow_mut().push("finish".to_string());
            Ok(EngineReport {
                elapsed: Duration::from_millis(5),
            })
        }
    }

    fn request(config_path: Option<PathBuf>) -> RunRequest {
        RunRequest {
            root_path: PathBuf::from("/project"),
            config_path,
            thread_count: NonZeroUsize::new(2).expect("nonzero"),
            debug: false,
            progress: ProgressMode::Default,
            find_unused: true,
            rule: compile(&["Foo\\bar", "into", "Foo\\baz"]).expect("rule should compile"),
        }
    }

    fn fakes(fail_analysis: bool) -> (Journal, FakeLoader, FakeBuilder) {
        let journal = Journal::default();
        let loader = FakeLoader {
            journal: Rc::clone(&journal),
        };
        let builder = FakeBuilder {
            journal: Rc::clone(&journal),
            fail_analysis,
        };
        (journal, loader, builder)
    }

    #[test]
    fn runs_engine_phases_in_order() {
        let (journal, loader, builder) = fakes(false);

        let report = execute(&request(None), &loader, &builder).expect("run should succeed");

        assert_eq!(report.elapsed, Duration::from_millis(5));
        assert_eq!(
            *journal.borrow(),
            vec![
                "discover:/project".to_string(),
                "build:discover:/project:threads=2:unused=true:default".to_string(),
                "bootstrap".to_string(),
                "rule:foo\\bar->Foo\\baz:Foo\\baz(1, 2)".to_string(),
                "analyze:/project".to_string(),
                "finish".to_string(),
            ]
        );
    }

    #[test]
    fn explicit_config_is_loaded_from_file() {
        let (journal, loader, builder) = fakes(false);

        execute(
            &request(Some(PathBuf::from("/project/refactor.xml"))),
            &loader,
            &builder,
        )
        .expect("run should succeed");

        assert_eq!(journal.borrow()[0], "config:/project/refactor.xml");
    }

    #[test]
    fn engine_errors_propagate_without_finishing() {
        let (journal, loader, builder) = fakes(true);

        let error = execute(&request(None), &loader, &builder).expect_err("analysis fails");

        assert_eq!(error.code(), "ENGINE.FAKE");
        assert!(!journal.borrow().iter().any(|entry| entry == "finish"));
    }
}
