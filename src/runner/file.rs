use crate::error::{Result, RushtError};
use crate::mode::{AmbientPolicy, ModeRegistry};
use crate::parser::ScriptParser;
use crate::registry::CaseRegistry;
use crate::runner::case::CaseRunner;
use crate::runner::reporter::Reporter;
use crate::runner::types::TestTally;
use std::path::{Path, PathBuf};

/// 执行一个测试文件并返回它的计数
///
/// 运行前快照工作目录、环境严格设置和激活模式集合，
/// 结束后无论成败都精确恢复；换文件前重置用例注册表，
/// 保证文件之间完全隔离。
pub struct FileRunner<'a> {
    modes: &'a mut ModeRegistry,
    ambient: &'a mut AmbientPolicy,
    reporter: &'a Reporter,
    registry: CaseRegistry,
}

impl<'a> FileRunner<'a> {
    pub fn new(
        modes: &'a mut ModeRegistry,
        ambient: &'a mut AmbientPolicy,
        reporter: &'a Reporter,
    ) -> Self {
        Self {
            modes,
            ambient,
            reporter,
            registry: CaseRegistry::new(),
        }
    }

    /// 缺失文件和加载错误按一次合成失败计入，套件继续；
    /// 唯一向上传播的错误是文件声明了未知模式（InvalidMode）。
    pub fn run_file(&mut self, path: &str) -> Result<TestTally> {
        let file_path = Path::new(path);
        if !file_path.is_file() {
            self.reporter
                .file_error(path, &RushtError::FileNotFound(path.to_string()));
            return Ok(TestTally::single_failure());
        }

        let saved_dir = match std::env::current_dir() {
            Ok(dir) => dir,
            Err(err) => {
                self.reporter.file_error(path, &err.into());
                return Ok(TestTally::single_failure());
            }
        };
        let saved_ambient = *self.ambient;
        let saved_modes = self.modes.snapshot();

        self.registry.reset();

        let outcome = self.load_and_run(path, file_path);

        if let Err(err) = std::env::set_current_dir(&saved_dir) {
            tracing::error!("恢复工作目录失败: {err}");
        }
        *self.ambient = saved_ambient;
        self.modes.restore(saved_modes);

        match outcome {
            Ok(tally) => Ok(tally),
            Err(err @ RushtError::InvalidMode(_)) => Err(err),
            Err(err) => {
                self.reporter.file_error(path, &err);
                Ok(TestTally::single_failure())
            }
        }
    }

    fn load_and_run(&mut self, display: &str, file_path: &Path) -> Result<TestTally> {
        // 进入文件所在目录，让文件内的相对路径相对文件位置解析
        let local_path = match file_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                std::env::set_current_dir(dir)?;
                file_path
                    .file_name()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| file_path.to_path_buf())
            }
            _ => file_path.to_path_buf(),
        };

        let script = ScriptParser::parse_file(&local_path)?;

        if let Some(strict) = script.strict {
            self.ambient.strict = strict;
        }
        let mode_override = script.modes.clone();
        self.registry.load(script);

        if let Some(names) = mode_override {
            self.modes.set_modes(names.iter().map(String::as_str))?;
        }

        let Some(case_names) = self.registry.discover() else {
            let file_display = display;
            tracing::debug!("{} 中没有发现测试用例", file_display);
            return Ok(TestTally::default());
        };

        let mut tally = TestTally::default();
        let runner = CaseRunner::new(&self.registry, *self.ambient);

        for name in &case_names {
            let Some(case) = self.registry.case(name) else {
                continue;
            };
            // 外层用例、内层模式：同一用例的各模式执行相邻
            for &mode in self.modes.active() {
                let code = runner.run(case, mode);
                let passed = code == 0;
                tally.record(passed);
                self.reporter.attempt(passed);
                if !passed {
                    self.reporter.failure(display, name, mode);
                }
            }
        }

        Ok(tally)
    }
}
