use crate::mode::{AmbientPolicy, ModeRegistry};
use crate::runner::file::FileRunner;
use crate::runner::reporter::{ExitSignal, Reporter};
use crate::runner::types::{SuiteSummary, TestTally};
use std::time::Instant;

/// 按给定顺序驱动所有测试文件并汇总结果
pub struct SuiteRunner {
    modes: ModeRegistry,
    ambient: AmbientPolicy,
    reporter: Reporter,
    nested: bool,
}

impl SuiteRunner {
    /// `nested` 标记本次运行是否由某个用例体内部发起；
    /// 嵌套运行照常执行并计算退出信号，但不渲染汇总，
    /// 避免递归进入外层套件的汇总逻辑。
    pub fn new(nested: bool) -> Self {
        Self {
            modes: ModeRegistry::new(),
            ambient: AmbientPolicy::default(),
            reporter: Reporter::new(),
            nested,
        }
    }

    /// 套件模式集合在处理任何文件之前应用一次；
    /// 单个文件的失败不会中断其余文件，唯一的例外是
    /// 运行中请求了未知模式。
    pub fn run<S: AsRef<str>>(&mut self, paths: &[S], mode_names: &[String]) -> ExitSignal {
        if paths.is_empty() {
            eprintln!("No test files given.");
            return ExitSignal::NoTests;
        }

        if let Err(err) = self
            .modes
            .set_modes(mode_names.iter().map(String::as_str))
        {
            self.reporter.suite_error(&err);
            return ExitSignal::UnknownMode;
        }

        let started = Instant::now();
        let mut tally = TestTally::default();

        for path in paths {
            let path = path.as_ref();
            tracing::debug!("运行测试文件 {path}");

            let mut file_runner =
                FileRunner::new(&mut self.modes, &mut self.ambient, &self.reporter);
            match file_runner.run_file(path) {
                Ok(file_tally) => tally.merge(file_tally),
                Err(err) => {
                    self.reporter.suite_error(&err);
                    return ExitSignal::UnknownMode;
                }
            }
        }

        let summary = SuiteSummary::new(tally, started.elapsed());
        if self.nested {
            self.reporter.exit_signal(&summary.tally)
        } else {
            self.reporter.show_results(&summary)
        }
    }
}
