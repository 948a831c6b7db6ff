use crate::error::RushtError;
use crate::mode::Mode;
use crate::runner::types::{SuiteSummary, TestTally};
use colored::Colorize;
use std::io::Write;

/// 进程最终的退出信号
///
/// 三类结果码必须互相区分，自动化才能分辨
/// “没有可测的东西”和“测了但失败”。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitSignal {
    /// 全部通过
    Success,
    /// 没有测试用例，或调用方式错误
    NoTests,
    /// 至少一个失败
    Failures,
    /// 请求了未知的执行模式
    UnknownMode,
}

impl ExitSignal {
    pub const fn code(self) -> u8 {
        match self {
            ExitSignal::Success => 0,
            ExitSignal::NoTests => 1,
            ExitSignal::Failures => 2,
            ExitSignal::UnknownMode => 4,
        }
    }
}

/// 渲染每次执行的符号、失败详情和最终汇总
#[derive(Debug, Default)]
pub struct Reporter;

impl Reporter {
    pub fn new() -> Self {
        Self
    }

    /// 每次 (用例, 模式) 执行打一个符号，不换行
    pub fn attempt(&self, passed: bool) {
        if passed {
            print!("{}", "✓".green());
        } else {
            print!("{}", "✗".red());
        }
        let _ = std::io::stdout().flush();
    }

    /// 一行失败详情：文件、用例、模式
    pub fn failure(&self, file: &str, case: &str, mode: Mode) {
        println!();
        println!("{}: {}, {}(), {} mode", "Failure".red().bold(), file, case, mode);
    }

    /// 文件级失败（缺失、无法解析）
    pub fn file_error(&self, file: &str, err: &RushtError) {
        println!();
        println!("{}: {}, {}", "Failure".red().bold(), file, err);
    }

    /// 套件级错误，写到标准错误流
    pub fn suite_error(&self, err: &RushtError) {
        eprintln!("{}: {}", "Error".red().bold(), err);
    }

    /// 由计数得出退出信号
    pub fn exit_signal(&self, tally: &TestTally) -> ExitSignal {
        if tally.total == 0 {
            ExitSignal::NoTests
        } else if tally.failed > 0 {
            ExitSignal::Failures
        } else {
            ExitSignal::Success
        }
    }

    /// 打印最终汇总并返回退出信号
    pub fn show_results(&self, summary: &SuiteSummary) -> ExitSignal {
        let signal = self.exit_signal(&summary.tally);

        if signal == ExitSignal::NoTests {
            eprintln!("No test cases were defined.");
            return signal;
        }

        let passed = summary.tally.passed.to_string().green();
        let failed = if summary.tally.failed > 0 {
            summary.tally.failed.to_string().red()
        } else {
            summary.tally.failed.to_string().green()
        };

        println!("\n");
        println!(
            "{} passed, {} failed in {:.3} seconds.",
            passed,
            failed,
            summary.elapsed.as_secs_f64()
        );

        signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn tally(total: usize, passed: usize, failed: usize) -> TestTally {
        TestTally {
            total,
            passed,
            failed,
        }
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            ExitSignal::Success.code(),
            ExitSignal::NoTests.code(),
            ExitSignal::Failures.code(),
            ExitSignal::UnknownMode.code(),
        ];
        assert_eq!(codes, [0, 1, 2, 4]);
    }

    #[test]
    fn test_exit_signal_from_tally() {
        let reporter = Reporter::new();
        assert_eq!(reporter.exit_signal(&tally(0, 0, 0)), ExitSignal::NoTests);
        assert_eq!(reporter.exit_signal(&tally(4, 4, 0)), ExitSignal::Success);
        assert_eq!(reporter.exit_signal(&tally(4, 3, 1)), ExitSignal::Failures);
    }

    #[test]
    fn test_show_results_signal_matches_tally() {
        let reporter = Reporter::new();
        let summary = SuiteSummary::new(tally(2, 2, 0), Duration::from_millis(5));
        assert_eq!(reporter.show_results(&summary), ExitSignal::Success);

        let summary = SuiteSummary::new(tally(2, 1, 1), Duration::from_millis(5));
        assert_eq!(reporter.show_results(&summary), ExitSignal::Failures);
    }
}
