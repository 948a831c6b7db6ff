use clap::{CommandFactory, Parser};
use rusht::exec;
use rusht::runner::{ExitSignal, SuiteRunner};

/// 套件级模式集合的环境变量（空格或逗号分隔的模式名）
pub const MODES_ENV: &str = "RUSHT_MODES";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 要执行的测试脚本文件，按给定顺序运行
    pub files: Vec<String>,

    /// 执行模式列表，覆盖 RUSHT_MODES
    /// (default, loose, strict, strict-ignored)
    #[arg(short, long)]
    pub modes: Option<String>,
}

pub fn run(cli: Cli) -> ExitSignal {
    if cli.files.is_empty() {
        let mut cmd = Cli::command();
        eprintln!("{}", cmd.render_usage());
        return ExitSignal::NoTests;
    }

    let raw_modes = cli
        .modes
        .or_else(|| std::env::var(MODES_ENV).ok())
        .unwrap_or_default();
    let mode_names: Vec<String> = raw_modes
        .split([' ', ','])
        .map(str::to_string)
        .collect();

    let nested = std::env::var(exec::ACTIVE_ENV).is_ok();

    SuiteRunner::new(nested).run(&cli.files, &mode_names)
}
