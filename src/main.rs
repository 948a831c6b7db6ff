mod cli;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    // 初始化日志系统
    rusht::logger::init_logger();

    let cli = cli::Cli::parse();
    let signal = cli::run(cli);
    ExitCode::from(signal.code())
}
