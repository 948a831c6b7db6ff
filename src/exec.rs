use crate::mode::{AmbientPolicy, ErrorPolicy};
use crate::parser::FunctionDef;
use crate::runner::case::TestContext;
use std::process::Command;

/// 导出给子进程的再入保护标记
pub const ACTIVE_ENV: &str = "RUSHT_ACTIVE";

/// 导出给子进程的当前模式名
pub const MODE_ENV: &str = "RUSHT_MODE";

/// 导出给子进程的当前用例标识
pub const CASE_ENV: &str = "RUSHT_CASE";

/// 找不到 / 无法启动 shell 时记录的失败码
const SPAWN_FAILURE_CODE: i32 = 127;

/// 在指定错误传播策略下执行一个用例体
pub fn run_body(
    body: &str,
    helpers: &[FunctionDef],
    policy: ErrorPolicy,
    ambient: AmbientPolicy,
    ctx: &TestContext,
) -> i32 {
    run_script(&compose(body, helpers, policy, ambient), ctx)
}

/// 执行一个 setup / teardown 钩子
///
/// 钩子不套用模式策略，只沿用环境的严格设置；当前模式
/// 仍然通过 RUSHT_MODE 对钩子可见。
pub fn run_hook(body: &str, helpers: &[FunctionDef], ambient: AmbientPolicy, ctx: &TestContext) -> i32 {
    run_script(&compose(body, helpers, ErrorPolicy::Inherit, ambient), ctx)
}

/// 拼装实际交给 shell 的脚本：策略前导 + 辅助函数 + 主体
///
/// AbortConfined 把主体包进一个子 shell，用 `|| rc=$?` 捕获它的
/// 退出码。按 POSIX 规则，`||` 列表里的命令内部 errexit 被挂起，
/// 所以中间步骤的失败不再终止子作用域，而 nounset 违例仍然会；
/// 终止前写出的输出已经到达共享的标准流。
fn compose(
    body: &str,
    helpers: &[FunctionDef],
    policy: ErrorPolicy,
    ambient: AmbientPolicy,
) -> String {
    let mut script = String::new();

    match policy {
        ErrorPolicy::Inherit => {
            if ambient.strict {
                script.push_str("set -eu\n");
            }
        }
        ErrorPolicy::Permissive => script.push_str("set +eu\n"),
        ErrorPolicy::Abort | ErrorPolicy::AbortConfined => script.push_str("set -eu\n"),
    }

    for helper in helpers {
        script.push_str(&helper.name);
        script.push_str("() {\n");
        script.push_str(&helper.body);
        script.push_str("\n}\n");
    }

    if policy == ErrorPolicy::AbortConfined {
        script.push_str("__rc=0\n(\n");
        script.push_str(body);
        script.push_str("\n) || __rc=$?\nexit \"$__rc\"\n");
    } else {
        script.push_str(body);
        script.push('\n');
    }

    script
}

/// 以 `sh -c` 运行脚本并返回退出码
///
/// 子进程继承标准输出/错误流；启动失败被捕获为失败码，
/// 信号终止按失败码 1 处理。
fn run_script(script: &str, ctx: &TestContext) -> i32 {
    let result = Command::new("sh")
        .arg("-c")
        .arg(script)
        .env(ACTIVE_ENV, "1")
        .env(MODE_ENV, ctx.mode.name())
        .env(CASE_ENV, &ctx.case)
        .status();

    match result {
        Ok(status) => status.code().unwrap_or(1),
        Err(err) => {
            tracing::error!("无法启动 shell: {err}");
            SPAWN_FAILURE_CODE
        }
    }
}
