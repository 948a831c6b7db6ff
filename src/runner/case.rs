use crate::exec;
use crate::mode::{AmbientPolicy, Mode};
use crate::registry::{CaseRegistry, TestCase};

/// setup 失败时统一记录的结果码
pub const SETUP_FAILURE_CODE: i32 = 1;

/// 一次 (用例, 模式) 执行的瞬时上下文
///
/// 每次执行新建，teardown 结束后丢弃；通过环境变量对
/// 用例体和钩子可见。
#[derive(Debug, Clone)]
pub struct TestContext {
    pub mode: Mode,
    pub case: String,
}

impl TestContext {
    pub fn new(mode: Mode, case: impl Into<String>) -> Self {
        Self {
            mode,
            case: case.into(),
        }
    }
}

/// 在一个模式下执行一个用例
pub struct CaseRunner<'a> {
    registry: &'a CaseRegistry,
    ambient: AmbientPolicy,
}

impl<'a> CaseRunner<'a> {
    pub fn new(registry: &'a CaseRegistry, ambient: AmbientPolicy) -> Self {
        Self { registry, ambient }
    }

    /// 执行顺序：setup → 用例体（按模式策略）→ 无条件 teardown
    ///
    /// 返回 0 表示通过。setup 失败时用例体不执行，结果固定为
    /// SETUP_FAILURE_CODE；teardown 失败会让本来通过的用例失败，
    /// 不会被静默丢弃。
    pub fn run(&self, case: &TestCase, mode: Mode) -> i32 {
        let ctx = TestContext::new(mode, case.name.as_str());
        let hooks = self.registry.hooks();
        let helpers = self.registry.helpers();

        let setup_code = match hooks.setup.as_deref() {
            Some(body) => exec::run_hook(body, helpers, self.ambient, &ctx),
            None => 0,
        };

        let body_code = if setup_code == 0 {
            exec::run_body(&case.body, helpers, mode.policy(), self.ambient, &ctx)
        } else {
            tracing::debug!("setup 失败 ({setup_code})，跳过用例体 {}", case.name);
            0
        };

        let teardown_code = match hooks.teardown.as_deref() {
            Some(body) => exec::run_hook(body, helpers, self.ambient, &ctx),
            None => 0,
        };

        if setup_code != 0 {
            SETUP_FAILURE_CODE
        } else if body_code != 0 {
            body_code
        } else {
            teardown_code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ScriptParser;

    fn registry_from(content: &str) -> CaseRegistry {
        let mut registry = CaseRegistry::new();
        registry.load(ScriptParser::parse_content(content).unwrap());
        registry
    }

    fn run_single(content: &str, mode: Mode) -> i32 {
        let registry = registry_from(content);
        let names = registry.discover().unwrap();
        let case = registry.case(&names[0]).unwrap();
        CaseRunner::new(&registry, AmbientPolicy::default()).run(case, mode)
    }

    #[test]
    fn test_passing_case_in_every_mode() {
        for mode in Mode::ALL {
            let code = run_single("test::case::ok() {\n    true\n}\n", mode);
            assert_eq!(code, 0, "mode: {mode}");
        }
    }

    #[test]
    fn test_setup_failure_skips_body_and_runs_teardown() {
        let dir = tempfile::tempdir().unwrap();
        let body_marker = dir.path().join("body_ran");
        let teardown_marker = dir.path().join("teardown_ran");

        let content = format!(
            "setup() {{\n    false\n}}\nteardown() {{\n    touch {}\n}}\ntest::case::skipped() {{\n    touch {}\n}}\n",
            teardown_marker.display(),
            body_marker.display(),
        );

        let code = run_single(&content, Mode::Default);
        assert_eq!(code, SETUP_FAILURE_CODE);
        assert!(!body_marker.exists(), "body must not run after setup failure");
        assert!(teardown_marker.exists(), "teardown must still run");
    }

    #[test]
    fn test_teardown_failure_fails_passing_case() {
        let content = "teardown() {\n    false\n}\ntest::case::ok() {\n    true\n}\n";
        let code = run_single(content, Mode::Default);
        assert_ne!(code, 0);
    }

    #[test]
    fn test_teardown_runs_once_after_body_failure() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("teardown_log");

        let content = format!(
            "teardown() {{\n    echo ran >> {}\n}}\ntest::case::bad() {{\n    false\n}}\n",
            log.display(),
        );

        let code = run_single(&content, Mode::Strict);
        assert_ne!(code, 0);

        let entries = std::fs::read_to_string(&log).unwrap();
        assert_eq!(entries.lines().count(), 1);
    }

    #[test]
    fn test_helper_visible_to_case_body() {
        let content = "assert_two() {\n    [ \"$1\" -eq 2 ]\n}\ntest::case::calls_helper() {\n    assert_two $((1 + 1))\n}\n";
        assert_eq!(run_single(content, Mode::Strict), 0);
    }

    #[test]
    fn test_context_env_reaches_hooks() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("ctx_log");

        let content = format!(
            "setup() {{\n    echo \"$RUSHT_MODE $RUSHT_CASE\" > {}\n}}\ntest::case::ctx() {{\n    true\n}}\n",
            log.display(),
        );

        assert_eq!(run_single(&content, Mode::Loose), 0);
        let logged = std::fs::read_to_string(&log).unwrap();
        assert_eq!(logged.trim(), "loose ctx");
    }
}
