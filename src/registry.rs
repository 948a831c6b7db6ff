use crate::parser::{FunctionDef, ParsedScript};

/// 一个已注册的测试用例
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// 文件内唯一的用例标识（不含 `test::case::` 前缀）
    pub name: String,

    /// 用例体，原样保留
    pub body: String,
}

/// setup / teardown 钩子配置，缺省为 no-op
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hooks {
    pub setup: Option<String>,
    pub teardown: Option<String>,
}

/// 当前加载文件的用例注册表
///
/// 原始系统在活动 shell 里按命名约定扫描函数；这里改为
/// 显式注册表：加载文件时逐个注册，换文件前 reset 清空，
/// 保证文件之间不会泄漏用例或钩子。
#[derive(Debug, Default)]
pub struct CaseRegistry {
    cases: Vec<TestCase>,
    hooks: Hooks,
    helpers: Vec<FunctionDef>,
}

impl CaseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 卸载全部用例并把钩子恢复为 no-op
    pub fn reset(&mut self) {
        self.cases.clear();
        self.hooks = Hooks::default();
        self.helpers.clear();
    }

    /// 把一个解析完的脚本载入注册表
    pub fn load(&mut self, script: ParsedScript) {
        for case in script.cases {
            self.register_case(case.name, case.body);
        }
        self.hooks = Hooks {
            setup: script.setup,
            teardown: script.teardown,
        };
        self.helpers = script.helpers;
    }

    /// 注册一个用例；同名用例被替换（同 shell source 的语义）
    pub fn register_case(&mut self, name: impl Into<String>, body: impl Into<String>) {
        let name = name.into();
        let body = body.into();
        match self.cases.iter_mut().find(|case| case.name == name) {
            Some(existing) => existing.body = body,
            None => self.cases.push(TestCase { name, body }),
        }
    }

    /// 按声明顺序枚举用例标识；没有用例时返回 None（哨兵，不是错误）
    pub fn discover(&self) -> Option<Vec<String>> {
        if self.cases.is_empty() {
            None
        } else {
            Some(self.cases.iter().map(|case| case.name.clone()).collect())
        }
    }

    pub fn case(&self, name: &str) -> Option<&TestCase> {
        self.cases.iter().find(|case| case.name == name)
    }

    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    pub fn helpers(&self) -> &[FunctionDef] {
        &self.helpers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ScriptParser;

    #[test]
    fn test_discover_empty_is_none() {
        let registry = CaseRegistry::new();
        assert_eq!(registry.discover(), None);
    }

    #[test]
    fn test_load_preserves_declaration_order() {
        let script = ScriptParser::parse_content(
            "test::case::b() {\n    true\n}\ntest::case::a() {\n    true\n}\n",
        )
        .unwrap();
        let mut registry = CaseRegistry::new();
        registry.load(script);

        assert_eq!(
            registry.discover(),
            Some(vec!["b".to_string(), "a".to_string()])
        );
    }

    #[test]
    fn test_duplicate_case_replaced_in_place() {
        let mut registry = CaseRegistry::new();
        registry.register_case("one", "false");
        registry.register_case("two", "true");
        registry.register_case("one", "true");

        assert_eq!(
            registry.discover(),
            Some(vec!["one".to_string(), "two".to_string()])
        );
        assert_eq!(registry.case("one").map(|c| c.body.as_str()), Some("true"));
    }

    #[test]
    fn test_reset_clears_cases_and_hooks() {
        let script = ScriptParser::parse_content(
            "setup() {\n    true\n}\ntest::case::one() {\n    true\n}\n",
        )
        .unwrap();
        let mut registry = CaseRegistry::new();
        registry.load(script);
        assert!(registry.hooks().setup.is_some());

        registry.reset();
        assert_eq!(registry.discover(), None);
        assert_eq!(registry.hooks(), &Hooks::default());
        assert!(registry.helpers().is_empty());
    }
}
