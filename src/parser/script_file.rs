use crate::parser::types::{FunctionDef, ParseResult, ParsedScript, ScriptParseError};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// 测试用例函数名的前缀约定
pub const CASE_PREFIX: &str = "test::case::";

/// 模式覆盖指令的引导词
const MODES_DIRECTIVE: &str = "test::modes";

/// 测试脚本解析器
///
/// 支持的脚本格式是一个受限的 shell 函数文件：
/// - `# 注释` 和空行被忽略
/// - `name() {` 开启一个函数，列首单独一行的 `}` 结束它，
///   函数体各行原样保留（内部代码块的大括号必须缩进）
/// - `test::case::<id>` 函数是测试用例，`setup` / `teardown`
///   覆盖钩子，其余函数是可被用例体调用的辅助函数
/// - `test::modes <name>...` 声明该文件的模式集合
/// - 顶层的 `set -e` / `set +e`（以及 -u/-eu 变体）声明文件级
///   严格设置
/// - 其余顶层内容是解析错误
pub struct ScriptParser;

impl ScriptParser {
    /// 从文件路径解析
    pub fn parse_file<P: AsRef<Path>>(path: P) -> ParseResult<ParsedScript> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse_content(&content)
    }

    /// 从字符串内容解析
    pub fn parse_content(content: &str) -> ParseResult<ParsedScript> {
        let mut script = ParsedScript::default();
        let mut current: Option<(String, usize, Vec<String>)> = None;

        for (index, raw_line) in content.lines().enumerate() {
            let line_number = index + 1;

            if let Some((name, start_line, mut body_lines)) = current.take() {
                if raw_line.trim_end() == "}" {
                    let body = body_lines.join("\n");
                    Self::add_function(&mut script, name, body, start_line)?;
                } else {
                    body_lines.push(raw_line.to_string());
                    current = Some((name, start_line, body_lines));
                }
                continue;
            }

            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = Self::parse_function_header(line) {
                current = Some((name, line_number, Vec::new()));
                continue;
            }

            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some(MODES_DIRECTIVE) => {
                    script.modes = Some(tokens.map(str::to_string).collect());
                }
                Some("set") => {
                    script.strict = Some(Self::parse_set_directive(tokens, line_number)?);
                }
                _ => {
                    return Err(ScriptParseError::InvalidSyntax {
                        line: line_number,
                        message: format!("Unexpected top-level content: '{line}'"),
                    });
                }
            }
        }

        if let Some((name, start_line, _)) = current {
            return Err(ScriptParseError::UnterminatedFunction {
                name,
                line: start_line,
            });
        }

        Ok(script)
    }

    /// 识别 `name() {` 形式的函数头，返回函数名
    fn parse_function_header(line: &str) -> Option<String> {
        static HEADER_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = HEADER_REGEX.get_or_init(|| {
            Regex::new(r"^(?:function\s+)?([A-Za-z_][A-Za-z0-9_:.-]*)\s*\(\s*\)\s*\{$").unwrap()
        });

        re.captures(line).map(|caps| caps[1].to_string())
    }

    /// 解析顶层 `set` 指令，返回严格设置的开/关
    fn parse_set_directive<'a, I>(flags: I, line_number: usize) -> ParseResult<bool>
    where
        I: Iterator<Item = &'a str>,
    {
        let mut strict = None;

        for flag in flags {
            let mut chars = flag.chars();
            let sign = chars.next();
            let options = chars.as_str();
            let known = !options.is_empty() && options.chars().all(|c| c == 'e' || c == 'u');
            match sign {
                Some('-') if known => strict = Some(true),
                Some('+') if known => strict = Some(false),
                _ => {
                    return Err(ScriptParseError::InvalidSyntax {
                        line: line_number,
                        message: format!("Unsupported set option '{flag}'"),
                    });
                }
            }
        }

        strict.ok_or_else(|| ScriptParseError::InvalidSyntax {
            line: line_number,
            message: "set directive without options".to_string(),
        })
    }

    /// 按名称约定把一个完整的函数归类进解析结果
    fn add_function(
        script: &mut ParsedScript,
        name: String,
        body: String,
        start_line: usize,
    ) -> ParseResult<()> {
        if let Some(case_name) = name.strip_prefix(CASE_PREFIX) {
            if case_name.is_empty() {
                return Err(ScriptParseError::InvalidSyntax {
                    line: start_line,
                    message: "Empty test case name".to_string(),
                });
            }
            script.cases.push(FunctionDef::new(case_name, body));
        } else if name == "setup" {
            script.setup = Some(body);
        } else if name == "teardown" {
            script.teardown = Some(body);
        } else {
            script.helpers.push(FunctionDef::new(name, body));
        }
        Ok(())
    }
}
