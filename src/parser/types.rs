/// 一个函数定义（名称 + 原样保留的函数体）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: String,

    /// 函数体各行按原样拼接，保留缩进
    pub body: String,
}

impl FunctionDef {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// 整个测试脚本的解析结果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedScript {
    /// 测试用例，名称已剥掉 `test::case::` 前缀，保持声明顺序
    pub cases: Vec<FunctionDef>,

    /// setup 钩子的函数体（缺省为 no-op）
    pub setup: Option<String>,

    /// teardown 钩子的函数体（缺省为 no-op）
    pub teardown: Option<String>,

    /// 普通辅助函数，会被重新注入每个生成的执行脚本
    pub helpers: Vec<FunctionDef>,

    /// `test::modes` 指令声明的模式名（未校验，交给 ModeRegistry）
    pub modes: Option<Vec<String>>,

    /// 顶层 `set -e` / `set +e` 指令声明的文件级严格设置
    pub strict: Option<bool>,
}

/// 解析错误类型
#[derive(Debug, thiserror::Error)]
pub enum ScriptParseError {
    /// 顶层出现无法识别的内容
    #[error("Invalid syntax at line {line}: {message}")]
    InvalidSyntax { line: usize, message: String },

    /// 函数缺少列首的收尾大括号
    #[error("Unterminated function '{name}' starting at line {line}")]
    UnterminatedFunction { name: String, line: usize },

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 解析结果类型别名
pub type ParseResult<T> = Result<T, ScriptParseError>;
