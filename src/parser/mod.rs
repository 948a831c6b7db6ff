pub mod script_file;
pub mod types;

// Re-export commonly used types
pub use script_file::{CASE_PREFIX, ScriptParser};
pub use types::{FunctionDef, ParseResult, ParsedScript, ScriptParseError};

/// 从文件路径解析测试脚本
pub fn parse_file<P: AsRef<std::path::Path>>(path: P) -> ParseResult<ParsedScript> {
    ScriptParser::parse_file(path)
}

/// 从字符串内容解析测试脚本
pub fn parse_content(content: &str) -> ParseResult<ParsedScript> {
    ScriptParser::parse_content(content)
}
