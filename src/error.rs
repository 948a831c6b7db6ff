use thiserror::Error;

#[derive(Error, Debug)]
pub enum RushtError {
    #[error("无效的执行模式: {0}")]
    InvalidMode(String),

    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

// Add conversion from anyhow::Error
impl From<anyhow::Error> for RushtError {
    fn from(err: anyhow::Error) -> Self {
        RushtError::Other(err.to_string())
    }
}

// Add conversion from parser::ScriptParseError
impl From<crate::parser::ScriptParseError> for RushtError {
    fn from(err: crate::parser::ScriptParseError) -> Self {
        match err {
            crate::parser::ScriptParseError::Io(err) => RushtError::IoError(err),
            other => RushtError::ParseError(other.to_string()),
        }
    }
}

/// Result type for rusht crate
pub type Result<T> = std::result::Result<T, RushtError>;
