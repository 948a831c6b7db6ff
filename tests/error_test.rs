use rusht::parser::ScriptParseError;
use rusht::{Result, RushtError};

#[test]
fn test_invalid_mode() {
    let err = RushtError::InvalidMode("bogus".to_string());
    assert_eq!(err.to_string(), "无效的执行模式: bogus");
}

#[test]
fn test_file_not_found() {
    let err = RushtError::FileNotFound("missing.sh".to_string());
    assert_eq!(err.to_string(), "文件不存在: missing.sh");
}

#[test]
fn test_parse_error() {
    let err = RushtError::ParseError("test error".to_string());
    assert_eq!(err.to_string(), "解析错误: test error");
}

#[test]
fn test_error_conversion_from_anyhow() {
    let anyhow_err = anyhow::anyhow!("test anyhow error");
    let rusht_err: RushtError = anyhow_err.into();
    assert!(rusht_err.to_string().contains("test anyhow error"));
}

#[test]
fn test_error_conversion_from_script_parse_error() {
    let parse_err = ScriptParseError::InvalidSyntax {
        line: 3,
        message: "bad line".to_string(),
    };
    let rusht_err: RushtError = parse_err.into();
    match rusht_err {
        RushtError::ParseError(msg) => {
            assert!(msg.contains("line 3"));
            assert!(msg.contains("bad line"));
        }
        other => panic!("Expected ParseError, got {other:?}"),
    }
}

#[test]
fn test_io_parse_error_stays_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let rusht_err: RushtError = ScriptParseError::Io(io_err).into();
    assert!(matches!(rusht_err, RushtError::IoError(_)));
}

#[test]
fn test_result_type() {
    fn returns_error() -> Result<()> {
        Err(RushtError::InvalidMode("test".to_string()))
    }

    let result = returns_error();
    assert!(result.is_err());
    match result {
        Err(RushtError::InvalidMode(name)) => assert_eq!(name, "test"),
        _ => panic!("Expected InvalidMode"),
    }
}
