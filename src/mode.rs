use crate::error::{Result, RushtError};

/// 测试用例的执行模式
///
/// 每个用例会在每个激活的模式下独立执行一次，
/// 模式决定用例体内失败步骤的传播方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// 继承环境当前的错误传播设置
    Default,
    /// 强制关闭错误传播，只看最后一步的结果
    Loose,
    /// 强制开启错误传播，第一个失败步骤终止用例体
    Strict,
    /// 与 Strict 相同的设置，但失败被限制在子作用域内
    StrictIgnored,
}

impl Mode {
    /// 固定顺序的全部模式，作为空输入时的默认集合
    pub const ALL: [Mode; 4] = [Mode::Default, Mode::Loose, Mode::Strict, Mode::StrictIgnored];

    /// 模式名称（命令行 / RUSHT_MODES / test::modes 中使用）
    pub fn name(self) -> &'static str {
        match self {
            Mode::Default => "default",
            Mode::Loose => "loose",
            Mode::Strict => "strict",
            Mode::StrictIgnored => "strict-ignored",
        }
    }

    /// 按名称查找模式，大小写不敏感
    pub fn from_name(name: &str) -> Option<Mode> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(name))
    }

    /// 该模式下用例体使用的错误传播策略
    pub fn policy(self) -> ErrorPolicy {
        match self {
            Mode::Default => ErrorPolicy::Inherit,
            Mode::Loose => ErrorPolicy::Permissive,
            Mode::Strict => ErrorPolicy::Abort,
            Mode::StrictIgnored => ErrorPolicy::AbortConfined,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 用例体执行时的错误传播策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// 不加前导指令，沿用环境设置
    Inherit,
    /// set +eu
    Permissive,
    /// set -eu
    Abort,
    /// set -eu，且用例体包在一个不向外传播终止的子作用域里
    AbortConfined,
}

/// 进程级的默认严格设置
///
/// Default 模式继承它；测试文件顶层的 `set -e` / `set +e` 指令
/// 在该文件运行期间改写它，FileRunner 负责快照与恢复。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmbientPolicy {
    pub strict: bool,
}

/// 激活模式集合
///
/// 一次运行配置一次（套件级），测试文件可以临时覆盖，
/// 覆盖通过 snapshot / restore 撤销。
#[derive(Debug, Clone)]
pub struct ModeRegistry {
    active: Vec<Mode>,
}

impl ModeRegistry {
    pub fn new() -> Self {
        Self {
            active: Mode::ALL.to_vec(),
        }
    }

    /// 校验并替换激活模式集合
    ///
    /// 空白名称被忽略；遇到第一个未知名称即整体失败，
    /// 不做任何修改；过滤后为空则回落到全部四个模式；
    /// 重复名称去重并保持首次出现的顺序。
    pub fn set_modes<'a, I>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut validated = Vec::new();

        for name in names {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            match Mode::from_name(name) {
                Some(mode) => {
                    if !validated.contains(&mode) {
                        validated.push(mode);
                    }
                }
                None => return Err(RushtError::InvalidMode(name.to_string())),
            }
        }

        if validated.is_empty() {
            validated = Mode::ALL.to_vec();
        }

        self.active = validated;
        Ok(())
    }

    /// 当前激活的模式，按配置顺序
    pub fn active(&self) -> &[Mode] {
        &self.active
    }

    pub fn snapshot(&self) -> Vec<Mode> {
        self.active.clone()
    }

    pub fn restore(&mut self, modes: Vec<Mode>) {
        self.active = modes;
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
