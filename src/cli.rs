//! rust-search 的命令行接口
//!
//! 本模块负责把原始参数解析为搜索配置，并提供帮助文本和结果输出的格式。
//!
//! 参数逐个分类：与某个已知选项完全相同的记号是选项，其余一律按出现顺序
//! 作为位置参数，包括以 `-` 开头的记号（例如模式 `-*.log`）和 `--`。
//! clap 的定义只用于生成帮助和版本文本。

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use crate::errors::{FindError, FindResult};
use crate::finder::options::{EntryType, SearchConfig};

/// 在目录树中按通配符查找文件和目录
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(
    name = "rust-search",
    author,
    version,
    about,
    long_about = None,
    override_usage = "rust-search <DIRECTORY> <PATTERN> [OPTIONS]",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// 搜索根目录和通配符模式，按此顺序给出，可与选项任意交错
    #[arg(value_name = "DIRECTORY PATTERN")]
    pub positionals: Vec<OsString>,

    /// Only return files
    #[arg(short = 'f', long = "file")]
    pub file_only: bool,

    /// Only return directories
    #[arg(short = 'd', long = "dir")]
    pub dir_only: bool,

    /// Make the search case-sensitive
    #[arg(short = 'c', long = "casesensitive")]
    pub case_sensitive: bool,

    /// Display this help message
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Print version information
    #[arg(short = 'V', long = "version")]
    pub version: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub debug: bool,
}

/// 参数解析后要做的事
#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    /// 打印帮助并成功退出
    Help,
    /// 打印版本并成功退出
    Version(String),
    /// 执行搜索
    Search { config: SearchConfig, debug: bool },
}

impl Cli {
    /// 逐个分类记号；选项可重复，重复无副作用
    pub fn from_tokens<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut cli = Cli::default();
        for arg in args {
            let arg = arg.into();
            match arg.to_str() {
                Some("-f" | "--file") => cli.file_only = true,
                Some("-d" | "--dir") => cli.dir_only = true,
                Some("-c" | "--casesensitive") => cli.case_sensitive = true,
                Some("-h" | "--help") => cli.help = true,
                Some("-V" | "--version") => cli.version = true,
                Some("--debug") => cli.debug = true,
                _ => cli.positionals.push(arg),
            }
        }
        cli
    }

    /// 构建搜索配置
    pub fn build_config(&self) -> FindResult<SearchConfig> {
        let [root, pattern] = self.positionals.as_slice() else {
            return Err(FindError::usage("invalid number of positional arguments"));
        };

        let entry_type = match (self.file_only, self.dir_only) {
            (true, true) => {
                return Err(FindError::usage(
                    "file-only and dir-only are mutually exclusive",
                ))
            }
            (true, false) => EntryType::FilesOnly,
            (false, true) => EntryType::DirsOnly,
            (false, false) => EntryType::Any,
        };

        let pattern = pattern
            .to_str()
            .ok_or_else(|| FindError::usage("pattern is not valid UTF-8"))?;

        Ok(SearchConfig::new(PathBuf::from(root), pattern)
            .with_entry_type(entry_type)
            .with_case_sensitive(self.case_sensitive))
    }

    /// 帮助请求优先于其他所有校验
    pub fn into_invocation(self) -> FindResult<Invocation> {
        if self.help {
            return Ok(Invocation::Help);
        }
        if self.version {
            return Ok(Invocation::Version(Cli::command().render_version()));
        }

        let config = self.build_config()?;
        Ok(Invocation::Search {
            config,
            debug: self.debug,
        })
    }
}

/// 解析不含程序名的参数列表
pub fn resolve<I, T>(args: I) -> FindResult<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    Cli::from_tokens(args).into_invocation()
}

/// 帮助文本
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// 按输出约定格式化匹配结果
pub fn render_matches(matches: &[PathBuf]) -> String {
    if matches.is_empty() {
        return "No path matches the pattern\n".to_string();
    }

    let mut out = String::from("Found Paths:\n");
    for path in matches {
        out.push_str(&path.display().to_string());
        out.push('\n');
    }
    out
}
