//! 在目录树中按通配符查找文件和目录的库
//!
//! 本库提供递归的名称搜索功能，支持：
//! - 单线程深度优先遍历，名称匹配在线程池中并行执行
//! - shell 风格的通配符（`*`、`?`、`[...]`），只匹配条目的基本名称
//! - 大小写敏感/不敏感匹配
//! - 只查找文件或只查找目录
//! - 无法访问的子树会被报告并跳过，不会中断搜索
//!
//! # 示例
//!
//! 基本用法：
//! ```no_run
//! use rust_search::finder::{Finder, EntryType, SearchConfig};
//!
//! // 只查找文件，大小写敏感
//! let config = SearchConfig::new(".", "*.rs")
//!     .with_entry_type(EntryType::FilesOnly)
//!     .with_case_sensitive(true);
//!
//! let finder = Finder::new(config).unwrap();
//!
//! // 执行查找，跳过的条目交给回调处理
//! let results = finder
//!     .search_with(|skipped| eprintln!("跳过: {}", skipped))
//!     .unwrap();
//!
//! // 输出结果（顺序不保证）
//! for path in results {
//!     println!("找到: {}", path.display());
//! }
//! ```
//!
//! 更多用法请参考各模块文档。

pub mod cli;
pub mod errors;
pub mod finder;

// Re-export main types for convenience
pub use errors::{FindError, FindResult, WalkError};
pub use finder::{search, Finder, MatchSet, SearchConfig};
