//! 容错的目录遍历
//!
//! 在 walkdir 之上包装一层：单个条目的错误被转换为可跳过的 [`WalkError`]，
//! 只有根路径本身无法访问时才返回致命错误。

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::errors::{FindError, FindResult, WalkError};

/// 遍历中的一步
#[derive(Debug)]
pub enum Step {
    /// 成功访问到的条目
    Visit(DirEntry),
    /// 读取失败、需要跳过的条目
    Skip(WalkError),
}

/// 深度优先、先序的目录遍历器
///
/// 不跟随符号链接。根条目本身也会被产出。同一目录下的条目按文件名顺序产出，
/// 目录在产出时就已读完整个列表。
pub struct TreeWalker {
    inner: walkdir::IntoIter,
    root: PathBuf,
    started: bool,
    finished: bool,
}

impl TreeWalker {
    /// 以 `root` 为根创建遍历器
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let inner = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        Self {
            inner,
            root,
            started: false,
            finished: false,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 第一次产出之前的错误意味着根路径无法 stat，遍历根本没有开始
    fn handle_error(&mut self, err: walkdir::Error) -> FindResult<Step> {
        if !self.started {
            self.finished = true;
            return Err(FindError::Traversal {
                path: self.root.clone(),
                source: err,
            });
        }

        Ok(Step::Skip(WalkError::from(err)))
    }
}

impl Iterator for TreeWalker {
    type Item = FindResult<Step>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let item = match self.inner.next() {
            Some(Ok(entry)) => Ok(Step::Visit(entry)),
            Some(Err(err)) => self.handle_error(err),
            None => {
                self.finished = true;
                return None;
            }
        };
        self.started = true;
        Some(item)
    }
}
