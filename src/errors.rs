use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for operations that can produce FindError
pub type FindResult<T> = Result<T, FindError>;

/// rust-search 的错误类型
#[derive(Debug, Error)]
pub enum FindError {
    /// 命令行参数有误
    #[error("{0}")]
    Usage(String),

    /// 遍历在根路径处就无法开始
    #[error("cannot search {}: {source}", .path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// 匹配线程池创建失败
    #[error("failed to build matcher thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl FindError {
    pub fn usage(message: impl Into<String>) -> Self {
        FindError::Usage(message.into())
    }
}

/// Why an entry was skipped during the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkErrorKind {
    /// The platform refused access to the entry
    AccessDenied,
    /// Anything else, with the raw error text
    Unhandled(String),
}

impl WalkErrorKind {
    /// Best-effort classification, used for the diagnostic wording only.
    pub fn classify(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => WalkErrorKind::AccessDenied,
            _ => WalkErrorKind::Unhandled(err.to_string()),
        }
    }
}

/// A per-entry failure reported by the walk. It is logged and dropped,
/// never returned to the caller of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkError {
    pub path: PathBuf,
    pub kind: WalkErrorKind,
}

impl WalkError {
    pub fn new(path: impl Into<PathBuf>, kind: WalkErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_access_denied(&self) -> bool {
        self.kind == WalkErrorKind::AccessDenied
    }

    /// The line printed while walking
    pub fn diagnostic(&self) -> String {
        format!("Skipping: {}", self)
    }
}

impl From<walkdir::Error> for WalkError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        let kind = match err.io_error() {
            Some(io_err) => WalkErrorKind::classify(io_err),
            // 只有符号链接循环会走到这里
            None => WalkErrorKind::Unhandled(err.to_string()),
        };
        Self { path, kind }
    }
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WalkErrorKind::AccessDenied => write!(f, "{} (Access Denied)", self.path.display()),
            WalkErrorKind::Unhandled(raw) => {
                write!(f, "{} (Unhandled Error): {}", self.path.display(), raw)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_display() {
        let err = FindError::usage("invalid number of positional arguments");
        assert_eq!(err.to_string(), "invalid number of positional arguments");
    }

    #[test]
    fn test_classify_permission_denied() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(WalkErrorKind::classify(&io_error), WalkErrorKind::AccessDenied);
    }

    #[test]
    fn test_classify_other_keeps_raw_text() {
        let io_error = io::Error::new(io::ErrorKind::Other, "disk on fire");
        match WalkErrorKind::classify(&io_error) {
            WalkErrorKind::Unhandled(raw) => assert!(raw.contains("disk on fire")),
            other => panic!("Expected Unhandled, got {:?}", other),
        }
    }

    #[test]
    fn test_walk_error_display() {
        let denied = WalkError::new("/test/locked", WalkErrorKind::AccessDenied);
        assert_eq!(denied.to_string(), "/test/locked (Access Denied)");
        assert!(denied.is_access_denied());

        let other = WalkError::new("/test/bad", WalkErrorKind::Unhandled("boom".to_string()));
        assert_eq!(other.to_string(), "/test/bad (Unhandled Error): boom");
        assert!(!other.is_access_denied());

        assert_eq!(denied.diagnostic(), "Skipping: /test/locked (Access Denied)");
    }
}
