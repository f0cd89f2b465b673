//! 文件查找模块
//!
//! 这个模块实现目录树搜索：单线程按深度优先先序遍历目录树，
//! 每个通过类型过滤的条目都作为独立任务交给匹配线程池做名称匹配，
//! 匹配结果在互斥锁保护下汇总。

mod thread_pool;
pub mod filter;
pub mod options;
pub mod walker;

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use log::{debug, info};
use rayon::ThreadPool;

pub use thread_pool::ThreadPoolConfig;
pub use self::filter::{FileFilter, NameFilter, TypeFilter};
pub use self::options::{EntryType, SearchConfig};
pub use self::walker::{Step, TreeWalker};

use crate::errors::{FindResult, WalkError};

/// 一次搜索的匹配结果，顺序不保证
pub type MatchSet = Vec<PathBuf>;

/// 文件查找器
///
/// 持有一次搜索的配置和匹配线程池。
#[derive(Debug)]
pub struct Finder {
    config: SearchConfig,
    pool: ThreadPool,
}

impl Finder {
    /// 创建新的文件查找器实例
    pub fn new(config: SearchConfig) -> FindResult<Self> {
        let pool = ThreadPoolConfig::with_threads(config.threads).build()?;
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// 执行搜索，跳过的条目以 `Skipping: ...` 的形式打印到标准输出
    pub fn search(&self) -> FindResult<MatchSet> {
        self.search_with(|err| println!("{}", err.diagnostic()))
    }

    /// 执行搜索，每个跳过的条目都会在遍历线程上回调 `on_skip`
    ///
    /// 只有根路径无法访问时才会返回错误，此时不返回任何部分结果。
    pub fn search_with<R>(&self, on_skip: R) -> FindResult<MatchSet>
    where
        R: FnMut(&WalkError),
    {
        self.search_steps(TreeWalker::new(self.config.root()), on_skip)
    }

    /// 在给定的遍历步骤上执行匹配
    pub(crate) fn search_steps<S, R>(&self, steps: S, mut on_skip: R) -> FindResult<MatchSet>
    where
        S: IntoIterator<Item = FindResult<Step>>,
        R: FnMut(&WalkError),
    {
        let config = &self.config;
        let type_filter = TypeFilter::from(config);
        let name_filter = NameFilter::from_config(config);
        let matches = Mutex::new(MatchSet::new());

        info!("Starting search in {} for '{}'", config.root.display(), config.pattern);
        debug!("Type filter: {}, name filter: {}",
               type_filter.description(), name_filter.description());
        let start_time = Instant::now();

        // in_place_scope 让遍历留在当前线程，作用域结束时等待所有匹配任务完成
        let walked = self.pool.in_place_scope(|scope| -> FindResult<usize> {
            let mut scheduled = 0;
            for step in steps {
                let entry = match step? {
                    Step::Visit(entry) => entry,
                    Step::Skip(err) => {
                        debug!("Skipping {}", err);
                        on_skip(&err);
                        continue;
                    }
                };

                // 类型过滤只决定是否匹配，不影响是否继续向下遍历
                if !type_filter.matches(&entry) {
                    continue;
                }

                let name_filter = &name_filter;
                let matches = &matches;
                scheduled += 1;
                scope.spawn(move |_| {
                    if name_filter.matches(&entry) {
                        debug!("Matched {}", entry.path().display());
                        let path = entry.into_path();
                        matches
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .push(path);
                    }
                });
            }
            Ok(scheduled)
        });

        let scheduled = walked?;
        let matches = matches.into_inner().unwrap_or_else(PoisonError::into_inner);
        info!("Tested {} entries, {} matched, in {:.2?}",
              scheduled, matches.len(), start_time.elapsed());

        Ok(matches)
    }
}

/// 使用默认线程池执行一次搜索
pub fn search(config: SearchConfig) -> FindResult<MatchSet> {
    Finder::new(config)?.search()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FindError;
    use std::collections::HashSet;
    use std::fs::{self, File};
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    /// root/{a.txt, B.TXT, sub/a.txt}
    fn create_test_tree() -> TempDir {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        File::create(root.join("a.txt")).unwrap();
        File::create(root.join("B.TXT")).unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        File::create(root.join("sub/a.txt")).unwrap();
        temp_dir
    }

    fn run(config: SearchConfig) -> HashSet<PathBuf> {
        let finder = Finder::new(config).unwrap();
        finder
            .search_with(|err| panic!("Unexpected skip: {}", err))
            .unwrap()
            .into_iter()
            .collect()
    }

    fn set(root: &Path, names: &[&str]) -> HashSet<PathBuf> {
        names.iter().map(|n| root.join(n)).collect()
    }

    #[test]
    fn test_search_case_insensitive() {
        let temp_dir = create_test_tree();
        let root = temp_dir.path();

        // 与 "a.txt" 大小写不敏感地匹配的只有 a.txt，B.TXT 需要通配符
        let results = run(SearchConfig::new(root, "a.txt"));
        assert_eq!(results, set(root, &["a.txt", "sub/a.txt"]));

        let results = run(SearchConfig::new(root, "?.txt"));
        assert_eq!(results, set(root, &["a.txt", "B.TXT", "sub/a.txt"]));
    }

    #[test]
    fn test_search_case_sensitive() {
        let temp_dir = create_test_tree();
        let root = temp_dir.path();

        let results = run(SearchConfig::new(root, "?.txt").with_case_sensitive(true));
        assert_eq!(results, set(root, &["a.txt", "sub/a.txt"]));

        let results = run(SearchConfig::new(root, "A.TXT").with_case_sensitive(true));
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_dirs_only() {
        let temp_dir = create_test_tree();
        let root = temp_dir.path();

        let config = SearchConfig::new(root, "sub").with_entry_type(EntryType::DirsOnly);
        assert_eq!(run(config), set(root, &["sub"]));

        let config = SearchConfig::new(root, "a.txt").with_entry_type(EntryType::DirsOnly);
        assert!(run(config).is_empty());
    }

    #[test]
    fn test_files_only_still_descends() {
        let temp_dir = create_test_tree();
        let root = temp_dir.path();

        let config = SearchConfig::new(root, "*").with_entry_type(EntryType::FilesOnly);
        assert_eq!(run(config), set(root, &["a.txt", "B.TXT", "sub/a.txt"]));
    }

    #[test]
    fn test_search_includes_root() {
        let temp_dir = create_test_tree();
        let root = temp_dir.path();
        let root_name = root.file_name().unwrap().to_string_lossy().into_owned();

        let results = run(SearchConfig::new(root, root_name));
        assert!(results.contains(root));
    }

    #[test]
    fn test_search_empty_tree() {
        let temp_dir = tempdir().unwrap();
        let results = run(SearchConfig::new(temp_dir.path(), "*.txt"));
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_malformed_pattern_matches_nothing() {
        let temp_dir = create_test_tree();
        let results = run(SearchConfig::new(temp_dir.path(), "["));
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_missing_root() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("missing");

        match search(SearchConfig::new(&missing, "*")) {
            Err(FindError::Traversal { path, .. }) => assert_eq!(path, missing),
            other => panic!("Expected Traversal error, got {:?}", other),
        }
    }

    #[test]
    fn test_search_is_idempotent() {
        let temp_dir = create_test_tree();
        let config = SearchConfig::new(temp_dir.path(), "*").with_threads(Some(4));

        let first = run(config.clone());
        let second = run(config);
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_search_many_entries_single_thread() {
        let temp_dir = tempdir().unwrap();
        for i in 0..200 {
            File::create(temp_dir.path().join(format!("file{}.log", i))).unwrap();
        }
        File::create(temp_dir.path().join("other.txt")).unwrap();

        let config = SearchConfig::new(temp_dir.path(), "*.LOG").with_threads(Some(1));
        assert_eq!(run(config).len(), 200);
    }

    #[test]
    fn test_vanished_subtree_does_not_hide_siblings() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        File::create(root.join("a.txt")).unwrap();
        for dir in ["b_dir", "c_dir"] {
            fs::create_dir(root.join(dir)).unwrap();
            File::create(root.join(dir).join("a.txt")).unwrap();
        }

        // 根目录产出时列表已读完，随后删除 b_dir，遍历到它时打开会失败
        let b_dir = root.join("b_dir");
        let mut first = true;
        let steps = TreeWalker::new(root).inspect(|_| {
            if std::mem::take(&mut first) {
                fs::remove_dir_all(&b_dir).unwrap();
            }
        });

        let finder = Finder::new(SearchConfig::new(root, "a.txt")).unwrap();
        let mut skipped = Vec::new();
        let results: HashSet<PathBuf> = finder
            .search_steps(steps, |err| skipped.push(err.clone()))
            .unwrap()
            .into_iter()
            .collect();

        assert_eq!(results, set(root, &["a.txt", "c_dir/a.txt"]));
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].path(), b_dir.as_path());
        assert!(skipped[0].diagnostic().starts_with("Skipping: "));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subtree_does_not_hide_siblings() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = create_test_tree();
        let root = temp_dir.path();
        let locked = root.join("locked");
        fs::create_dir(&locked).unwrap();
        File::create(locked.join("a.txt")).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // 以 root 运行时权限位不起作用，这里没有可测的内容
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let finder = Finder::new(SearchConfig::new(root, "a.txt")).unwrap();
        let mut skipped = Vec::new();
        let results: HashSet<PathBuf> = finder
            .search_with(|err| skipped.push(err.clone()))
            .unwrap()
            .into_iter()
            .collect();

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(results, set(root, &["a.txt", "sub/a.txt"]));
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].path(), locked.as_path());
        assert!(skipped[0].is_access_denied());
    }
}
