//! 匹配线程池模块
//!
//! 根据 CPU 核心数决定匹配任务使用的线程数量，并构建 rayon 线程池。

use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::errors::FindResult;

/// 线程池配置选项
#[derive(Debug, Clone)]
pub struct ThreadPoolConfig {
    /// 最小线程数
    pub min_threads: usize,
    /// 最大线程数
    pub max_threads: usize,
    /// 显式指定的线程数，优先于自动计算
    pub threads: Option<usize>,
}

impl Default for ThreadPoolConfig {
    fn default() -> Self {
        Self {
            min_threads: 2,
            max_threads: num_cpus::get().max(2),
            threads: None,
        }
    }
}

impl ThreadPoolConfig {
    /// 使用显式线程数创建配置
    pub fn with_threads(threads: Option<usize>) -> Self {
        Self {
            threads,
            ..Self::default()
        }
    }

    /// 计算实际使用的线程数
    pub fn thread_count(&self) -> usize {
        if let Some(threads) = self.threads {
            return threads.max(1);
        }

        let cpu_count = num_cpus::get();
        let threads = cpu_count
            .max(self.min_threads) // 至少使用min_threads
            .min(self.max_threads.max(self.min_threads)); // 不超过max_threads

        debug!(
            "Thread count - cpus: {}, min: {}, max: {}, chosen: {}",
            cpu_count, self.min_threads, self.max_threads, threads
        );
        threads
    }

    /// 构建匹配线程池
    pub fn build(&self) -> FindResult<ThreadPool> {
        let threads = self.thread_count();
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("matcher-{}", index))
            .build()?;

        debug!("Built matcher pool with {} threads", threads);
        Ok(pool)
    }
}
