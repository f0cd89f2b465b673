use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info};

use rust_search::cli::{self, Invocation};
use rust_search::finder::{Finder, SearchConfig};

fn main() {
    // 解析命令行参数（不含程序名）
    let invocation = match cli::resolve(std::env::args_os().skip(1)) {
        Ok(invocation) => invocation,
        Err(err) => {
            println!("Error: {}", err);
            print!("{}", cli::usage());
            process::exit(1);
        }
    };

    let (config, debug_logging) = match invocation {
        Invocation::Help => {
            print!("{}", cli::usage());
            return;
        }
        Invocation::Version(version) => {
            print!("{}", version);
            return;
        }
        Invocation::Search { config, debug } => (config, debug),
    };

    // 初始化日志
    env_logger::Builder::new()
        .filter_level(if debug_logging {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    // 致命错误只输出一行，不显示帮助
    if let Err(err) = run(config) {
        println!("Error: {}: {}", err, err.root_cause());
        process::exit(1);
    }
}

fn run(config: SearchConfig) -> Result<()> {
    info!("开始运行 rust-search");
    debug!("配置: {:?}", config);
    let start_time = Instant::now();
    let root = config.root.clone();

    let finder = Finder::new(config).context("failed to create matcher thread pool")?;
    let matches = finder
        .search()
        .with_context(|| format!("file search failed in {}", root.display()))?;

    print!("{}", cli::render_matches(&matches));

    info!("搜索完成，耗时 {:.2?}", start_time.elapsed());
    Ok(())
}
