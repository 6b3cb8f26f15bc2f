use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use search_digest::config::SearchEngineKind;
use search_digest::services::report_writer::render_report;
use search_digest::{logger, App, Config};

/// 搜索并为每个结果页面生成摘要
#[derive(Debug, Parser)]
#[command(name = "search-digest", version)]
struct Cli {
    /// 查询内容
    query: String,

    /// 最多处理的链接数
    #[arg(short = 'n', long)]
    max_results: Option<usize>,

    /// 搜索引擎 (bing | duckduckgo)
    #[arg(long)]
    engine: Option<SearchEngineKind>,

    /// 在逐条摘要之后生成综述
    #[arg(long)]
    digest: bool,

    /// 以 JSON 输出结果
    #[arg(long)]
    json: bool,

    /// 追加写入的报告文件
    #[arg(long)]
    report: Option<PathBuf>,

    /// TOML 配置文件
    #[arg(short, long, env = "SEARCH_DIGEST_CONFIG")]
    config: Option<PathBuf>,

    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// 命令行参数覆盖配置
    fn apply(&self, config: &mut Config) {
        if let Some(max_results) = self.max_results {
            config.max_results = max_results;
        }
        if let Some(engine) = self.engine {
            config.search_engine = engine;
        }
        if self.digest {
            config.digest = true;
        }
        if let Some(report) = &self.report {
            config.report_file = Some(report.to_string_lossy().to_string());
        }
        if self.verbose {
            config.verbose_logging = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 加载 .env（不存在时忽略）
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::load(cli.config.as_deref()).context("加载配置失败")?;
    cli.apply(&mut config);

    // 初始化日志
    logger::init(config.verbose_logging);

    // 初始化并运行应用
    let app = App::initialize(config)?;
    let result = app.run(&cli.query).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_report(&result, chrono::Local::now()));
    }

    Ok(())
}
