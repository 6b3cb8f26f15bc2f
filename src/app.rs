use tracing::{error, info};

use crate::browser::ChromeLauncher;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::ResultSet;
use crate::orchestrator::{LoggingObserver, Pipeline, PipelineSettings, ProgressObserver};
use crate::services::{OpenAiSummarizer, ReportWriter, SearchProvider};
use crate::utils::logging::{log_startup, print_final_stats};

/// 应用主结构
pub struct App {
    config: Config,
    pipeline: Pipeline<ChromeLauncher, OpenAiSummarizer>,
    report_writer: Option<ReportWriter>,
}

impl App {
    /// 初始化应用
    ///
    /// 配置非法或缺少 LLM 凭据时在任何浏览器操作之前失败
    pub fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;

        let summarizer = OpenAiSummarizer::new(&config.llm)?;
        let launcher = ChromeLauncher::new(config.browser.clone());
        let pipeline = Pipeline::new(launcher, summarizer, PipelineSettings::from(&config));
        let report_writer = config.report_file.as_deref().map(ReportWriter::with_path);

        Ok(Self {
            config,
            pipeline,
            report_writer,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 运行一次查询，进度写入日志
    pub async fn run(&self, query: &str) -> AppResult<ResultSet> {
        self.run_with_observer(query, &LoggingObserver).await
    }

    /// 运行一次查询，进度交给调用方提供的观察者
    pub async fn run_with_observer(
        &self,
        query: &str,
        observer: &dyn ProgressObserver,
    ) -> AppResult<ResultSet> {
        let provider = SearchProvider::for_engine(self.config.search_engine);
        log_startup(query, provider.name, self.config.max_results);

        let result = self
            .pipeline
            .run_with_observer(query, self.config.max_results, observer)
            .await?;

        print_final_stats(&result);

        // 报告写入失败不影响本次结果
        if let Some(writer) = &self.report_writer {
            match writer.write(&result) {
                Ok(()) => info!("\n报告已保存至: {}", writer.path()),
                Err(e) => error!("{}", e),
            }
        }

        Ok(result)
    }
}
