pub mod link_collector;
pub mod normalizer;
pub mod page_extractor;
pub mod report_writer;
pub mod search_provider;
pub mod summarizer;

pub use link_collector::ResultLinkCollector;
pub use normalizer::normalize;
pub use page_extractor::PageExtractor;
pub use report_writer::ReportWriter;
pub use search_provider::SearchProvider;
pub use summarizer::{OpenAiSummarizer, Summarizer};
