pub mod result;

pub use result::{
    Diagnostic, PageContent, Progress, ResultLink, ResultSet, SearchQuery, Stage, SummaryEntry,
};
