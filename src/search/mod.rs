//! Web search used by the researcher to ground proposals.

pub mod serper;

use async_trait::async_trait;

use crate::errors::SearchError;

pub use serper::SerperClient;

/// A web search backend returning the provider's raw JSON result document.
#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<serde_json::Value, SearchError>;
}

/// Restrict a query to Reddit threads.
pub fn reddit_query(query: &str) -> String {
    format!("site:reddit.com {}", query)
}

/// Bias a query towards winning hackathon write-ups.
pub fn winners_query(query: &str) -> String {
    format!("{} hackathon winner project devpost", query)
}

/// Restrict a query to tech blogging platforms.
pub fn blogs_query(query: &str) -> String {
    format!(
        "{} (site:medium.com OR site:dev.to OR site:hackernoon.com OR site:twitter.com)",
        query
    )
}
