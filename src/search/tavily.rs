//! Tavily检索 - 凭证存在时的主检索服务

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::search::SearchProvider;
use crate::search::types::SearchResult;

const TAVILY_API_URL: &str = "https://api.tavily.com/search";

pub struct TavilyProvider {
    api_key: String,
    http: reqwest::Client,
}

impl TavilyProvider {
    pub fn new(api_key: String, http: reqwest::Client) -> Self {
        Self { api_key, http }
    }

    /// 解析Tavily响应体
    pub(crate) fn parse_response(body: &str, query: &str) -> Result<Vec<SearchResult>> {
        let response: TavilyResponse =
            serde_json::from_str(body).context("Failed to parse Tavily response")?;
        Ok(response
            .results
            .into_iter()
            .map(|item| SearchResult {
                query: query.to_string(),
                title: item.title,
                url: item.url,
                content: item.content,
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyItem>,
}

#[derive(Debug, Deserialize)]
struct TavilyItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

#[async_trait]
impl SearchProvider for TavilyProvider {
    fn name(&self) -> &'static str {
        "Tavily"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        let body = self
            .http
            .post(TAVILY_API_URL)
            .json(&json!({
                "api_key": self.api_key,
                "query": query,
                "max_results": max_results,
                "include_answer": false,
            }))
            .send()
            .await
            .context("Failed to send Tavily request")?
            .error_for_status()
            .context("Tavily returned an error status")?
            .text()
            .await
            .context("Failed to read Tavily response")?;

        Self::parse_response(&body, query)
    }
}
