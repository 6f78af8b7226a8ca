//! 检索网关 - 在可互换的外部搜索服务之间做选择
//!
//! 策略在构建客户端时确定一次：有Tavily凭证用Tavily，否则回退
//! DuckDuckGo，两者都不可用时退化为占位内容而不是报错。

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::SearchConfig;

mod duckduckgo;
mod tavily;
pub mod types;

pub use types::SearchResult;

use duckduckgo::DuckDuckGoProvider;
use tavily::TavilyProvider;

/// 无可用检索服务时返回的占位内容
pub const SEARCH_UNAVAILABLE_PLACEHOLDER: &str =
    "[No search provider available. Configure a Tavily API key or enable the DuckDuckGo fallback.]";

/// 检索服务提供方
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// 提供方名称，用于日志与错误条目标记
    fn name(&self) -> &'static str;

    /// 执行单条查询
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>>;
}

/// 检索策略
///
/// 在配置阶段由凭证情况确定一次，之后的每次调用不再重新评估。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Tavily
    Primary,
    /// DuckDuckGo
    Secondary,
    /// 没有可用的检索服务
    Unavailable,
}

impl SearchStrategy {
    pub fn from_config(config: &SearchConfig) -> Self {
        if config
            .tavily_api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty())
        {
            SearchStrategy::Primary
        } else if config.enable_duckduckgo {
            SearchStrategy::Secondary
        } else {
            SearchStrategy::Unavailable
        }
    }
}

/// 检索客户端
#[derive(Clone)]
pub struct SearchClient {
    strategy: SearchStrategy,
    provider: Option<Arc<dyn SearchProvider>>,
    max_results: usize,
}

impl SearchClient {
    pub fn new(config: &SearchConfig) -> Self {
        let strategy = SearchStrategy::from_config(config);
        // 单条查询的超时由HTTP客户端统一承担
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_default();

        let provider: Option<Arc<dyn SearchProvider>> = match strategy {
            SearchStrategy::Primary => Some(Arc::new(TavilyProvider::new(
                config.tavily_api_key.clone().unwrap_or_default(),
                http,
            ))),
            SearchStrategy::Secondary => Some(Arc::new(DuckDuckGoProvider::new(http))),
            SearchStrategy::Unavailable => None,
        };

        Self {
            strategy,
            provider,
            max_results: config.max_results,
        }
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// 逐条执行一批查询并拼接为上下文文本
    ///
    /// 单条查询失败会被转写为错误条目，剩余查询继续执行；本方法不失败。
    pub async fn execute(&self, queries: &[String]) -> String {
        let Some(provider) = &self.provider else {
            return SEARCH_UNAVAILABLE_PLACEHOLDER.to_string();
        };

        let mut results = Vec::new();
        for query in queries {
            match provider.search(query, self.max_results).await {
                Ok(mut found) => results.append(&mut found),
                Err(e) => {
                    eprintln!("⚠️ 检索查询失败 [{}] {}: {}", provider.name(), query, e);
                    results.push(SearchResult::provider_error(
                        provider.name(),
                        query,
                        &e.to_string(),
                    ));
                }
            }
        }

        types::format_results(&results)
    }
}

// Include tests
#[cfg(test)]
mod tests;
