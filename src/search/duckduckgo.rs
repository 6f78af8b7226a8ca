//! DuckDuckGo检索 - 无凭证时的回退检索服务
//!
//! 解析html.duckduckgo.com的结果页，不依赖API凭证。

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;

use crate::search::SearchProvider;
use crate::search::types::SearchResult;

const DUCKDUCKGO_HTML_URL: &str = "https://html.duckduckgo.com/html/";

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

pub struct DuckDuckGoProvider {
    http: reqwest::Client,
    link_pattern: Regex,
    snippet_pattern: Regex,
}

impl DuckDuckGoProvider {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            // 结果页中的标题链接与摘要节点
            link_pattern: Regex::new(
                r#"(?s)<a[^>]*class="result__a"[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#,
            )
            .expect("valid regex"),
            snippet_pattern: Regex::new(r#"(?s)<a[^>]*class="result__snippet"[^>]*>(.*?)</a>"#)
                .expect("valid regex"),
        }
    }

    /// 从结果页HTML中抽取检索结果
    pub(crate) fn parse_results(
        &self,
        html: &str,
        query: &str,
        max_results: usize,
    ) -> Vec<SearchResult> {
        let snippets: Vec<String> = self
            .snippet_pattern
            .captures_iter(html)
            .map(|caps| strip_html(&caps[1]))
            .collect();

        let mut results = Vec::new();
        for (index, caps) in self.link_pattern.captures_iter(html).enumerate() {
            if results.len() >= max_results {
                break;
            }
            results.push(SearchResult {
                query: query.to_string(),
                title: strip_html(&caps[2]),
                url: strip_html(&caps[1]),
                content: snippets.get(index).cloned().unwrap_or_default(),
            });
        }
        results
    }
}

/// 去掉HTML标签并还原常见实体
pub(crate) fn strip_html(fragment: &str) -> String {
    let mut text = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for ch in fragment.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .trim()
        .to_string()
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    fn name(&self) -> &'static str {
        "DuckDuckGo"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        let html = self
            .http
            .get(DUCKDUCKGO_HTML_URL)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[("q", query)])
            .send()
            .await
            .context("Failed to send DuckDuckGo request")?
            .error_for_status()
            .context("DuckDuckGo returned an error status")?
            .text()
            .await
            .context("Failed to read DuckDuckGo response")?;

        Ok(self.parse_results(&html, query, max_results))
    }
}
