use serde::{Deserialize, Serialize};

/// 单条检索结果，始终带回发起它的查询串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub query: String,
    pub title: String,
    pub url: String,
    pub content: String,
}

impl SearchResult {
    /// 将单条查询的失败包装为错误条目，批次得以继续
    pub fn provider_error(provider: &str, query: &str, error: &str) -> Self {
        Self {
            query: query.to_string(),
            title: format!("[{} Error]", provider),
            url: String::new(),
            content: format!("Error: {}", error),
        }
    }
}

/// 将检索结果拼接为提供给模型的上下文文本
pub fn format_results(results: &[SearchResult]) -> String {
    let rule = "=".repeat(80);
    let mut formatted = String::new();
    for result in results {
        formatted.push_str(&format!(
            "{rule}\nQuery: {}\nTitle: {}\nURL: {}\nContent: {}\n{rule}\n\n",
            result.query, result.title, result.url, result.content
        ));
    }
    formatted
}
