#[cfg(test)]
mod tests {
    use crate::config::SearchConfig;
    use crate::search::duckduckgo::{DuckDuckGoProvider, strip_html};
    use crate::search::tavily::TavilyProvider;
    use crate::search::types::{SearchResult, format_results};
    use crate::search::{SEARCH_UNAVAILABLE_PLACEHOLDER, SearchClient, SearchStrategy};

    fn search_config(tavily_api_key: Option<&str>, enable_duckduckgo: bool) -> SearchConfig {
        SearchConfig {
            tavily_api_key: tavily_api_key.map(String::from),
            enable_duckduckgo,
            max_results: 5,
            timeout_seconds: 15,
        }
    }

    #[test]
    fn test_strategy_prefers_tavily_when_key_present() {
        let config = search_config(Some("tvly-test"), true);
        assert_eq!(SearchStrategy::from_config(&config), SearchStrategy::Primary);
    }

    #[test]
    fn test_strategy_falls_back_to_duckduckgo() {
        let config = search_config(None, true);
        assert_eq!(
            SearchStrategy::from_config(&config),
            SearchStrategy::Secondary
        );
    }

    #[test]
    fn test_strategy_unavailable_without_any_provider() {
        let config = search_config(None, false);
        assert_eq!(
            SearchStrategy::from_config(&config),
            SearchStrategy::Unavailable
        );
    }

    #[test]
    fn test_strategy_treats_empty_key_as_absent() {
        let config = search_config(Some(""), false);
        assert_eq!(
            SearchStrategy::from_config(&config),
            SearchStrategy::Unavailable
        );
    }

    #[tokio::test]
    async fn test_execute_unavailable_returns_placeholder() {
        let client = SearchClient::new(&search_config(None, false));
        assert_eq!(client.strategy(), SearchStrategy::Unavailable);

        let context = client.execute(&["anything".to_string()]).await;
        assert_eq!(context, SEARCH_UNAVAILABLE_PLACEHOLDER);
    }

    #[test]
    fn test_provider_error_result() {
        let result = SearchResult::provider_error("Tavily", "rust runtimes", "timed out");

        assert_eq!(result.query, "rust runtimes");
        assert_eq!(result.title, "[Tavily Error]");
        assert!(result.url.is_empty());
        assert_eq!(result.content, "Error: timed out");
    }

    #[test]
    fn test_format_results_tags_each_entry_with_its_query() {
        let results = vec![
            SearchResult {
                query: "q1".to_string(),
                title: "t1".to_string(),
                url: "https://example.com/1".to_string(),
                content: "c1".to_string(),
            },
            SearchResult {
                query: "q2".to_string(),
                title: "t2".to_string(),
                url: "https://example.com/2".to_string(),
                content: "c2".to_string(),
            },
        ];

        let formatted = format_results(&results);
        assert!(formatted.contains("Query: q1"));
        assert!(formatted.contains("Query: q2"));
        assert!(formatted.contains("Title: t2"));
        // per-result delimiters
        assert!(formatted.contains(&"=".repeat(80)));
    }

    #[test]
    fn test_format_results_empty() {
        assert!(format_results(&[]).is_empty());
    }

    #[test]
    fn test_tavily_parse_response() {
        let body = r#"{
            "results": [
                {"title": "Tokio", "url": "https://tokio.rs", "content": "An async runtime"},
                {"title": "async-std", "url": "https://async.rs"}
            ]
        }"#;

        let results = TavilyProvider::parse_response(body, "rust async runtimes").unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].query, "rust async runtimes");
        assert_eq!(results[0].title, "Tokio");
        assert_eq!(results[1].content, "");
    }

    #[test]
    fn test_tavily_parse_response_invalid() {
        assert!(TavilyProvider::parse_response("not json", "q").is_err());
    }

    #[test]
    fn test_duckduckgo_parse_results() {
        let provider = DuckDuckGoProvider::new(reqwest::Client::new());
        let html = r#"
<div class="result">
  <a rel="nofollow" class="result__a" href="https://tokio.rs/">Tokio - <b>async</b> runtime</a>
  <a class="result__snippet" href="https://tokio.rs/">Build reliable network applications.</a>
</div>
<div class="result">
  <a rel="nofollow" class="result__a" href="https://async.rs/">async-std</a>
  <a class="result__snippet" href="https://async.rs/">Async version of the Rust standard library.</a>
</div>
"#;

        let results = provider.parse_results(html, "rust async runtimes", 5);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Tokio - async runtime");
        assert_eq!(results[0].url, "https://tokio.rs/");
        assert_eq!(results[0].content, "Build reliable network applications.");
        assert_eq!(results[1].title, "async-std");
    }

    #[test]
    fn test_duckduckgo_parse_respects_max_results() {
        let provider = DuckDuckGoProvider::new(reqwest::Client::new());
        let html = r#"
  <a class="result__a" href="https://a.example/">A</a>
  <a class="result__a" href="https://b.example/">B</a>
  <a class="result__a" href="https://c.example/">C</a>
"#;

        let results = provider.parse_results(html, "q", 2);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("plain"), "plain");
        assert_eq!(strip_html("<b>bold</b> text"), "bold text");
        assert_eq!(strip_html(" a &amp; b &#x27;c&#x27; "), "a & b 'c'");
    }
}
